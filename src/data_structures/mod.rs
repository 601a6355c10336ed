//! Data structures shared by the preprocessing and component layers.
//!
//! - `model_document` holds the glTF-shaped node/scene graph that avatar
//!   preprocessing patches before the model reaches the renderer

pub mod model_document;
