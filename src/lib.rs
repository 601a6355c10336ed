//! player-info
//!
//! Associates a networked avatar's 3D model, display name and emoji reaction
//! with its in-scene representation. The crate is a thin layer over a host
//! entity-component runtime that it reaches only through injected traits.
//!
//! High-level modules
//! - `component`: the player-info state machine and its inbound events
//! - `config`: component configuration and its TOML loader
//! - `data_structures`: the glTF-shaped model document
//! - `host`: collaborator traits (scene host, networking, settings store)
//! - `presence`: presence metadata and the presence directory trait
//! - `resources`: preprocessing of `.gltf`/`.glb` bytes before loading
//! - `skeleton`: synthesizes a humanoid rig for models without a `Head` joint
//!

pub mod component;
pub mod config;
pub mod data_structures;
pub mod host;
pub mod presence;
pub mod resources;
pub mod skeleton;

#[cfg(target_arch = "wasm32")]
pub mod bindings;

// Re-exports commonly used types for convenience in downstream code.
pub use component::{PlayerInfo, PlayerInfoData, PlayerInfoEvent};
pub use config::PlayerInfoConfig;
pub use data_structures::model_document::{ModelDocument, Node, Scene};
pub use skeleton::{SkeletonError, ensure_avatar_nodes};

/// Initializes logging for the current platform.
pub fn init_logger() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        // A logger may already be installed by the page.
        let _ = console_log::init_with_level(log::Level::Info);
    }
}
