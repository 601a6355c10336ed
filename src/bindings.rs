//! Browser entry points.

use wasm_bindgen::prelude::*;

use crate::resources::preprocess_gltf_json;

/// Normalizes a glTF JSON string for the browser-side model loader.
#[wasm_bindgen(js_name = ensureAvatarNodes)]
pub fn ensure_avatar_nodes_json(json: &str) -> Result<String, JsValue> {
    let out = preprocess_gltf_json(json.as_bytes())
        .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
    String::from_utf8(out).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(start)]
pub fn start() {
    crate::init_logger();
}
