//! Glue between raw model bytes coming from the host's loader and avatar
//! preprocessing.

use std::borrow::Cow;

use anyhow::Context;

use crate::{
    data_structures::model_document::ModelDocument,
    skeleton::{SkeletonError, ensure_avatar_nodes},
};

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_HEADER_LEN: usize = 12;
const GLB_CHUNK_HEADER_LEN: usize = 8;

/// Hook the host's model loader runs on the parsed JSON before building the scene.
pub type JsonPreprocessor = Box<dyn Fn(ModelDocument) -> Result<ModelDocument, SkeletonError>>;

pub fn avatar_preprocessor() -> JsonPreprocessor {
    Box::new(ensure_avatar_nodes)
}

pub fn is_glb(bytes: &[u8]) -> bool {
    bytes.starts_with(GLB_MAGIC)
}

/// Normalizes a `.gltf` JSON document.
pub fn preprocess_gltf_json(json: &[u8]) -> anyhow::Result<Vec<u8>> {
    let doc = ModelDocument::from_slice(json).context("avatar model is not valid glTF JSON")?;
    let doc = ensure_avatar_nodes(doc)?;
    let out = doc.to_vec().context("failed to serialize avatar model")?;
    Ok(out)
}

/// Normalizes the JSON chunk of a `.glb` container. The binary chunk is
/// passed through untouched.
pub fn preprocess_glb(bytes: &[u8]) -> anyhow::Result<Vec<u8>> {
    let glb = gltf::Glb::from_slice(bytes).context("avatar model is not a valid GLB container")?;
    let json = preprocess_gltf_json(&glb.json)?;

    let mut length = GLB_HEADER_LEN + GLB_CHUNK_HEADER_LEN + padded(json.len());
    if let Some(bin) = glb.bin.as_deref() {
        length += GLB_CHUNK_HEADER_LEN + padded(bin.len());
    }
    let out = gltf::Glb {
        header: gltf::binary::Header {
            magic: *GLB_MAGIC,
            version: glb.header.version,
            length: length as u32,
        },
        json: Cow::Owned(json),
        bin: glb.bin,
    };
    let out = out.to_vec().context("failed to write GLB container")?;
    Ok(out)
}

/// Normalizes either container format.
pub fn preprocess_model(bytes: &[u8]) -> anyhow::Result<Vec<u8>> {
    if is_glb(bytes) {
        preprocess_glb(bytes)
    } else {
        preprocess_gltf_json(bytes)
    }
}

/// Preprocesses the model and parses the result the way the rendering
/// pipeline will, so a broken rig is caught here rather than at draw time.
pub fn load_avatar_gltf(bytes: &[u8]) -> anyhow::Result<gltf::Gltf> {
    let bytes = preprocess_model(bytes)?;
    let gltf = gltf::Gltf::from_slice(&bytes).context("normalized avatar model failed to load")?;
    Ok(gltf)
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}
