//! Avatar skeleton normalization.
//!
//! Avatar features such as gaze and audio-reactive scaling attach to a `Head`
//! joint with two eye children. Custom models picked by users usually have no
//! such rig, so before the model is handed to the renderer its node graph is
//! wrapped in a minimal humanoid chain:
//!
//! ```text
//! AvatarRoot -> Hips -> Spine -> Neck -> Head -> [original root, RightEye, LeftEye]
//! ```
//!
//! A document that already has a `Head` anywhere is treated as fully rigged and
//! is returned untouched.

use serde_json::{Value, json};
use thiserror::Error;

use crate::data_structures::model_document::{ModelDocument, Node};

pub const AVATAR_ROOT: &str = "AvatarRoot";
pub const HIPS: &str = "Hips";
pub const SPINE: &str = "Spine";
pub const NECK: &str = "Neck";
pub const HEAD: &str = "Head";
pub const LEFT_EYE: &str = "LeftEye";
pub const RIGHT_EYE: &str = "RightEye";

/// Extension block read by the host's component inflator.
pub const COMPONENTS_EXTENSION: &str = "MOZ_hubs_components";
/// Component that scales the head with the speaker's audio level.
pub const SCALE_AUDIO_FEEDBACK: &str = "scale-audio-feedback";

/// Number of nodes appended to an unrigged document.
pub const SYNTHETIC_JOINTS: usize = 7;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkeletonError {
    #[error("model document has no scenes")]
    NoScenes,
    #[error("active scene {index} does not exist (document has {count} scenes)")]
    MissingScene { index: usize, count: usize },
    #[error("active scene {index} has no root nodes")]
    EmptyScene { index: usize },
    #[error("scene root {root} points past the end of the node list ({count} nodes)")]
    DanglingRoot { root: usize, count: usize },
}

/// Ensures the document has a `Head` joint the avatar systems can attach to.
///
/// Only the first root of the active scene is wrapped. Further roots stay in
/// the scene's root list but are not part of the new hierarchy.
pub fn ensure_avatar_nodes(mut doc: ModelDocument) -> Result<ModelDocument, SkeletonError> {
    if doc.has_node_named(HEAD) {
        log::debug!("avatar model already has a {} node, leaving it as is", HEAD);
        return Ok(doc);
    }

    let original_root = root_to_wrap(&doc).inspect_err(|e| {
        log::warn!("rejecting avatar model: {}", e);
    })?;

    let base = doc.nodes.len();
    let avatar_root = base + SYNTHETIC_JOINTS - 1;
    doc.nodes.extend(humanoid_chain(base, original_root));
    if let Some(scene) = doc.active_scene_mut() {
        scene.nodes[0] = avatar_root;
    }

    log::info!(
        "avatar model has no {} node, wrapped root {} in a synthetic rig at {}",
        HEAD,
        original_root,
        avatar_root
    );
    Ok(doc)
}

fn root_to_wrap(doc: &ModelDocument) -> Result<usize, SkeletonError> {
    if doc.scenes.is_empty() {
        return Err(SkeletonError::NoScenes);
    }
    let index = doc.active_scene_index();
    let scene = doc.scenes.get(index).ok_or(SkeletonError::MissingScene {
        index,
        count: doc.scenes.len(),
    })?;
    let root = *scene
        .nodes
        .first()
        .ok_or(SkeletonError::EmptyScene { index })?;
    if root >= doc.nodes.len() {
        return Err(SkeletonError::DanglingRoot {
            root,
            count: doc.nodes.len(),
        });
    }
    Ok(root)
}

/// Builds the synthetic joints for a document whose next free node index is
/// `base`. Every index is derived from `base`, so the result can be appended
/// as a whole.
fn humanoid_chain(base: usize, original_root: usize) -> Vec<Node> {
    let left_eye = base;
    let right_eye = base + 1;
    let head = base + 2;
    let neck = base + 3;
    let spine = base + 4;
    let hips = base + 5;

    vec![
        Node::named(LEFT_EYE).with_extension(COMPONENTS_EXTENSION, json!({})),
        Node::named(RIGHT_EYE).with_extension(COMPONENTS_EXTENSION, json!({})),
        Node::named(HEAD)
            .with_children(vec![original_root, right_eye, left_eye])
            .with_extension(COMPONENTS_EXTENSION, audio_feedback()),
        Node::named(NECK).with_children(vec![head]),
        Node::named(SPINE).with_children(vec![neck]),
        Node::named(HIPS).with_children(vec![spine]),
        Node::named(AVATAR_ROOT).with_children(vec![hips]),
    ]
}

fn audio_feedback() -> Value {
    json!({ SCALE_AUDIO_FEEDBACK: "" })
}
