//! glTF-shaped model document.
//!
//! Only the parts of a glTF 2.0 JSON document that avatar preprocessing touches
//! are typed: the node list, the scene list and the active scene index. Every
//! other property (meshes, accessors, transforms, extras...) is carried in the
//! flattened `other` maps so a document survives a parse/serialize round trip
//! unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed glTF scene description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenes: Vec<Scene>,
    /// Index of the active scene. glTF loaders fall back to scene 0 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<usize>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<usize>>,
    /// Named extension blocks, opaque to this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Root node indices.
    #[serde(default)]
    pub nodes: Vec<usize>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ModelDocument {
    pub fn from_slice(json: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(json)
    }

    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn active_scene_index(&self) -> usize {
        self.scene.unwrap_or(0)
    }

    pub fn active_scene(&self) -> Option<&Scene> {
        self.scenes.get(self.active_scene_index())
    }

    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        let idx = self.active_scene_index();
        self.scenes.get_mut(idx)
    }

    /// First root of the active scene, if there is one.
    pub fn active_root(&self) -> Option<usize> {
        self.active_scene().and_then(|scene| scene.nodes.first().copied())
    }

    pub fn has_node_named(&self, name: &str) -> bool {
        self.nodes.iter().any(|node| node.name.as_deref() == Some(name))
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|node| node.name.as_deref() == Some(name))
    }
}

impl Node {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<usize>) -> Self {
        self.children = Some(children);
        self
    }

    /// Adds (or replaces) the extension block stored under `extension`.
    pub fn with_extension(mut self, extension: &str, block: Value) -> Self {
        self.extensions
            .get_or_insert_with(Map::new)
            .insert(extension.to_string(), block);
        self
    }

    pub fn children(&self) -> &[usize] {
        self.children.as_deref().unwrap_or(&[])
    }
}
