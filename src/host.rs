//! Collaborators provided by the surrounding runtime.
//!
//! The component never reaches for app-wide singletons. The scene host, the
//! networking layer and the settings store are handed to it at construction
//! through the traits below, so any runtime (or a test double) can drive it.

use std::fmt;

use futures::future::LocalBoxFuture;

use crate::{presence::SessionId, resources::JsonPreprocessor};

/// Id of the scene entity the component is attached to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named event channels the component listens on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventChannel {
    EmojiChange,
    ModelLoaded,
    PresenceUpdated,
    ModelError,
}

impl EventChannel {
    pub fn name(self) -> &'static str {
        match self {
            EventChannel::EmojiChange => "action_emoji_change",
            EventChannel::ModelLoaded => "model-loaded",
            EventChannel::PresenceUpdated => "presence_updated",
            EventChannel::ModelError => "model-error",
        }
    }
}

/// Where a listener is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The whole scene.
    Scene,
    /// The entity the component is attached to.
    Entity,
    /// The entity's model child.
    Model,
}

/// Elements of the avatar the component writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    Nametag,
    CommunityIdentifier,
    Model,
    /// Image slot on the local player's rig, looked up from the scene.
    LocalRigImage,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Attribute {
    Text { value: String },
    MediaLoaderSrc(String),
    GltfModelSrc(String),
}

/// The entity-component runtime hosting the avatar.
pub trait SceneHost {
    fn add_listener(&mut self, target: EventTarget, channel: EventChannel);

    fn remove_listener(&mut self, target: EventTarget, channel: EventChannel);

    fn has_element(&self, element: Element) -> bool;

    /// Returns `false` when the element does not exist; nothing is written then.
    fn set_attribute(&mut self, element: Element, attribute: Attribute) -> bool;

    /// Installs the hook the model loader runs on the next model it parses.
    fn install_json_preprocessor(&mut self, preprocessor: JsonPreprocessor);

    /// Tells the camera tools the avatar changed.
    fn avatar_updated(&mut self);

    /// Re-injects the avatar shader chunks and hands the new uniforms to every
    /// hover-visuals component on the entity.
    fn refresh_hover_visuals(&mut self);
}

pub trait Networking {
    /// Session id of this client, once connected.
    fn client_id(&self) -> Option<SessionId>;

    /// Resolves the session that created (owns) a networked entity.
    fn resolve_creator(&self, entity: &EntityId) -> LocalBoxFuture<'static, Option<SessionId>>;
}

/// Persistent user settings.
pub trait SettingsStore {
    fn reset_to_random_legacy_avatar(&mut self);
}
