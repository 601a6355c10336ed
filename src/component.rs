//! The player-info component.
//!
//! Binds asynchronous host events (model loaded, presence changed, emoji
//! action, model error) to the avatar's display state: its model source, its
//! nametag and community identifier, and the emoji image on the local rig.
//!
//! # Lifecycle
//!
//! The component is an explicit state machine driven by the host:
//!
//! 1. `new()` builds it in [`Lifecycle::Inactive`]
//! 2. `init()` returns an [`Out`] with the futures the host must resolve and
//!    feed back through `handle()` (remote players resolve their creator)
//! 3. `play()` enters [`Lifecycle::Active`] and subscribes to the event channels
//! 4. `handle()` reacts to events on subscribed channels
//! 5. `pause()` unsubscribes everything `play()` subscribed and goes back to
//!    [`Lifecycle::Inactive`]
//!
//! `update()` may be called at any time with new schema data.

use futures::{FutureExt, future::LocalBoxFuture};
use serde::{Deserialize, Serialize};

use crate::{
    config::PlayerInfoConfig,
    host::{
        Attribute, Element, EntityId, EventChannel, EventTarget, Networking, SceneHost,
        SettingsStore,
    },
    presence::{PresenceDirectory, PresenceMeta, SessionId},
    resources::avatar_preprocessor,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarType {
    #[default]
    Legacy,
    Skinnable,
}

/// Schema data set on the component by the host.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerInfoData {
    pub avatar_src: Option<String>,
    pub avatar_type: AvatarType,
}

impl PlayerInfoData {
    pub fn with_avatar_src(src: impl Into<String>) -> Self {
        Self {
            avatar_src: Some(src.into()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Inactive,
    Active,
}

/// Inbound messages from the host.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerInfoEvent {
    EmojiChange,
    ModelLoaded,
    ModelError,
    PresenceUpdated(PresenceMeta),
    /// Result of the creator lookup started by `init()`.
    CreatorResolved(Option<SessionId>),
}

impl PlayerInfoEvent {
    /// Channel the event is delivered on. `None` for replies to futures the
    /// component started itself.
    pub fn channel(&self) -> Option<EventChannel> {
        match self {
            PlayerInfoEvent::EmojiChange => Some(EventChannel::EmojiChange),
            PlayerInfoEvent::ModelLoaded => Some(EventChannel::ModelLoaded),
            PlayerInfoEvent::ModelError => Some(EventChannel::ModelError),
            PlayerInfoEvent::PresenceUpdated(_) => Some(EventChannel::PresenceUpdated),
            PlayerInfoEvent::CreatorResolved(_) => None,
        }
    }
}

///
/// Output of lifecycle hooks.
///
/// `Out::FutEvent` holds futures the host resolves and feeds back into
/// `PlayerInfo::handle`. They have no effect unless handled.
///
/// `Empty` is used when there is nothing to wait for.
///
pub enum Out<E> {
    FutEvent(Vec<LocalBoxFuture<'static, E>>),
    Empty,
}

impl<E> Default for Out<E> {
    fn default() -> Self {
        Self::Empty
    }
}

/// Everything the component talks to.
pub struct Collaborators {
    pub host: Box<dyn SceneHost>,
    pub networking: Box<dyn Networking>,
    pub presence: Box<dyn PresenceDirectory>,
    pub settings: Box<dyn SettingsStore>,
}

pub struct PlayerInfo {
    entity: EntityId,
    config: PlayerInfoConfig,
    data: PlayerInfoData,
    deps: Collaborators,
    lifecycle: Lifecycle,
    is_local: bool,
    session_id: Option<SessionId>,
    display_name: Option<String>,
    community_identifier: Option<String>,
    subscriptions: Vec<(EventTarget, EventChannel)>,
}

impl PlayerInfo {
    pub fn new(
        entity: EntityId,
        config: PlayerInfoConfig,
        data: PlayerInfoData,
        deps: Collaborators,
    ) -> Self {
        let is_local = entity.0 == config.local_rig_id;
        Self {
            entity,
            config,
            data,
            deps,
            lifecycle: Lifecycle::Inactive,
            is_local,
            session_id: None,
            display_name: None,
            community_identifier: None,
            subscriptions: Vec::new(),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_local(&self) -> bool {
        self.is_local
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn community_identifier(&self) -> Option<&str> {
        self.community_identifier.as_deref()
    }

    pub fn data(&self) -> &PlayerInfoData {
        &self.data
    }

    /// Remote avatars look up which session created their entity; the answer
    /// comes back as [`PlayerInfoEvent::CreatorResolved`].
    pub fn init(&mut self) -> Out<PlayerInfoEvent> {
        if self.is_local {
            return Out::Empty;
        }
        let creator = self.deps.networking.resolve_creator(&self.entity);
        Out::FutEvent(vec![
            async move { PlayerInfoEvent::CreatorResolved(creator.await) }.boxed_local(),
        ])
    }

    pub fn play(&mut self) {
        if self.lifecycle == Lifecycle::Active {
            return;
        }
        self.subscribe(EventTarget::Scene, EventChannel::EmojiChange);
        self.subscribe(EventTarget::Entity, EventChannel::ModelLoaded);
        self.subscribe(EventTarget::Scene, EventChannel::PresenceUpdated);
        if self.is_local {
            self.subscribe(EventTarget::Model, EventChannel::ModelError);
        }
        self.lifecycle = Lifecycle::Active;
        log::debug!("player-info on {} is active", self.entity);
    }

    pub fn pause(&mut self) {
        if self.lifecycle == Lifecycle::Inactive {
            return;
        }
        for (target, channel) in self.subscriptions.drain(..) {
            self.deps.host.remove_listener(target, channel);
        }
        self.lifecycle = Lifecycle::Inactive;
        log::debug!("player-info on {} is inactive", self.entity);
    }

    pub fn update(&mut self, data: PlayerInfoData) {
        self.data = data;
        self.apply_properties();
    }

    pub fn handle(&mut self, event: PlayerInfoEvent) {
        if let Some(channel) = event.channel() {
            if !self.is_subscribed(channel) {
                log::debug!(
                    "player-info on {} ignored {} while not listening",
                    self.entity,
                    channel.name()
                );
                return;
            }
        }
        match event {
            PlayerInfoEvent::EmojiChange => self.change_emoji(),
            PlayerInfoEvent::ModelLoaded => self.apply_properties(),
            PlayerInfoEvent::ModelError => self.handle_model_error(),
            PlayerInfoEvent::PresenceUpdated(meta) => self.update_display_name(&meta),
            PlayerInfoEvent::CreatorResolved(creator) => self.creator_resolved(creator),
        }
    }

    fn subscribe(&mut self, target: EventTarget, channel: EventChannel) {
        self.deps.host.add_listener(target, channel);
        self.subscriptions.push((target, channel));
    }

    fn is_subscribed(&self, channel: EventChannel) -> bool {
        self.lifecycle == Lifecycle::Active
            && self.subscriptions.iter().any(|(_, c)| *c == channel)
    }

    fn creator_resolved(&mut self, creator: Option<SessionId>) {
        let Some(session_id) = creator else {
            log::debug!("no creator found for {}", self.entity);
            return;
        };
        let meta = self.deps.presence.first_meta(&session_id);
        self.session_id = Some(session_id);
        if let Some(meta) = meta {
            self.update_display_name_from_meta(&meta);
        }
    }

    fn change_emoji(&mut self) {
        let src = Attribute::MediaLoaderSrc(self.config.emoji_sprite_url.clone());
        if !self.deps.host.set_attribute(Element::LocalRigImage, src) {
            log::debug!("local rig has no image element for emoji");
        }
    }

    fn update_display_name(&mut self, meta: &PresenceMeta) {
        if self.session_id.is_none() && self.is_local {
            self.session_id = self.deps.networking.client_id();
        }
        let Some(session_id) = &self.session_id else {
            return;
        };
        if meta.session_id.as_ref() != Some(session_id) {
            return;
        }
        self.update_display_name_from_meta(meta);
    }

    fn update_display_name_from_meta(&mut self, meta: &PresenceMeta) {
        self.display_name = Some(meta.display_name(&self.config.moderator_suffix));
        self.community_identifier = meta.profile.community_identifier.clone();
        self.apply_display_name();
    }

    fn apply_display_name(&mut self) {
        // Empty strings count as absent and leave the current text in place.
        if let Some(name) = self.display_name.as_deref().filter(|n| !n.is_empty()) {
            let text = Attribute::Text {
                value: name.to_string(),
            };
            if !self.deps.host.set_attribute(Element::Nametag, text) {
                log::debug!("{} has no nametag", self.entity);
            }
        }
        if let Some(identifier) = self
            .community_identifier
            .as_deref()
            .filter(|id| !id.is_empty())
        {
            let text = Attribute::Text {
                value: identifier.to_string(),
            };
            self.deps
                .host
                .set_attribute(Element::CommunityIdentifier, text);
        }
    }

    fn apply_properties(&mut self) {
        self.apply_display_name();

        let src = self.data.avatar_src.as_deref().filter(|src| !src.is_empty());
        match src {
            Some(src) if self.deps.host.has_element(Element::Model) => {
                self.deps.host.install_json_preprocessor(avatar_preprocessor());
                self.deps
                    .host
                    .set_attribute(Element::Model, Attribute::GltfModelSrc(src.to_string()));
                self.deps.host.avatar_updated();
            }
            Some(_) => log::debug!("{} has no model element", self.entity),
            None => (),
        }

        self.deps.host.refresh_hover_visuals();
    }

    fn handle_model_error(&mut self) {
        log::info!(
            "avatar model for {} failed to load, falling back to a random default avatar",
            self.entity
        );
        self.deps.settings.reset_to_random_legacy_avatar();
    }
}
