use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    rc::Rc,
};

use futures::{FutureExt, future::LocalBoxFuture};
use player_info::{
    ModelDocument, PlayerInfo, PlayerInfoConfig, PlayerInfoData,
    component::Collaborators,
    host::{
        Attribute, Element, EntityId, EventChannel, EventTarget, Networking, SceneHost,
        SettingsStore,
    },
    presence::{PresenceDirectory, PresenceMeta, Profile, Roles, SessionId},
    resources::JsonPreprocessor,
};
use serde_json::json;

pub const LOCAL_RIG: &str = "player-rig";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Everything the fake host was asked to do.
#[derive(Default)]
pub struct HostLog {
    pub listeners: Vec<(EventTarget, EventChannel)>,
    pub attributes: Vec<(Element, Attribute)>,
    pub preprocessor: Option<JsonPreprocessor>,
    pub avatar_updates: u32,
    pub hover_refreshes: u32,
}

impl HostLog {
    pub fn texts_for(&self, element: Element) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|(e, _)| *e == element)
            .filter_map(|(_, attribute)| match attribute {
                Attribute::Text { value } => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_for(&self, element: Element) -> Option<&Attribute> {
        self.attributes
            .iter()
            .rev()
            .find(|(e, _)| *e == element)
            .map(|(_, attribute)| attribute)
    }
}

pub struct FakeHost {
    log: Rc<RefCell<HostLog>>,
    elements: HashSet<Element>,
}

impl SceneHost for FakeHost {
    fn add_listener(&mut self, target: EventTarget, channel: EventChannel) {
        self.log.borrow_mut().listeners.push((target, channel));
    }

    fn remove_listener(&mut self, target: EventTarget, channel: EventChannel) {
        let mut log = self.log.borrow_mut();
        if let Some(pos) = log
            .listeners
            .iter()
            .position(|l| *l == (target, channel))
        {
            log.listeners.remove(pos);
        }
    }

    fn has_element(&self, element: Element) -> bool {
        self.elements.contains(&element)
    }

    fn set_attribute(&mut self, element: Element, attribute: Attribute) -> bool {
        if !self.elements.contains(&element) {
            return false;
        }
        self.log.borrow_mut().attributes.push((element, attribute));
        true
    }

    fn install_json_preprocessor(&mut self, preprocessor: JsonPreprocessor) {
        self.log.borrow_mut().preprocessor = Some(preprocessor);
    }

    fn avatar_updated(&mut self) {
        self.log.borrow_mut().avatar_updates += 1;
    }

    fn refresh_hover_visuals(&mut self) {
        self.log.borrow_mut().hover_refreshes += 1;
    }
}

pub struct FakeNetworking {
    client_id: Option<SessionId>,
    creator: Option<SessionId>,
}

impl Networking for FakeNetworking {
    fn client_id(&self) -> Option<SessionId> {
        self.client_id.clone()
    }

    fn resolve_creator(&self, _: &EntityId) -> LocalBoxFuture<'static, Option<SessionId>> {
        futures::future::ready(self.creator.clone()).boxed_local()
    }
}

pub struct FakePresence(HashMap<SessionId, PresenceMeta>);

impl PresenceDirectory for FakePresence {
    fn first_meta(&self, session: &SessionId) -> Option<PresenceMeta> {
        self.0.get(session).cloned()
    }
}

pub struct FakeSettings(Rc<Cell<u32>>);

impl SettingsStore for FakeSettings {
    fn reset_to_random_legacy_avatar(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

/// Handles to the fakes after they were moved into the component.
pub struct Probe {
    pub host: Rc<RefCell<HostLog>>,
    pub resets: Rc<Cell<u32>>,
}

pub struct Setup {
    entity: String,
    data: PlayerInfoData,
    elements: HashSet<Element>,
    client_id: Option<SessionId>,
    creator: Option<SessionId>,
    presence: HashMap<SessionId, PresenceMeta>,
}

impl Setup {
    pub fn local() -> Self {
        Self::for_entity(LOCAL_RIG)
    }

    pub fn remote(entity: &str) -> Self {
        Self::for_entity(entity)
    }

    fn for_entity(entity: &str) -> Self {
        init_logger();
        Self {
            entity: entity.to_string(),
            data: PlayerInfoData::default(),
            elements: [
                Element::Nametag,
                Element::CommunityIdentifier,
                Element::Model,
                Element::LocalRigImage,
            ]
            .into_iter()
            .collect(),
            client_id: None,
            creator: None,
            presence: HashMap::new(),
        }
    }

    pub fn data(mut self, data: PlayerInfoData) -> Self {
        self.data = data;
        self
    }

    pub fn without(mut self, element: Element) -> Self {
        self.elements.remove(&element);
        self
    }

    pub fn client_id(mut self, id: &str) -> Self {
        self.client_id = Some(SessionId::new(id));
        self
    }

    pub fn creator(mut self, id: &str) -> Self {
        self.creator = Some(SessionId::new(id));
        self
    }

    pub fn presence(mut self, id: &str, meta: PresenceMeta) -> Self {
        self.presence.insert(SessionId::new(id), meta);
        self
    }

    pub fn build(self) -> (PlayerInfo, Probe) {
        let log = Rc::new(RefCell::new(HostLog::default()));
        let resets = Rc::new(Cell::new(0));
        let deps = Collaborators {
            host: Box::new(FakeHost {
                log: log.clone(),
                elements: self.elements,
            }),
            networking: Box::new(FakeNetworking {
                client_id: self.client_id,
                creator: self.creator,
            }),
            presence: Box::new(FakePresence(self.presence)),
            settings: Box::new(FakeSettings(resets.clone())),
        };
        let component = PlayerInfo::new(
            EntityId::new(self.entity),
            PlayerInfoConfig::default(),
            self.data,
            deps,
        );
        (component, Probe { host: log, resets })
    }
}

pub fn meta(session: Option<&str>, name: &str, moderator: bool) -> PresenceMeta {
    PresenceMeta {
        session_id: session.map(SessionId::new),
        profile: Profile {
            display_name: name.to_string(),
            community_identifier: None,
        },
        roles: Some(Roles { moderator }),
    }
}

/// A single-mesh document with no rig, as exported by most modelling tools.
pub fn unrigged_document() -> ModelDocument {
    serde_json::from_value(json!({
        "asset": { "version": "2.0" },
        "nodes": [{ "name": "Mesh0" }],
        "scenes": [{ "nodes": [0] }],
        "scene": 0
    }))
    .expect("fixture")
}

/// A document that already carries the avatar joints.
pub fn rigged_document() -> ModelDocument {
    serde_json::from_value(json!({
        "asset": { "version": "2.0" },
        "nodes": [
            { "name": "AvatarRoot", "children": [1] },
            { "name": "Head", "children": [2, 3], "extensions": { "MOZ_hubs_components": {} } },
            { "name": "LeftEye" },
            { "name": "RightEye" }
        ],
        "scenes": [{ "nodes": [0] }],
        "scene": 0
    }))
    .expect("fixture")
}
