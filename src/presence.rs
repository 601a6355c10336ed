//! Presence metadata as broadcast by the session layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one client session in the room.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_identifier: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Roles {
    #[serde(default)]
    pub moderator: bool,
}

/// One presence entry. `session_id` is set on `presence_updated` payloads and
/// absent on directory entries, which are keyed by session already.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Roles>,
}

impl PresenceMeta {
    pub fn is_moderator(&self) -> bool {
        self.roles.as_ref().is_some_and(|roles| roles.moderator)
    }

    /// Name shown on the nametag; moderators get `moderator_suffix` appended.
    pub fn display_name(&self, moderator_suffix: &str) -> String {
        if self.is_moderator() {
            format!("{}{}", self.profile.display_name, moderator_suffix)
        } else {
            self.profile.display_name.clone()
        }
    }
}

/// Read access to the room's presence state.
pub trait PresenceDirectory {
    /// First meta published for `session`, if the session is present.
    fn first_meta(&self, session: &SessionId) -> Option<PresenceMeta>;
}
