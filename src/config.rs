//! Component configuration.
//!
//! Every field has a default, so an empty TOML document (or `Default`) gives
//! the stock behavior.

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCAL_RIG_ID: &str = "player-rig";
pub const DEFAULT_EMOJI_SPRITE_URL: &str = "assets/images/sprites/camera_off.png";
pub const DEFAULT_MODERATOR_SUFFIX: &str = " *";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInfoConfig {
    /// Entity id of the local player's rig. The component is "local" when
    /// attached to this entity.
    pub local_rig_id: String,
    /// Image shown on the local rig when an emoji action fires.
    pub emoji_sprite_url: String,
    /// Appended to moderators' display names.
    pub moderator_suffix: String,
}

impl Default for PlayerInfoConfig {
    fn default() -> Self {
        Self {
            local_rig_id: DEFAULT_LOCAL_RIG_ID.to_string(),
            emoji_sprite_url: DEFAULT_EMOJI_SPRITE_URL.to_string(),
            moderator_suffix: DEFAULT_MODERATOR_SUFFIX.to_string(),
        }
    }
}

impl PlayerInfoConfig {
    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        toml::from_str(source).context("invalid player-info configuration")
    }
}
