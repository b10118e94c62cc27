use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::model::structures::{event_booster_type::EventBoosterType, player::Player, tgp_config::TgpConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub date: DateTime<FixedOffset>,
    pub players: Vec<Player>,
    #[serde(default)]
    pub tgp_config: TgpConfig,
    #[serde(default)]
    pub event_booster: EventBoosterType,
    #[serde(default)]
    pub allows_opt_out: bool
}

/// A player's finishing position in one tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    pub player: Player,
    pub position: u32,
    #[serde(default)]
    pub opted_out: bool
}

impl PlayerResult {
    pub fn new(player: Player, position: u32) -> PlayerResult {
        PlayerResult {
            player,
            position,
            opted_out: false
        }
    }

    pub fn with_opt_out(mut self) -> PlayerResult {
        self.opted_out = true;
        self
    }
}
