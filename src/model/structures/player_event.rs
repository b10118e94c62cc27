use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One historical tournament participation.
///
/// Only the decay fields (`age_in_days`, `decay_multiplier`, `decayed_points`) change over time;
/// they are recomputed from `total_points`, `event_date` and a reference date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEvent {
    pub tournament_id: String,
    pub event_date: DateTime<FixedOffset>,
    pub position: u32,
    /// Points earned at the time of the event
    pub total_points: f64,
    pub first_place_value: f64,
    #[serde(default)]
    pub age_in_days: i64,
    #[serde(default = "default_multiplier")]
    pub decay_multiplier: f64,
    #[serde(default)]
    pub decayed_points: f64
}

fn default_multiplier() -> f64 {
    1.0
}

impl PlayerEvent {
    pub fn new(
        tournament_id: impl Into<String>,
        event_date: DateTime<FixedOffset>,
        position: u32,
        total_points: f64,
        first_place_value: f64
    ) -> PlayerEvent {
        PlayerEvent {
            tournament_id: tournament_id.into(),
            event_date,
            position,
            total_points,
            first_place_value,
            age_in_days: 0,
            decay_multiplier: default_multiplier(),
            decayed_points: total_points
        }
    }

    /// Inactive events (fully decayed) are kept but ignored by every aggregate.
    pub fn is_active(&self) -> bool {
        self.decay_multiplier > 0.0
    }
}
