use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A rating under one rating system: value plus deviation (RD).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub value: f64,
    pub deviation: f64
}

impl Rating {
    pub fn new(value: f64, deviation: f64) -> Rating {
        Rating { value, deviation }
    }
}

/// Output of a single Glicko update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResult {
    pub new_rating: f64,
    pub new_rd: f64
}

/// One simulated head-to-head outcome against an opponent.
/// `score` is 1.0 for a win, 0.5 for a tie and 0.0 for a loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub opponent_rating: f64,
    pub opponent_rd: f64,
    pub score: f64
}

/// A finishing position paired with the player's pre-tournament rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedStanding {
    pub player_id: String,
    pub position: u32,
    pub rating: f64,
    pub rd: f64
}

impl RatedStanding {
    pub fn new(player_id: impl Into<String>, position: u32, rating: f64, rd: f64) -> RatedStanding {
        RatedStanding {
            player_id: player_id.into(),
            position,
            rating,
            rd
        }
    }
}

/// Looks up the rating value a player holds under `system_id`.
pub fn get_primary_rating(ratings: &IndexMap<String, Rating>, system_id: &str) -> Option<f64> {
    ratings.get(system_id).map(|r| r.value)
}
