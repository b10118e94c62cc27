use serde::{Deserialize, Serialize};

/// Every intermediate of a tournament's valuation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentValue {
    pub base_value: f64,
    pub tva_rating: f64,
    pub tva_ranking: f64,
    pub total_tva: f64,
    pub tgp: f64,
    pub event_booster_multiplier: f64,
    pub first_place_value: f64
}

/// Points awarded to one player for one tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDistribution {
    pub player_id: String,
    pub position: u32,
    pub linear_points: f64,
    pub dynamic_points: f64,
    pub total_points: f64
}
