use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub player_id: String,
    /// Sum of decayed points over the counted (top-N active) events
    pub total_points: f64,
    /// Decayed efficiency over the counted events, as a percentage
    pub efficiency: f64,
    pub event_count: usize,
    pub active_event_count: usize,
    pub counted_event_count: usize,
    /// Updated by `rank_profiles`, 0 until then
    pub ranking: u32
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyStats {
    pub overall: f64,
    /// Efficiency over the top-N events (15 by default)
    pub top_n: f64,
    pub best: f64,
    pub worst: f64,
    pub average: f64,
    pub median: f64
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EfficiencyTrend {
    Improving,
    Declining,
    Stable
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub trend: EfficiencyTrend,
    pub recent_efficiency: f64,
    pub overall_efficiency: f64,
    /// `recent_efficiency - overall_efficiency`
    pub difference: f64
}
