use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::model::{
    config::OpprConfig,
    structures::{tournament::PlayerResult, tournament_value::PointDistribution}
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPoints {
    pub linear: f64,
    pub dynamic: f64,
    pub total: f64
}

/// Distributes `first_place_value` over a set of standings.
///
/// The field size used for the linear share is the full result set, opted-out players
/// included. Opted-out players are then dropped from the output rather than zeroed.
pub fn distribute_points(
    results: &[PlayerResult],
    rated_player_count: usize,
    first_place_value: f64,
    config: &OpprConfig
) -> Vec<PointDistribution> {
    let player_count = results.len();

    results
        .iter()
        .filter(|r| !r.opted_out)
        .map(|r| {
            let points =
                calculate_points_for_position(r.position, player_count, rated_player_count, first_place_value, config);
            trace!(
                "Player {} at position {} receives {:.4} points",
                r.player.id,
                r.position,
                points.total
            );

            PointDistribution {
                player_id: r.player.id.clone(),
                position: r.position,
                linear_points: points.linear,
                dynamic_points: points.dynamic,
                total_points: points.total
            }
        })
        .collect()
}

pub fn calculate_points_for_position(
    position: u32,
    player_count: usize,
    rated_player_count: usize,
    first_place_value: f64,
    config: &OpprConfig
) -> PositionPoints {
    let linear = calculate_linear_points(position, player_count, first_place_value, config);
    let dynamic = calculate_dynamic_points(position, rated_player_count, first_place_value, config);

    PositionPoints {
        linear,
        dynamic,
        total: linear + dynamic
    }
}

/// `((player_count + 1 - position) / player_count) * LINEAR_PERCENTAGE * first_place_value`.
/// Every finisher gets a share, including last place.
pub fn calculate_linear_points(position: u32, player_count: usize, first_place_value: f64, config: &OpprConfig) -> f64 {
    if player_count == 0 || position == 0 {
        return 0.0;
    }

    let player_count = player_count as f64;
    let share = ((player_count + 1.0 - position as f64) / player_count).max(0.0);

    share * config.point_distribution.linear_percentage * first_place_value
}

/// Winner-weighted share, nonzero only inside the dynamic range. Position 1 receives exactly
/// DYNAMIC_PERCENTAGE of `first_place_value`.
pub fn calculate_dynamic_points(
    position: u32,
    rated_player_count: usize,
    first_place_value: f64,
    config: &OpprConfig
) -> f64 {
    let constants = &config.point_distribution;
    let range = dynamic_range(rated_player_count, config);

    if position == 0 || position > range {
        return 0.0;
    }

    let ratio = (position - 1) as f64 / range as f64;
    let curve = (1.0 - ratio.powf(constants.position_exponent)).powf(constants.value_exponent);

    curve * constants.dynamic_percentage * first_place_value
}

/// `min(floor(rated_player_count / 2), MAX_DYNAMIC_PLAYERS)`
pub fn dynamic_range(rated_player_count: usize, config: &OpprConfig) -> u32 {
    let half = (rated_player_count / 2) as u32;

    half.min(config.point_distribution.max_dynamic_players)
}

/// Share of the first place value earned at `position`, as a percentage.
pub fn calculate_position_percentage(
    position: u32,
    player_count: usize,
    rated_player_count: usize,
    config: &OpprConfig
) -> f64 {
    calculate_points_for_position(position, player_count, rated_player_count, 100.0, config).total
}
