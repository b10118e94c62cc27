use crate::model::{config::OpprConfig, structures::player::Player};

/// Base value of a tournament: `min(rated_players * POINTS_PER_PLAYER, MAX_BASE_VALUE)`.
/// Unrated players add nothing.
pub fn calculate_base_value(players: &[Player], config: &OpprConfig) -> f64 {
    calculate_base_value_from_count(count_rated_players(players), config)
}

pub fn calculate_base_value_from_count(rated_player_count: usize, config: &OpprConfig) -> f64 {
    let constants = &config.base_value;

    (rated_player_count as f64 * constants.points_per_player).min(constants.max_base_value)
}

pub fn count_rated_players(players: &[Player]) -> usize {
    players.iter().filter(|p| p.is_rated).count()
}

/// A player becomes rated once they have played RATED_PLAYER_THRESHOLD events.
pub fn is_rated_player(event_count: u32, config: &OpprConfig) -> bool {
    event_count >= config.base_value.rated_player_threshold
}
