use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::{config::OpprConfig, structures::player::Player};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvaBreakdown {
    pub rating: f64,
    pub ranking: f64,
    pub total: f64
}

/// Rating and ranking adjustments, each capped on its own. The total is their plain sum.
pub fn calculate_tva(players: &[Player], config: &OpprConfig) -> TvaBreakdown {
    let rating = calculate_rating_tva(players, config);
    let ranking = calculate_ranking_tva(players, config);

    TvaBreakdown {
        rating,
        ranking,
        total: rating + ranking
    }
}

/// Sums the contributions of the highest-rated players (at most MAX_PLAYERS_CONSIDERED) and caps
/// the result at RATING.MAX_VALUE. Players without a primary rating are not considered.
pub fn calculate_rating_tva(players: &[Player], config: &OpprConfig) -> f64 {
    let constants = &config.tva.rating;

    let sum: f64 = players
        .iter()
        .filter_map(|p| p.primary_rating())
        .sorted_by(|a, b| b.total_cmp(a))
        .take(constants.max_players_considered)
        .map(|rating| calculate_player_rating_contribution(rating, config))
        .sum();

    sum.min(constants.max_value)
}

/// `max(0, rating * COEFFICIENT - OFFSET)`
pub fn calculate_player_rating_contribution(rating: f64, config: &OpprConfig) -> f64 {
    let constants = &config.tva.rating;
    if rating < minimum_effective_rating(config) {
        return 0.0;
    }

    (rating * constants.coefficient - constants.offset).max(0.0)
}

/// The rating at which a player starts adding value (`OFFSET / COEFFICIENT`).
pub fn minimum_effective_rating(config: &OpprConfig) -> f64 {
    let constants = &config.tva.rating;
    if constants.coefficient <= 0.0 {
        return f64::INFINITY;
    }

    constants.offset / constants.coefficient
}

/// Sums the contributions of the best-ranked players (at most MAX_PLAYERS_CONSIDERED) and caps
/// the result at RANKING.MAX_VALUE.
///
/// Players ranked 0 or below are unranked and are removed before the top players are chosen.
pub fn calculate_ranking_tva(players: &[Player], config: &OpprConfig) -> f64 {
    let constants = &config.tva.ranking;

    let sum: f64 = players
        .iter()
        .map(|p| p.ranking)
        .filter(|ranking| *ranking > 0)
        .sorted()
        .take(constants.max_players_considered)
        .map(|ranking| calculate_player_ranking_contribution(ranking, config))
        .sum();

    sum.min(constants.max_value)
}

/// `max(0, ln(ranking) * COEFFICIENT + OFFSET)`, with rankings below 1 treated as 1.
pub fn calculate_player_ranking_contribution(ranking: i32, config: &OpprConfig) -> f64 {
    let constants = &config.tva.ranking;
    let ranking = ranking.max(1) as f64;

    (ranking.ln() * constants.coefficient + constants.offset).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::config::get_default_config, utils::test_utils::*};
    use approx::assert_abs_diff_eq;

    fn rated(n: usize, rating: f64) -> Vec<Player> {
        (0..n)
            .map(|i| generate_player(&format!("r{}", i), rating, 0, true))
            .collect()
    }

    fn ranked(rankings: &[i32]) -> Vec<Player> {
        rankings
            .iter()
            .enumerate()
            .map(|(i, ranking)| generate_player(&format!("k{}", i), 0.0, *ranking, true))
            .collect()
    }

    #[test]
    fn test_perfect_field_reaches_cap() {
        let config = get_default_config();
        let players = rated(64, config.tva.rating.perfect_rating);

        assert_abs_diff_eq!(calculate_rating_tva(&players, config), 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rating_tva_never_exceeds_cap() {
        let config = get_default_config();
        let players = rated(200, 2500.0);

        assert_abs_diff_eq!(calculate_rating_tva(&players, config), 25.0);
    }

    #[test]
    fn test_only_top_players_considered() {
        let mut config = get_default_config().clone();
        config.tva.rating.max_value = 100.0;

        let mut players = rated(64, 2000.0);
        players.extend(rated(10, 1500.0).into_iter().map(|mut p| {
            p.id = format!("extra-{}", p.id);
            p
        }));

        // The ten 1500-rated players fall outside the top 64
        assert_abs_diff_eq!(calculate_rating_tva(&players, &config), 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rating_contribution() {
        let config = get_default_config();

        assert_abs_diff_eq!(calculate_player_rating_contribution(1500.0, config), 0.1171875, epsilon = 1e-12);
        assert_eq!(calculate_player_rating_contribution(1200.0, config), 0.0);
    }

    #[test]
    fn test_minimum_effective_rating() {
        let config = get_default_config();
        let minimum = minimum_effective_rating(config);

        assert_abs_diff_eq!(minimum, 1285.714285, epsilon = 1e-5);
        assert_eq!(calculate_player_rating_contribution(minimum - 0.01, config), 0.0);
        assert!(calculate_player_rating_contribution(minimum + 10.0, config) > 0.0);
    }

    #[test]
    fn test_players_without_rating_ignored() {
        let config = get_default_config();
        let players = vec![
            generate_player("a", 1500.0, 0, true),
            Player::new("b").rated(true),
        ];

        assert_abs_diff_eq!(calculate_rating_tva(&players, config), 0.1171875, epsilon = 1e-12);
    }

    #[test]
    fn test_top_ranked_field_reaches_cap() {
        let config = get_default_config();
        let rankings: Vec<i32> = (1..=64).collect();

        let tva = calculate_ranking_tva(&ranked(&rankings), config);
        assert_abs_diff_eq!(tva, 50.0, epsilon = 1e-3);
        assert!(tva <= 50.0);
    }

    #[test]
    fn test_ranking_contribution() {
        let config = get_default_config();

        assert_abs_diff_eq!(calculate_player_ranking_contribution(1, config), 1.459827968, epsilon = 1e-12);
        assert_eq!(calculate_player_ranking_contribution(5000, config), 0.0);
    }

    #[test]
    fn test_ranking_contribution_normalizes_low_rankings() {
        let config = get_default_config();

        assert_eq!(
            calculate_player_ranking_contribution(0, config),
            calculate_player_ranking_contribution(1, config)
        );
    }

    #[test]
    fn test_unranked_players_excluded_from_sum() {
        let config = get_default_config();
        let with_unranked = ranked(&[1, 0, 0, -4]);
        let only_ranked = ranked(&[1]);

        assert_eq!(
            calculate_ranking_tva(&with_unranked, config),
            calculate_ranking_tva(&only_ranked, config)
        );
    }

    #[test]
    fn test_best_rankings_selected() {
        let mut config = get_default_config().clone();
        config.tva.ranking.max_players_considered = 2;

        let players = ranked(&[50, 1, 3, 2]);
        let expected = calculate_player_ranking_contribution(1, &config)
            + calculate_player_ranking_contribution(2, &config);

        assert_abs_diff_eq!(calculate_ranking_tva(&players, &config), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_total_is_sum_of_independent_caps() {
        let config = get_default_config();
        let players: Vec<Player> = (1..=100)
            .map(|i| generate_player(&format!("p{}", i), 2000.0, i, true))
            .collect();

        let tva = calculate_tva(&players, config);
        assert_abs_diff_eq!(tva.rating, 25.0, epsilon = 1e-9);
        assert!(tva.ranking <= 50.0);
        assert_abs_diff_eq!(tva.total, tva.rating + tva.ranking);
    }
}
