use std::{
    cmp::Ordering,
    f64::consts::{LN_10, PI}
};

use itertools::Itertools;
use tracing::debug;

use crate::model::{
    config::OpprConfig,
    structures::rating::{MatchResult, RatedStanding, Rating, RatingResult}
};

/// Glicko scaling constant, `ln(10) / 400`
pub const Q: f64 = LN_10 / 400.0;

/// Attenuation applied to an opponent's rating by their deviation
pub fn g(rd: f64) -> f64 {
    1.0 / (1.0 + 3.0 * Q * Q * rd * rd / (PI * PI)).sqrt()
}

/// Expected score of a player rated `rating` against an opponent (`opponent_rating`,
/// `opponent_rd`)
pub fn expected_score(rating: f64, opponent_rating: f64, opponent_rd: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf(-g(opponent_rd) * (rating - opponent_rating) / 400.0))
}

/// Rating of a player who has never played: DEFAULT_RATING at maximum deviation.
pub fn initial_rating(config: &OpprConfig) -> Rating {
    Rating::new(config.rating.default_rating, config.rating.max_rd)
}

pub fn is_provisional(event_count: u32, config: &OpprConfig) -> bool {
    event_count < config.rating.provisional_event_threshold
}

/// Turns one tournament's standings into head-to-head results for `player_id`.
///
/// Standings are ordered by position and the subject is matched against at most
/// OPPONENTS_RANGE players directly above and OPPONENTS_RANGE directly below. A better finish
/// than the opponent is a win, a worse one a loss and a shared position a tie.
///
/// Returns an empty list when `player_id` is not part of the standings.
pub fn simulate_tournament_matches(player_id: &str, all_results: &[RatedStanding], config: &OpprConfig) -> Vec<MatchResult> {
    let ordered: Vec<&RatedStanding> = all_results.iter().sorted_by_key(|s| s.position).collect();

    let Some(index) = ordered.iter().position(|s| s.player_id == player_id) else {
        return Vec::new();
    };

    let subject = ordered[index];
    let range = config.rating.opponents_range;
    let start = index.saturating_sub(range);
    let end = (index + range).min(ordered.len() - 1);

    (start..=end)
        .filter(|i| *i != index)
        .map(|i| {
            let opponent = ordered[i];
            let score = match subject.position.cmp(&opponent.position) {
                Ordering::Less => 1.0,
                Ordering::Equal => 0.5,
                Ordering::Greater => 0.0
            };

            MatchResult {
                opponent_rating: opponent.rating,
                opponent_rd: opponent.rd,
                score
            }
        })
        .collect()
}

/// One Glicko update over a rating period.
///
/// The new rating is rounded to two decimals and the new deviation is clamped to
/// [MIN_RD, MAX_RD]. With no results the rating and deviation are returned unchanged.
pub fn update_rating(rating: f64, rd: f64, results: &[MatchResult], config: &OpprConfig) -> RatingResult {
    if results.is_empty() {
        return RatingResult {
            new_rating: rating,
            new_rd: rd
        };
    }

    let (variance_sum, improvement_sum) = results.iter().fold((0.0, 0.0), |(variance, improvement), r| {
        let g_rd = g(r.opponent_rd);
        let e = expected_score(rating, r.opponent_rating, r.opponent_rd);

        (variance + g_rd * g_rd * e * (1.0 - e), improvement + g_rd * (r.score - e))
    });

    // Every opponent at an extreme rating gap leaves nothing to learn from
    if variance_sum <= 0.0 {
        return RatingResult {
            new_rating: rating,
            new_rd: rd
        };
    }

    let d_squared = 1.0 / (Q * Q * variance_sum);
    let precision = 1.0 / (rd * rd) + 1.0 / d_squared;

    let delta = Q / precision * improvement_sum;
    let new_rating = round_to_hundredths(rating + delta);
    let new_rd = (1.0 / precision)
        .sqrt()
        .max(config.rating.min_rd)
        .min(config.rating.max_rd);

    RatingResult { new_rating, new_rd }
}

/// Deviation grows by RD_DECAY_PER_DAY for every inactive day, up to MAX_RD.
pub fn apply_rd_decay(rd: f64, days_inactive: u32, config: &OpprConfig) -> f64 {
    (rd + days_inactive as f64 * config.rating.rd_decay_per_day).min(config.rating.max_rd)
}

/// Rates every player of one tournament against the pre-tournament snapshot in `standings`.
/// Results are returned in the order of `standings`.
pub fn update_tournament_ratings(standings: &[RatedStanding], config: &OpprConfig) -> Vec<(String, RatingResult)> {
    let updates: Vec<(String, RatingResult)> = standings
        .iter()
        .map(|standing| {
            let matches = simulate_tournament_matches(&standing.player_id, standings, config);
            let result = update_rating(standing.rating, standing.rd, &matches, config);

            (standing.player_id.clone(), result)
        })
        .collect();

    debug!("Updated ratings for {} players", updates.len());

    updates
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
