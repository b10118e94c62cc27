use chrono::{DateTime, FixedOffset};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{config::OpprConfig, constants::MILLISECONDS_PER_DAY, structures::player_event::PlayerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayResult {
    pub age_in_days: i64,
    pub decay_multiplier: f64,
    pub decayed_points: f64
}

/// # How this works
/// - Points are devalued by the age of the event they were earned at, measured against a
///   reference date (usually "now").
/// - Age is bucketed into whole years of DAYS_PER_YEAR days:
///   - [0, 1) years: YEAR_0_TO_1 (1.0)
///   - [1, 2) years: YEAR_1_TO_2 (0.75)
///   - [2, 3) years: YEAR_2_TO_3 (0.5)
///   - 3+ years: YEAR_3_PLUS (0.0)
/// - Lower bounds are inclusive: an event exactly 365 days old is already in the second tier.
///
/// The result only depends on its inputs, so re-running it with the same reference date always
/// reproduces the same numbers.
pub fn apply_time_decay(
    total_points: f64,
    event_date: DateTime<FixedOffset>,
    reference_date: DateTime<FixedOffset>,
    config: &OpprConfig
) -> DecayResult {
    let age_in_days = calculate_age_in_days(event_date, reference_date);
    let decay_multiplier = get_decay_multiplier(age_in_days, config);

    DecayResult {
        age_in_days,
        decay_multiplier,
        decayed_points: total_points * decay_multiplier
    }
}

/// Whole days elapsed between the event and the reference date, rounded down.
/// Events after the reference date produce a negative age.
pub fn calculate_age_in_days(event_date: DateTime<FixedOffset>, reference_date: DateTime<FixedOffset>) -> i64 {
    (reference_date - event_date)
        .num_milliseconds()
        .div_euclid(MILLISECONDS_PER_DAY)
}

pub fn calculate_age_in_years(age_in_days: i64, config: &OpprConfig) -> f64 {
    age_in_days as f64 / config.time_decay.days_per_year
}

pub fn get_decay_multiplier(age_in_days: i64, config: &OpprConfig) -> f64 {
    let tiers = &config.time_decay;
    let years = calculate_age_in_years(age_in_days, config);

    if years < 1.0 {
        tiers.year_0_to_1
    } else if years < 2.0 {
        tiers.year_1_to_2
    } else if years < 3.0 {
        tiers.year_2_to_3
    } else {
        tiers.year_3_plus
    }
}

/// Events whose multiplier has reached 0 no longer count toward rankings.
pub fn is_event_active(age_in_days: i64, config: &OpprConfig) -> bool {
    get_decay_multiplier(age_in_days, config) > 0.0
}

/// Returns a copy of `event` with its decay fields recomputed for `reference_date`.
pub fn decay_event(event: &PlayerEvent, reference_date: DateTime<FixedOffset>, config: &OpprConfig) -> PlayerEvent {
    let result = apply_time_decay(event.total_points, event.event_date, reference_date, config);

    PlayerEvent {
        age_in_days: result.age_in_days,
        decay_multiplier: result.decay_multiplier,
        decayed_points: result.decayed_points,
        ..event.clone()
    }
}

/// Batch recalculation over a player's (or the whole system's) history.
///
/// Output order matches input order. Inactive events are kept with zero decayed points.
pub fn recalculate_time_decay(
    events: &[PlayerEvent],
    reference_date: DateTime<FixedOffset>,
    config: &OpprConfig
) -> Vec<PlayerEvent> {
    let recalculated: Vec<PlayerEvent> = events
        .par_iter()
        .map(|event| decay_event(event, reference_date, config))
        .collect();

    debug!(
        "Recalculated decay for {} events ({} active) as of {}",
        recalculated.len(),
        recalculated.iter().filter(|e| e.is_active()).count(),
        reference_date
    );

    recalculated
}
