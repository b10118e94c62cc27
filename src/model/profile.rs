use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use itertools::Itertools;
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

use crate::model::{
    config::OpprConfig,
    decay::recalculate_time_decay,
    efficiency::calculate_event_efficiency,
    structures::{player_event::PlayerEvent, player_profile::PlayerProfile}
};

/// Rolls a player's history up into ranking totals.
///
/// Only the TOP_EVENTS_COUNT active events with the most decayed points count toward
/// `total_points` and `efficiency`. Events are expected to carry up-to-date decay fields
/// (see [`recalculate_time_decay`]). The profile's `ranking` is left at 0.
pub fn build_player_profile(player_id: &str, events: &[PlayerEvent], config: &OpprConfig) -> PlayerProfile {
    let active: Vec<&PlayerEvent> = events.iter().filter(|e| e.is_active()).collect();
    let counted: Vec<&PlayerEvent> = active
        .iter()
        .copied()
        .sorted_by(|a, b| b.decayed_points.partial_cmp(&a.decayed_points).unwrap_or(Ordering::Equal))
        .take(config.ranking.top_events_count)
        .collect();

    let total_points: f64 = counted.iter().map(|e| e.decayed_points).sum();
    let available: f64 = counted.iter().map(|e| e.first_place_value).sum();

    PlayerProfile {
        player_id: player_id.to_string(),
        total_points,
        efficiency: calculate_event_efficiency(total_points, available),
        event_count: events.len(),
        active_event_count: active.len(),
        counted_event_count: counted.len(),
        ranking: 0
    }
}

/// Assigns ranking positions 1..n by total points, highest first. Equal totals are ordered by
/// player id so every position is used exactly once.
///
/// # Notes
/// Sorts the slice into ranking order
pub fn rank_profiles(profiles: &mut [PlayerProfile]) {
    profiles.sort_by(|x, y| {
        y.total_points
            .partial_cmp(&x.total_points)
            .unwrap_or(Ordering::Equal)
            .then_with(|| x.player_id.cmp(&y.player_id))
    });

    for (i, profile) in profiles.iter_mut().enumerate() {
        profile.ranking = i as u32 + 1;
    }
}

/// Re-decays every player's history against `reference_date`, rebuilds the profiles and
/// ranks them. Output is in ranking order.
pub fn recalculate_profiles(
    histories: &IndexMap<String, Vec<PlayerEvent>>,
    reference_date: DateTime<FixedOffset>,
    config: &OpprConfig
) -> Vec<PlayerProfile> {
    let entries: Vec<(&String, &Vec<PlayerEvent>)> = histories.iter().collect();

    let mut profiles: Vec<PlayerProfile> = entries
        .par_iter()
        .map(|(player_id, events)| {
            let decayed = recalculate_time_decay(events, reference_date, config);
            build_player_profile(player_id, &decayed, config)
        })
        .collect();

    rank_profiles(&mut profiles);

    debug!("Rebuilt {} player profiles as of {}", profiles.len(), reference_date);

    profiles
}
