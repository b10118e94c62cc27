use itertools::Itertools;
use std::cmp::Ordering;

use crate::model::{
    config::OpprConfig,
    structures::{
        player_event::PlayerEvent,
        player_profile::{EfficiencyStats, EfficiencyTrend, TrendAnalysis}
    }
};

/// Points earned as a percentage of the event's first place value.
/// Returns 0 when the first place value is not positive.
pub fn calculate_event_efficiency(points_earned: f64, first_place_value: f64) -> f64 {
    if first_place_value <= 0.0 {
        return 0.0;
    }

    100.0 * points_earned / first_place_value
}

/// Σ total_points / Σ first_place_value over active events, as a percentage
pub fn calculate_overall_efficiency(events: &[PlayerEvent]) -> f64 {
    ratio_over_active(events, |e| e.total_points)
}

/// Same as [`calculate_overall_efficiency`] but from decayed points
pub fn calculate_decayed_efficiency(events: &[PlayerEvent]) -> f64 {
    ratio_over_active(events, |e| e.decayed_points)
}

/// Overall efficiency restricted to the `n` active events with the most points earned.
pub fn calculate_top_n_efficiency(events: &[PlayerEvent], n: usize) -> f64 {
    let top: Vec<PlayerEvent> = events
        .iter()
        .filter(|e| e.is_active())
        .sorted_by(|a, b| descending(a.total_points, b.total_points))
        .take(n)
        .cloned()
        .collect();

    calculate_overall_efficiency(&top)
}

/// Compares the most recent EFFICIENCY_RECENT_WINDOW active events (by date) against the
/// whole active history.
pub fn analyze_efficiency_trend(events: &[PlayerEvent], config: &OpprConfig) -> TrendAnalysis {
    let recent: Vec<PlayerEvent> = events
        .iter()
        .filter(|e| e.is_active())
        .sorted_by(|a, b| b.event_date.cmp(&a.event_date))
        .take(config.ranking.efficiency_recent_window)
        .cloned()
        .collect();

    let recent_efficiency = calculate_overall_efficiency(&recent);
    let overall_efficiency = calculate_overall_efficiency(events);
    let difference = recent_efficiency - overall_efficiency;
    let threshold = config.ranking.efficiency_trend_threshold;

    let trend = if difference > threshold {
        EfficiencyTrend::Improving
    } else if difference < -threshold {
        EfficiencyTrend::Declining
    } else {
        EfficiencyTrend::Stable
    };

    TrendAnalysis {
        trend,
        recent_efficiency,
        overall_efficiency,
        difference
    }
}

/// Summary statistics over the per-event efficiencies of all active events.
/// Everything is 0 when there are no active events.
pub fn get_efficiency_stats(events: &[PlayerEvent], config: &OpprConfig) -> EfficiencyStats {
    let efficiencies: Vec<f64> = events
        .iter()
        .filter(|e| e.is_active())
        .map(|e| calculate_event_efficiency(e.total_points, e.first_place_value))
        .sorted_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .collect();

    if efficiencies.is_empty() {
        return EfficiencyStats::default();
    }

    let count = efficiencies.len();
    let mid = count / 2;
    let median = if count % 2 == 0 {
        (efficiencies[mid - 1] + efficiencies[mid]) / 2.0
    } else {
        efficiencies[mid]
    };

    EfficiencyStats {
        overall: calculate_overall_efficiency(events),
        top_n: calculate_top_n_efficiency(events, config.ranking.top_events_count),
        best: efficiencies[count - 1],
        worst: efficiencies[0],
        average: efficiencies.iter().sum::<f64>() / count as f64,
        median
    }
}

fn ratio_over_active(events: &[PlayerEvent], points: impl Fn(&PlayerEvent) -> f64) -> f64 {
    let (earned, available) = events
        .iter()
        .filter(|e| e.is_active())
        .fold((0.0, 0.0), |(earned, available), e| (earned + points(e), available + e.first_place_value));

    if available == 0.0 {
        return 0.0;
    }

    calculate_event_efficiency(earned, available)
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
