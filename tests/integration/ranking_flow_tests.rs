use approx::assert_abs_diff_eq;
use chrono::Duration;
use indexmap::IndexMap;
use oppr_engine::{
    model::{
        config::get_default_config,
        decay::recalculate_time_decay,
        efficiency::{analyze_efficiency_trend, get_efficiency_stats},
        profile::recalculate_profiles,
        rating::{apply_rd_decay, initial_rating, is_provisional, update_tournament_ratings},
        structures::{
            player::Player,
            player_event::PlayerEvent,
            player_profile::EfficiencyTrend,
            rating::{RatedStanding, Rating}
        },
        tournament_value::calculate_tournament_points
    },
    utils::test_utils::{generate_date, generate_players, generate_results, generate_tournament, standard_tgp_config}
};

use crate::common::init_test_env;

/// Plays a season of `events` tournaments, one every 30 days from `start`, with the finishing
/// order rotated each time, and returns every player's history.
fn play_season(players: &[Player], events: usize, start_offset_days: i64) -> IndexMap<String, Vec<PlayerEvent>> {
    let config = get_default_config();
    let start = generate_date(2023, 1, 1) + Duration::days(start_offset_days);
    let mut histories: IndexMap<String, Vec<PlayerEvent>> =
        players.iter().map(|p| (p.id.clone(), Vec::new())).collect();

    for round in 0..events {
        let mut field = players.to_vec();
        field.rotate_left(round % players.len());

        let mut tournament = generate_tournament(&format!("t{}", round), field.clone(), standard_tgp_config());
        tournament.date = start + Duration::days(30 * round as i64);

        let points = calculate_tournament_points(&tournament, &generate_results(&field), config).unwrap();

        for d in points.distributions {
            if let Some(history) = histories.get_mut(&d.player_id) {
                history.push(PlayerEvent::new(
                    tournament.id.clone(),
                    tournament.date,
                    d.position,
                    d.total_points,
                    points.value.first_place_value
                ));
            }
        }
    }

    histories
}

#[test]
fn test_season_profiles_are_ranked() {
    init_test_env();
    let players = generate_players(12);
    let histories = play_season(&players, 8, 0);
    let reference_date = generate_date(2024, 1, 1);

    let profiles = recalculate_profiles(&histories, reference_date, get_default_config());

    assert_eq!(profiles.len(), 12);
    for (i, profile) in profiles.iter().enumerate() {
        assert_eq!(profile.ranking, i as u32 + 1);
        assert_eq!(profile.event_count, 8);
        assert!(profile.efficiency > 0.0 && profile.efficiency <= 100.0);
    }
    for pair in profiles.windows(2) {
        assert!(pair[0].total_points >= pair[1].total_points);
    }
}

#[test]
fn test_profiles_follow_reference_date() {
    init_test_env();
    let config = get_default_config();
    let players = generate_players(8);
    let histories = play_season(&players, 6, 0);

    let fresh = recalculate_profiles(&histories, generate_date(2023, 7, 1), config);
    let aged = recalculate_profiles(&histories, generate_date(2024, 9, 1), config);
    let expired = recalculate_profiles(&histories, generate_date(2030, 1, 1), config);

    let fresh_total: f64 = fresh.iter().map(|p| p.total_points).sum();
    let aged_total: f64 = aged.iter().map(|p| p.total_points).sum();

    assert!(aged_total < fresh_total);
    assert!(expired.iter().all(|p| p.total_points == 0.0 && p.active_event_count == 0));
}

#[test]
fn test_recalculation_reaches_fixed_point() {
    init_test_env();
    let config = get_default_config();
    let players = generate_players(6);
    let histories = play_season(&players, 10, 0);
    let reference_date = generate_date(2024, 6, 1);

    for events in histories.values() {
        let once = recalculate_time_decay(events, reference_date, config);
        let twice = recalculate_time_decay(&once, reference_date, config);
        assert_eq!(once, twice);
    }

    assert_eq!(
        recalculate_profiles(&histories, reference_date, config),
        recalculate_profiles(&histories, reference_date, config)
    );
}

#[test]
fn test_efficiency_over_season() {
    init_test_env();
    let config = get_default_config();
    let players = generate_players(10);
    let histories = play_season(&players, 10, 0);
    let reference_date = generate_date(2023, 12, 1);

    for events in histories.values() {
        let decayed = recalculate_time_decay(events, reference_date, config);
        let stats = get_efficiency_stats(&decayed, config);

        assert!(stats.worst <= stats.median && stats.median <= stats.best);
        assert!(stats.worst <= stats.average && stats.average <= stats.best);
        assert!(stats.best <= 100.0 + 1e-9);
    }
}

#[test]
fn test_consistent_winner_trend_is_stable() {
    init_test_env();
    let config = get_default_config();
    let start = generate_date(2024, 1, 1);
    let events: Vec<PlayerEvent> = (0..15)
        .map(|i| PlayerEvent::new(format!("t{}", i), start + Duration::days(i * 14), 1, 42.0, 42.0))
        .collect();

    let analysis = analyze_efficiency_trend(&events, config);

    assert_eq!(analysis.trend, EfficiencyTrend::Stable);
    assert_abs_diff_eq!(analysis.recent_efficiency, 100.0);
    assert_abs_diff_eq!(analysis.difference, 0.0);
}

#[test]
fn test_rating_updates_after_tournament() {
    init_test_env();
    let config = get_default_config();
    let mut players = generate_players(40);
    let standings: Vec<RatedStanding> = players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let rating = p.ratings.get("glicko").copied().unwrap_or_else(|| initial_rating(config));
            RatedStanding::new(p.id.clone(), i as u32 + 1, rating.value, rating.deviation)
        })
        .collect();

    let updates = update_tournament_ratings(&standings, config);
    for (player, (player_id, result)) in players.iter_mut().zip(&updates) {
        assert_eq!(&player.id, player_id);
        assert!(result.new_rd >= config.rating.min_rd && result.new_rd <= config.rating.max_rd);
        player.ratings.insert("glicko".to_string(), Rating::new(result.new_rating, result.new_rd));
    }

    // Winner beats everyone in range, last place loses to everyone in range
    assert!(updates[0].1.new_rating > standings[0].rating);
    assert!(updates[39].1.new_rating < standings[39].rating);
    assert_eq!(players[0].primary_rating(), Some(updates[0].1.new_rating));
}

#[test]
fn test_new_player_lifecycle() {
    init_test_env();
    let config = get_default_config();
    let rating = initial_rating(config);

    assert_eq!(rating, Rating::new(1300.0, 200.0));
    assert!(is_provisional(0, config));
    assert_eq!(apply_rd_decay(rating.deviation, 365, config), 200.0);
    assert_abs_diff_eq!(apply_rd_decay(60.0, 100, config), 90.0, epsilon = 1e-12);
}
