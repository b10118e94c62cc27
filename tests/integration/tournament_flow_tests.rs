use approx::assert_abs_diff_eq;
use oppr_engine::{
    model::{
        base_value::count_rated_players,
        config::get_default_config,
        event_booster::{determine_event_booster, get_event_booster_multiplier},
        point_distribution::calculate_points_for_position,
        structures::{
            event_booster_type::EventBoosterType,
            tgp_config::{FinalsConfig, FinalsFormat, QualifyingConfig, QualifyingType, TgpConfig},
            tournament::{PlayerResult, Tournament}
        },
        tgp::{calculate_tgp, has_valid_finals, has_valid_qualifying},
        tournament_value::{calculate_tournament_points, calculate_tournament_value},
        validation::{parse_date, ValidationError}
    },
    utils::test_utils::{generate_players, generate_results, generate_tournament, standard_tgp_config}
};
use serde_json::json;

use crate::common::init_test_env;

#[test]
fn test_full_tournament_flow() {
    init_test_env();
    let config = get_default_config();
    let players = generate_players(48);
    let rated = count_rated_players(&players);
    let tournament = generate_tournament("spring-open", players.clone(), standard_tgp_config());
    let results = generate_results(&players);

    let points = calculate_tournament_points(&tournament, &results, config).unwrap();

    assert_eq!(points.distributions.len(), 48);
    assert_abs_diff_eq!(points.value.tgp, 1.24, epsilon = 1e-9);
    assert_abs_diff_eq!(points.value.base_value, (rated as f64 * 0.5).min(32.0));
    assert!(points.value.tva_rating <= 25.0);
    assert!(points.value.tva_ranking <= 50.0);

    for d in &points.distributions {
        assert_eq!(d.total_points, d.linear_points + d.dynamic_points);
        let expected = calculate_points_for_position(d.position, 48, rated, points.value.first_place_value, config);
        assert_abs_diff_eq!(d.total_points, expected.total, epsilon = 1e-12);
    }

    let winner = &points.distributions[0];
    if rated >= 2 {
        assert_abs_diff_eq!(winner.total_points, points.value.first_place_value, epsilon = 1e-9);
    }
}

#[test]
fn test_value_matches_tournament_points_when_results_cover_field() {
    init_test_env();
    let config = get_default_config();
    let players = generate_players(24);
    let tournament = generate_tournament("t1", players.clone(), standard_tgp_config());

    let value = calculate_tournament_value(&tournament, config).unwrap();
    let points = calculate_tournament_points(&tournament, &generate_results(&players), config).unwrap();

    assert_eq!(value, points.value);
}

#[test]
fn test_opted_out_players_absent_from_distribution() {
    init_test_env();
    let config = get_default_config();
    let players = generate_players(20);
    let mut tournament = generate_tournament("t1", players.clone(), standard_tgp_config());
    tournament.allows_opt_out = true;

    let mut results = generate_results(&players);
    results[3] = results[3].clone().with_opt_out();
    results[7] = results[7].clone().with_opt_out();

    let points = calculate_tournament_points(&tournament, &results, config).unwrap();

    assert_eq!(points.distributions.len(), 18);
    assert!(points.distributions.iter().all(|d| d.player_id != "p4" && d.player_id != "p8"));
}

#[test]
fn test_certified_event_flow() {
    init_test_env();
    let config = get_default_config();
    let players = generate_players(160);
    let rated = count_rated_players(&players) as u32;
    let tgp = TgpConfig::new(
        QualifyingConfig::new(QualifyingType::Limited, 10.0),
        FinalsConfig::new(FinalsFormat::DoubleElimination, 10.0)
            .with_four_player_groups()
            .with_finalist_count(32)
    );

    let booster = determine_event_booster(
        rated,
        has_valid_qualifying(&tgp),
        has_valid_finals(&tgp),
        32,
        3,
        config
    );
    let expected = if rated >= 128 {
        EventBoosterType::CertifiedPlus
    } else {
        EventBoosterType::Certified
    };
    assert_eq!(booster, expected);

    let mut tournament = generate_tournament("state-champs", players.clone(), tgp.clone());
    tournament.event_booster = booster;
    let value = calculate_tournament_value(&tournament, config).unwrap();

    assert_abs_diff_eq!(
        value.first_place_value,
        (value.base_value + value.total_tva) * calculate_tgp(&tgp, config) * get_event_booster_multiplier(booster, config),
        epsilon = 1e-12
    );
}

#[test]
fn test_tournament_from_json() {
    init_test_env();
    let input = json!({
        "id": "league-night-12",
        "name": "League Night 12",
        "date": "2024-03-14T19:00:00-05:00",
        "players": [
            {"id": "alice", "ratings": {"glicko": {"value": 1710.0, "deviation": 45.0}}, "ranking": 120, "isRated": true, "eventCount": 40},
            {"id": "bob", "ratings": {"glicko": {"value": 1520.0, "deviation": 80.0}}, "ranking": 2400, "isRated": true, "eventCount": 12},
            {"id": "carol", "ranking": 0, "isRated": false, "eventCount": 1}
        ],
        "tgpConfig": {
            "qualifying": {"type": "unlimited", "meaningfulGames": 5, "hours": 24},
            "finals": {"formatType": "match-play", "meaningfulGames": 4}
        },
        "eventBooster": "certified"
    });

    let tournament: Tournament = serde_json::from_value(input).unwrap();

    assert_eq!(tournament.date, parse_date("2024-03-15T00:00:00Z").unwrap());
    assert!(!tournament.allows_opt_out);
    assert_eq!(tournament.tgp_config.ball_count_adjustment, 1.0);

    // Unlimited qualifying past 20 hours: 5 * 0.08 + 0.20 bonus, finals 4 * 0.04
    assert_abs_diff_eq!(
        calculate_tgp(&tournament.tgp_config, get_default_config()),
        0.76,
        epsilon = 1e-9
    );

    let value = calculate_tournament_value(&tournament, get_default_config()).unwrap();
    assert_abs_diff_eq!(value.base_value, 1.0);
    assert_eq!(value.event_booster_multiplier, 1.25);
}

#[test]
fn test_validation_errors_surface_from_assembly() {
    init_test_env();
    let config = get_default_config();
    let players = generate_players(5);
    let mut tournament = generate_tournament("t1", players.clone(), standard_tgp_config());

    tournament.name = "  ".to_string();
    assert_eq!(
        calculate_tournament_value(&tournament, config),
        Err(ValidationError::MissingName)
    );

    tournament.name = "Fixed".to_string();
    let results = vec![
        PlayerResult::new(players[0].clone(), 1),
        PlayerResult::new(players[1].clone(), 1),
        PlayerResult::new(players[2].clone(), 3),
    ];
    let err = calculate_tournament_points(&tournament, &results, config).unwrap_err();
    assert_eq!(err.to_string(), "Exactly one player must finish in first place (found 2)");
}

#[test]
fn test_bad_date_rejected_at_boundary() {
    init_test_env();

    assert!(matches!(parse_date("2024-02-30"), Err(ValidationError::InvalidDate(_))));
    assert!(parse_date("2024-02-29").is_ok());
}
