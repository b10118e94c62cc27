use approx::assert_abs_diff_eq;
use oppr_engine::{
    model::{
        base_value::calculate_base_value,
        decay::get_decay_multiplier,
        tournament_value::calculate_tournament_value
    },
    utils::test_utils::{generate_rated_players, generate_tournament, standard_tgp_config},
    get_default_config, ConfigError, ConfigStore
};
use serde_json::json;
use std::sync::Arc;

use crate::common::init_test_env;

#[test]
fn test_configure_then_reset_restores_defaults() {
    init_test_env();
    let mut store = ConfigStore::new();

    store
        .configure(json!({"BASE_VALUE": {"POINTS_PER_PLAYER": 1.0}, "TIME_DECAY": {"YEAR_1_TO_2": 0.8}}))
        .unwrap();
    assert_ne!(*store.get_config(), *get_default_config());

    store.reset();

    assert_eq!(*store.get_config(), *get_default_config());
}

#[test]
fn test_overrides_flow_into_calculations() {
    init_test_env();
    let mut store = ConfigStore::new();
    let tournament = generate_tournament("t1", generate_rated_players(20), standard_tgp_config());

    let before = calculate_tournament_value(&tournament, &store.get_config()).unwrap();
    store
        .configure(json!({"BASE_VALUE": {"POINTS_PER_PLAYER": 1.0, "MAX_BASE_VALUE": 15.0}}))
        .unwrap();
    let after = calculate_tournament_value(&tournament, &store.get_config()).unwrap();

    assert_abs_diff_eq!(before.base_value, 10.0);
    assert_abs_diff_eq!(after.base_value, 15.0);
    assert_eq!(before.tgp, after.tgp);
}

#[test]
fn test_overrides_accumulate() {
    init_test_env();
    let mut store = ConfigStore::new();

    store.configure(json!({"TIME_DECAY": {"YEAR_1_TO_2": 0.9}})).unwrap();
    store.configure(json!({"TIME_DECAY": {"YEAR_2_TO_3": 0.6}})).unwrap();
    let config = store.get_config();

    assert_eq!(get_decay_multiplier(400, &config), 0.9);
    assert_eq!(get_decay_multiplier(800, &config), 0.6);
    assert_eq!(get_decay_multiplier(100, &config), 1.0);
}

#[test]
fn test_rejected_override_keeps_previous_state() {
    init_test_env();
    let mut store = ConfigStore::new();
    store.configure(json!({"BASE_VALUE": {"POINTS_PER_PLAYER": 0.75}})).unwrap();
    let before = store.get_config();

    let unknown = store.configure(json!({"BASE_VALUE": {"POINTS_PER_PLAYR": 1.0}}));
    let wrong_type = store.configure(json!({"RATING": {"MIN_RD": "ten"}}));
    let not_object = store.configure(json!([1, 2, 3]));

    assert!(matches!(unknown, Err(ConfigError::InvalidOverride(_))));
    assert!(matches!(wrong_type, Err(ConfigError::InvalidOverride(_))));
    assert!(matches!(not_object, Err(ConfigError::NotAnObject(_))));
    assert!(Arc::ptr_eq(&before, &store.get_config()));
    assert_abs_diff_eq!(
        calculate_base_value(&generate_rated_players(4), &store.get_config()),
        3.0
    );
}

#[test]
fn test_inverted_bounds_rejected_before_rating() {
    init_test_env();
    let mut store = ConfigStore::new();

    let result = store.configure(json!({"RATING": {"MIN_RD": 300.0}}));

    assert!(matches!(result, Err(ConfigError::InvertedBounds { .. })));
    assert_eq!(*store.get_config(), *get_default_config());
}

#[test]
fn test_defaults_untouched_by_store() {
    init_test_env();
    let mut store = ConfigStore::new();

    store.configure(json!({"EVENT_BOOSTERS": {"MAJOR": 5.0}})).unwrap();

    assert_eq!(get_default_config().event_boosters.major, 2.0);
    assert_eq!(store.get_config().event_boosters.major, 5.0);
}
