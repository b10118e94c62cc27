use crate::model::{config::OpprConfig, structures::event_booster_type::EventBoosterType};

pub fn get_event_booster_multiplier(booster: EventBoosterType, config: &OpprConfig) -> f64 {
    let boosters = &config.event_boosters;

    match booster {
        EventBoosterType::None => boosters.none,
        EventBoosterType::Certified => boosters.certified,
        EventBoosterType::CertifiedPlus => boosters.certified_plus,
        EventBoosterType::ChampionshipSeries => boosters.championship_series,
        EventBoosterType::Major => boosters.major
    }
}

/// Derives the certification level an event earns from its format.
///
/// Only `Certified` and `CertifiedPlus` are derived here. `Major` and `ChampionshipSeries` are
/// manual designations and are never returned.
pub fn determine_event_booster(
    rated_player_count: u32,
    valid_qualifying: bool,
    valid_finals: bool,
    finalist_count: u32,
    duration_days: u32,
    config: &OpprConfig
) -> EventBoosterType {
    if !qualifies_for_certified(valid_qualifying, valid_finals, finalist_count, duration_days, config) {
        return EventBoosterType::None;
    }

    if rated_player_count >= config.event_boosters.certified_plus_min_rated_players {
        EventBoosterType::CertifiedPlus
    } else {
        EventBoosterType::Certified
    }
}

pub fn qualifies_for_certified(
    valid_qualifying: bool,
    valid_finals: bool,
    finalist_count: u32,
    duration_days: u32,
    config: &OpprConfig
) -> bool {
    let boosters = &config.event_boosters;

    valid_qualifying
        && valid_finals
        && finalist_count >= boosters.certified_min_finalists
        && duration_days <= boosters.certified_max_duration_days
}
