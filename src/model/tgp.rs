use serde::{Deserialize, Serialize};

use crate::model::{
    config::OpprConfig,
    structures::tgp_config::{FinalsFormat, FlipFrenzyFormat, QualifyingType, TgpConfig}
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TgpBreakdown {
    pub qualifying: f64,
    pub finals: f64,
    /// Capped sum of qualifying and finals
    pub total: f64
}

/// Tournament Grading Percentage of a standard format.
pub fn calculate_tgp(tgp: &TgpConfig, config: &OpprConfig) -> f64 {
    calculate_tgp_breakdown(tgp, config).total
}

pub fn calculate_tgp_breakdown(tgp: &TgpConfig, config: &OpprConfig) -> TgpBreakdown {
    let qualifying = calculate_qualifying_tgp(tgp, config);
    let finals = calculate_finals_tgp(tgp, config);

    TgpBreakdown {
        qualifying,
        finals,
        total: (qualifying + finals).min(tgp_cap(tgp, config))
    }
}

/// Unlimited-card qualifying: once the qualifying window reaches MIN_HOURS_FOR_MULTIPLIER the
/// unlimited and hybrid best-game multipliers are replaced by UNLIMITED_CARD. Below that window,
/// and for limited qualifying, the standard rules apply. Time bonus and caps match the standard
/// rules.
pub fn calculate_unlimited_card_tgp(tgp: &TgpConfig, config: &OpprConfig) -> f64 {
    let qualifying = qualifying_tgp(tgp, Some(config.tgp.multipliers.unlimited_card), config);

    (qualifying + calculate_finals_tgp(tgp, config)).min(tgp_cap(tgp, config))
}

/// Flip Frenzy events grade by average matches played per player: three-ball matches count
/// half a meaningful game, one-ball matches a third.
pub fn calculate_flip_frenzy_tgp(average_matches: f64, format: FlipFrenzyFormat, config: &OpprConfig) -> f64 {
    let divisor = match format {
        FlipFrenzyFormat::ThreeBall => config.tgp.flip_frenzy.three_ball_divisor,
        FlipFrenzyFormat::OneBall => config.tgp.flip_frenzy.one_ball_divisor
    };

    if divisor <= 0.0 || average_matches <= 0.0 {
        return 0.0;
    }

    let meaningful_games = average_matches / divisor;

    (meaningful_games * config.tgp.base_game_value).min(config.tgp.max_without_finals)
}

pub fn calculate_qualifying_tgp(tgp: &TgpConfig, config: &OpprConfig) -> f64 {
    qualifying_tgp(tgp, None, config)
}

pub fn calculate_finals_tgp(tgp: &TgpConfig, config: &OpprConfig) -> f64 {
    let finals = &tgp.finals;
    if finals.format_type == FinalsFormat::None {
        return 0.0;
    }

    let game_value = config.tgp.base_game_value
        * group_multiplier(
            finals.four_player_groups,
            finals.three_player_groups,
            finals.multi_matchplay,
            config
        );

    finals.meaningful_games * game_value * tgp.ball_count_adjustment
}

/// Unlimited qualifying bonus: PERCENT_PER_HOUR for every hour, up to MAX_BONUS.
pub fn calculate_time_bonus(hours: f64, config: &OpprConfig) -> f64 {
    let constants = &config.tgp.unlimited_qualifying;

    (hours.max(0.0) * constants.percent_per_hour).min(constants.max_bonus)
}

/// A finalist share outside [MIN_FINALISTS_PERCENT, MAX_FINALISTS_PERCENT] does not count as a
/// valid finals format.
pub fn validate_finals_eligibility(total_players: usize, finalist_count: usize, config: &OpprConfig) -> bool {
    if total_players == 0 {
        return false;
    }

    let fraction = finalist_count as f64 / total_players as f64;

    fraction >= config.tgp.min_finalists_percent && fraction <= config.tgp.max_finalists_percent
}

pub fn has_valid_qualifying(tgp: &TgpConfig) -> bool {
    tgp.qualifying.qualifying_type != QualifyingType::None && tgp.qualifying.meaningful_games > 0.0
}

pub fn has_valid_finals(tgp: &TgpConfig) -> bool {
    tgp.finals.format_type != FinalsFormat::None && tgp.finals.meaningful_games > 0.0
}

/// `long_window_multiplier` replaces the unlimited and hybrid format multipliers once the
/// qualifying window is long enough.
fn qualifying_tgp(tgp: &TgpConfig, long_window_multiplier: Option<f64>, config: &OpprConfig) -> f64 {
    let qualifying = &tgp.qualifying;
    let hours = qualifying.hours.unwrap_or(0.0);
    let multipliers = &config.tgp.multipliers;
    let long_window = hours >= config.tgp.unlimited_qualifying.min_hours_for_multiplier;
    let override_multiplier = long_window_multiplier.filter(|_| long_window);

    match qualifying.qualifying_type {
        QualifyingType::None => 0.0,
        QualifyingType::Limited => qualifying_games_value(tgp, 1.0, config),
        QualifyingType::Hybrid => {
            let multiplier = override_multiplier.unwrap_or(multipliers.hybrid_best_game);

            qualifying_games_value(tgp, multiplier, config)
        }
        QualifyingType::Unlimited => {
            let multiplier = match override_multiplier {
                Some(multiplier) => multiplier,
                None if long_window => multipliers.unlimited_best_game,
                None => 1.0
            };

            qualifying_games_value(tgp, multiplier, config) + calculate_time_bonus(hours, config)
        }
    }
}

fn qualifying_games_value(tgp: &TgpConfig, format_multiplier: f64, config: &OpprConfig) -> f64 {
    let qualifying = &tgp.qualifying;
    let game_value = config.tgp.base_game_value
        * format_multiplier
        * group_multiplier(
            qualifying.four_player_groups,
            qualifying.three_player_groups,
            qualifying.multi_matchplay,
            config
        );

    qualifying.meaningful_games * game_value * tgp.ball_count_adjustment
}

fn group_multiplier(four_player_groups: bool, three_player_groups: bool, multi_matchplay: bool, config: &OpprConfig) -> f64 {
    if multi_matchplay {
        return 1.0;
    }

    if four_player_groups {
        config.tgp.multipliers.four_player_groups
    } else if three_player_groups {
        config.tgp.multipliers.three_player_groups
    } else {
        1.0
    }
}

fn tgp_cap(tgp: &TgpConfig, config: &OpprConfig) -> f64 {
    if has_valid_qualifying(tgp) {
        config.tgp.max_with_finals
    } else {
        config.tgp.max_without_finals
    }
}
