use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::model::constants;

lazy_static! {
    static ref DEFAULT_CONFIG: OpprConfig = OpprConfig::default();
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration overrides must be a JSON object (got {0})")]
    NotAnObject(String),

    #[error("Invalid configuration override: {0}")]
    InvalidOverride(#[from] serde_json::Error),

    #[error("{field} bounds are inverted (min {min} > max {max})")]
    InvertedBounds { field: &'static str, min: f64, max: f64 }
}

/// The full constant tree every calculation reads from.
///
/// Serialized keys mirror the constant names (`BASE_VALUE.POINTS_PER_PLAYER`, ...) so that
/// partial overrides can be written as plain JSON records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct OpprConfig {
    pub base_value: BaseValueConstants,
    pub tva: TvaConstants,
    pub tgp: TgpConstants,
    pub event_boosters: EventBoosterConstants,
    pub point_distribution: PointDistributionConstants,
    pub time_decay: TimeDecayConstants,
    pub ranking: RankingConstants,
    pub rating: RatingConstants,
    pub validation: ValidationConstants
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct BaseValueConstants {
    pub points_per_player: f64,
    pub max_base_value: f64,
    pub rated_player_threshold: u32
}

impl Default for BaseValueConstants {
    fn default() -> Self {
        Self {
            points_per_player: constants::POINTS_PER_PLAYER,
            max_base_value: constants::MAX_BASE_VALUE,
            rated_player_threshold: constants::RATED_PLAYER_THRESHOLD
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct TvaConstants {
    pub rating: RatingTvaConstants,
    pub ranking: RankingTvaConstants
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct RatingTvaConstants {
    pub coefficient: f64,
    pub offset: f64,
    pub max_value: f64,
    pub perfect_rating: f64,
    pub max_players_considered: usize
}

impl Default for RatingTvaConstants {
    fn default() -> Self {
        Self {
            coefficient: constants::RATING_TVA_COEFFICIENT,
            offset: constants::RATING_TVA_OFFSET,
            max_value: constants::RATING_TVA_MAX_VALUE,
            perfect_rating: constants::PERFECT_RATING,
            max_players_considered: constants::TVA_MAX_PLAYERS_CONSIDERED
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct RankingTvaConstants {
    pub coefficient: f64,
    pub offset: f64,
    pub max_value: f64,
    pub max_players_considered: usize
}

impl Default for RankingTvaConstants {
    fn default() -> Self {
        Self {
            coefficient: constants::RANKING_TVA_COEFFICIENT,
            offset: constants::RANKING_TVA_OFFSET,
            max_value: constants::RANKING_TVA_MAX_VALUE,
            max_players_considered: constants::TVA_MAX_PLAYERS_CONSIDERED
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct TgpConstants {
    pub base_game_value: f64,
    pub max_without_finals: f64,
    pub max_with_finals: f64,
    pub min_finalists_percent: f64,
    pub max_finalists_percent: f64,
    pub multipliers: TgpMultipliers,
    pub unlimited_qualifying: UnlimitedQualifyingConstants,
    pub flip_frenzy: FlipFrenzyConstants
}

impl Default for TgpConstants {
    fn default() -> Self {
        Self {
            base_game_value: constants::BASE_GAME_VALUE,
            max_without_finals: constants::MAX_TGP_WITHOUT_FINALS,
            max_with_finals: constants::MAX_TGP_WITH_FINALS,
            min_finalists_percent: constants::MIN_FINALISTS_PERCENT,
            max_finalists_percent: constants::MAX_FINALISTS_PERCENT,
            multipliers: TgpMultipliers::default(),
            unlimited_qualifying: UnlimitedQualifyingConstants::default(),
            flip_frenzy: FlipFrenzyConstants::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct TgpMultipliers {
    pub four_player_groups: f64,
    pub three_player_groups: f64,
    pub unlimited_best_game: f64,
    pub hybrid_best_game: f64,
    pub unlimited_card: f64
}

impl Default for TgpMultipliers {
    fn default() -> Self {
        Self {
            four_player_groups: constants::FOUR_PLAYER_GROUP_MULTIPLIER,
            three_player_groups: constants::THREE_PLAYER_GROUP_MULTIPLIER,
            unlimited_best_game: constants::UNLIMITED_BEST_GAME_MULTIPLIER,
            hybrid_best_game: constants::HYBRID_BEST_GAME_MULTIPLIER,
            unlimited_card: constants::UNLIMITED_CARD_MULTIPLIER
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct UnlimitedQualifyingConstants {
    pub percent_per_hour: f64,
    pub max_bonus: f64,
    pub min_hours_for_multiplier: f64
}

impl Default for UnlimitedQualifyingConstants {
    fn default() -> Self {
        Self {
            percent_per_hour: constants::PERCENT_PER_HOUR,
            max_bonus: constants::MAX_TIME_BONUS,
            min_hours_for_multiplier: constants::MIN_HOURS_FOR_MULTIPLIER
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct FlipFrenzyConstants {
    pub three_ball_divisor: f64,
    pub one_ball_divisor: f64
}

impl Default for FlipFrenzyConstants {
    fn default() -> Self {
        Self {
            three_ball_divisor: constants::FLIP_FRENZY_THREE_BALL_DIVISOR,
            one_ball_divisor: constants::FLIP_FRENZY_ONE_BALL_DIVISOR
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct EventBoosterConstants {
    pub none: f64,
    pub certified: f64,
    pub certified_plus: f64,
    pub championship_series: f64,
    pub major: f64,
    pub certified_min_finalists: u32,
    pub certified_max_duration_days: u32,
    pub certified_plus_min_rated_players: u32
}

impl Default for EventBoosterConstants {
    fn default() -> Self {
        Self {
            none: constants::BOOSTER_NONE,
            certified: constants::BOOSTER_CERTIFIED,
            certified_plus: constants::BOOSTER_CERTIFIED_PLUS,
            championship_series: constants::BOOSTER_CHAMPIONSHIP_SERIES,
            major: constants::BOOSTER_MAJOR,
            certified_min_finalists: constants::CERTIFIED_MIN_FINALISTS,
            certified_max_duration_days: constants::CERTIFIED_MAX_DURATION_DAYS,
            certified_plus_min_rated_players: constants::CERTIFIED_PLUS_MIN_RATED_PLAYERS
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct PointDistributionConstants {
    pub linear_percentage: f64,
    pub dynamic_percentage: f64,
    pub position_exponent: f64,
    pub value_exponent: f64,
    pub max_dynamic_players: u32
}

impl Default for PointDistributionConstants {
    fn default() -> Self {
        Self {
            linear_percentage: constants::LINEAR_PERCENTAGE,
            dynamic_percentage: constants::DYNAMIC_PERCENTAGE,
            position_exponent: constants::POSITION_EXPONENT,
            value_exponent: constants::VALUE_EXPONENT,
            max_dynamic_players: constants::MAX_DYNAMIC_PLAYERS
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct TimeDecayConstants {
    pub year_0_to_1: f64,
    pub year_1_to_2: f64,
    pub year_2_to_3: f64,
    pub year_3_plus: f64,
    pub days_per_year: f64
}

impl Default for TimeDecayConstants {
    fn default() -> Self {
        Self {
            year_0_to_1: constants::DECAY_YEAR_0_TO_1,
            year_1_to_2: constants::DECAY_YEAR_1_TO_2,
            year_2_to_3: constants::DECAY_YEAR_2_TO_3,
            year_3_plus: constants::DECAY_YEAR_3_PLUS,
            days_per_year: constants::DAYS_PER_YEAR
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct RankingConstants {
    pub top_events_count: usize,
    pub efficiency_recent_window: usize,
    pub efficiency_trend_threshold: f64
}

impl Default for RankingConstants {
    fn default() -> Self {
        Self {
            top_events_count: constants::TOP_EVENTS_COUNT,
            efficiency_recent_window: constants::EFFICIENCY_RECENT_WINDOW,
            efficiency_trend_threshold: constants::EFFICIENCY_TREND_THRESHOLD
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct RatingConstants {
    pub default_rating: f64,
    pub min_rd: f64,
    pub max_rd: f64,
    pub rd_decay_per_day: f64,
    pub opponents_range: usize,
    pub provisional_event_threshold: u32
}

impl Default for RatingConstants {
    fn default() -> Self {
        Self {
            default_rating: constants::DEFAULT_RATING,
            min_rd: constants::MIN_RD,
            max_rd: constants::MAX_RD,
            rd_decay_per_day: constants::RD_DECAY_PER_DAY,
            opponents_range: constants::OPPONENTS_RANGE,
            provisional_event_threshold: constants::PROVISIONAL_EVENT_THRESHOLD
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct ValidationConstants {
    pub min_players: usize,
    pub max_games_per_machine: f64,
    pub min_participation_percent: f64
}

impl Default for ValidationConstants {
    fn default() -> Self {
        Self {
            min_players: constants::MIN_PLAYERS,
            max_games_per_machine: constants::MAX_GAMES_PER_MACHINE,
            min_participation_percent: constants::MIN_PARTICIPATION_PERCENT
        }
    }
}

/// Holds accumulated overrides and the merged config they produce.
///
/// The merged tree is rebuilt only when `configure` or `reset` is called; between those calls
/// `get_config` hands out the same `Arc`.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    overrides: Value,
    resolved: Arc<OpprConfig>
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> ConfigStore {
        ConfigStore {
            overrides: Value::Object(Map::new()),
            resolved: Arc::new(get_default_config().clone())
        }
    }

    /// Deep-merges `partial` into the accumulated overrides.
    ///
    /// The candidate tree is checked against the typed config before anything is stored, so a
    /// rejected override leaves the store exactly as it was.
    pub fn configure(&mut self, partial: Value) -> Result<(), ConfigError> {
        if !partial.is_object() {
            return Err(ConfigError::NotAnObject(partial.to_string()));
        }

        let mut candidate = self.overrides.clone();
        deep_merge(&mut candidate, &partial);

        let resolved = resolve_config(get_default_config(), &candidate)?;
        debug!("Configuration overrides applied: {}", partial);

        self.overrides = candidate;
        self.resolved = Arc::new(resolved);

        Ok(())
    }

    pub fn reset(&mut self) {
        self.overrides = Value::Object(Map::new());
        self.resolved = Arc::new(get_default_config().clone());
        debug!("Configuration overrides cleared");
    }

    pub fn get_config(&self) -> Arc<OpprConfig> {
        Arc::clone(&self.resolved)
    }

    pub fn overrides(&self) -> &Value {
        &self.overrides
    }
}

/// The immutable default tree. Never affected by [`ConfigStore::configure`].
pub fn get_default_config() -> &'static OpprConfig {
    &DEFAULT_CONFIG
}

/// Pure merge of `defaults` with a deep-partial `overrides` record.
pub fn resolve_config(defaults: &OpprConfig, overrides: &Value) -> Result<OpprConfig, ConfigError> {
    let mut tree = serde_json::to_value(defaults)?;
    deep_merge(&mut tree, overrides);

    let config: OpprConfig = serde_json::from_value(tree)?;
    check_bounds(&config)?;

    Ok(config)
}

fn check_bounds(config: &OpprConfig) -> Result<(), ConfigError> {
    let rating = &config.rating;
    if rating.min_rd > rating.max_rd {
        return Err(ConfigError::InvertedBounds {
            field: "RATING.MIN_RD/MAX_RD",
            min: rating.min_rd,
            max: rating.max_rd
        });
    }

    let tgp = &config.tgp;
    if tgp.min_finalists_percent > tgp.max_finalists_percent {
        return Err(ConfigError::InvertedBounds {
            field: "TGP.MIN_FINALISTS_PERCENT/MAX_FINALISTS_PERCENT",
            min: tgp.min_finalists_percent,
            max: tgp.max_finalists_percent
        });
    }

    Ok(())
}

/// Recursively merges `overlay` into `base`.
///
/// Objects merge key-wise; arrays and primitives in `overlay` replace the value in `base`
/// wholesale.
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone()
    }
}
