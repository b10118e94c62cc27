use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDate};
use thiserror::Error;

use crate::model::{
    base_value::is_rated_player,
    config::OpprConfig,
    structures::{
        player::Player,
        tgp_config::TgpConfig,
        tournament::{PlayerResult, Tournament}
    }
};

/// The single failure kind of the engine. Each variant is one category of broken invariant and
/// renders a human-readable message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{entity} id is required")]
    MissingId { entity: &'static str },

    #[error("Tournament name is required")]
    MissingName,

    #[error("Invalid date: '{0}'")]
    InvalidDate(String),

    #[error("Date {date} is in the future (reference date {reference})")]
    FutureDate { date: String, reference: String },

    #[error("Tournament must have at least one player")]
    NoPlayers,

    #[error("Tournament must have at least {min} players (got {actual})")]
    TooFewPlayers { min: usize, actual: usize },

    #[error("{field} must be a non-negative number (got {value})")]
    NegativeValue { field: String, value: f64 },

    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange { field: String, value: f64, min: f64, max: f64 },

    #[error("Duplicate player id: {0}")]
    DuplicatePlayer(String),

    #[error("Games per machine must not exceed {max} (got {actual})")]
    TooManyGamesPerMachine { max: f64, actual: f64 },

    #[error("No player results provided")]
    NoResults,

    #[error("Player {player_id} has invalid position {position} (positions start at 1)")]
    InvalidPosition { player_id: String, position: u32 },

    #[error("Exactly one player must finish in first place (found {found})")]
    FirstPlace { found: usize },

    #[error("Player {0} opted out but the tournament does not allow opt-out")]
    OptOutNotAllowed(String),

    #[error("Player {player_id} has isRated={is_rated} but {event_count} events (rated from {threshold})")]
    RatedStatusMismatch { player_id: String, is_rated: bool, event_count: u32, threshold: u32 },

    #[error("Player {0} has a result but is not registered in the tournament")]
    UnknownResultPlayer(String)
}

/// Checks a tournament before it is valued.
///
/// Rules run in a fixed order and the first failure is returned:
/// 1. id and name are present
/// 2. the player list is well formed ([`validate_players`])
/// 3. every rated flag agrees with the event count ([`validate_rated_status`])
/// 4. the field is large enough ([`validate_minimum_players`])
/// 5. the format description is sane ([`validate_tgp_config`])
///
/// The date is a typed `DateTime`, so a constructed tournament always holds a real calendar
/// date. String input is checked at the boundary with [`parse_date`].
pub fn validate_tournament(tournament: &Tournament, config: &OpprConfig) -> Result<(), ValidationError> {
    if tournament.id.trim().is_empty() {
        return Err(ValidationError::MissingId { entity: "Tournament" });
    }

    if tournament.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }

    validate_players(&tournament.players)?;
    validate_rated_status(&tournament.players, config)?;
    validate_minimum_players(tournament.players.len(), config)?;
    validate_tgp_config(&tournament.tgp_config, config)
}

pub fn validate_players(players: &[Player]) -> Result<(), ValidationError> {
    if players.is_empty() {
        return Err(ValidationError::NoPlayers);
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(players.len());
    for player in players {
        if player.id.trim().is_empty() {
            return Err(ValidationError::MissingId { entity: "Player" });
        }

        for (system, rating) in &player.ratings {
            ensure_non_negative(&format!("Player {} rating ({})", player.id, system), rating.value)?;
        }

        if player.ranking < 0 {
            return Err(ValidationError::NegativeValue {
                field: format!("Player {} ranking", player.id),
                value: player.ranking as f64
            });
        }

        if !seen.insert(player.id.as_str()) {
            return Err(ValidationError::DuplicatePlayer(player.id.clone()));
        }
    }

    Ok(())
}

/// `is_rated` must hold exactly when `event_count` reaches RATED_PLAYER_THRESHOLD.
pub fn validate_rated_status(players: &[Player], config: &OpprConfig) -> Result<(), ValidationError> {
    match players
        .iter()
        .find(|p| p.is_rated != is_rated_player(p.event_count, config))
    {
        Some(p) => Err(ValidationError::RatedStatusMismatch {
            player_id: p.id.clone(),
            is_rated: p.is_rated,
            event_count: p.event_count,
            threshold: config.base_value.rated_player_threshold
        }),
        None => Ok(())
    }
}

pub fn validate_minimum_players(count: usize, config: &OpprConfig) -> Result<(), ValidationError> {
    let min = config.validation.min_players;
    if count < min {
        return Err(ValidationError::TooFewPlayers { min, actual: count });
    }

    Ok(())
}

pub fn validate_tgp_config(tgp: &TgpConfig, config: &OpprConfig) -> Result<(), ValidationError> {
    let qualifying = &tgp.qualifying;
    ensure_non_negative("Qualifying meaningful games", qualifying.meaningful_games)?;
    if let Some(hours) = qualifying.hours {
        ensure_non_negative("Qualifying hours", hours)?;
    }

    ensure_non_negative("Finals meaningful games", tgp.finals.meaningful_games)?;
    validate_percentage(tgp.ball_count_adjustment, "Ball count adjustment")?;

    if let Some(machines) = qualifying.machine_count.filter(|m| *m > 0) {
        let games_per_machine = qualifying.meaningful_games / machines as f64;
        let max = config.validation.max_games_per_machine;
        if games_per_machine > max {
            return Err(ValidationError::TooManyGamesPerMachine {
                max,
                actual: games_per_machine
            });
        }
    }

    Ok(())
}

/// Checks a set of standings: positions start at 1, player ids are unique and exactly one
/// player holds first place. Ties are allowed at every other position.
pub fn validate_player_results(results: &[PlayerResult]) -> Result<(), ValidationError> {
    if results.is_empty() {
        return Err(ValidationError::NoResults);
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(results.len());
    for result in results {
        if result.player.id.trim().is_empty() {
            return Err(ValidationError::MissingId { entity: "Player" });
        }

        if result.position < 1 {
            return Err(ValidationError::InvalidPosition {
                player_id: result.player.id.clone(),
                position: result.position
            });
        }

        if !seen.insert(result.player.id.as_str()) {
            return Err(ValidationError::DuplicatePlayer(result.player.id.clone()));
        }
    }

    let winners = results.iter().filter(|r| r.position == 1).count();
    if winners != 1 {
        return Err(ValidationError::FirstPlace { found: winners });
    }

    Ok(())
}

/// Every result must belong to a registered player, and results may only carry opt-outs when
/// the tournament allows them.
pub fn validate_results_against_tournament(
    tournament: &Tournament,
    results: &[PlayerResult]
) -> Result<(), ValidationError> {
    let registered: HashSet<&str> = tournament.players.iter().map(|p| p.id.as_str()).collect();
    if let Some(r) = results.iter().find(|r| !registered.contains(r.player.id.as_str())) {
        return Err(ValidationError::UnknownResultPlayer(r.player.id.clone()));
    }

    if tournament.allows_opt_out {
        return Ok(());
    }

    match results.iter().find(|r| r.opted_out) {
        Some(r) => Err(ValidationError::OptOutNotAllowed(r.player.id.clone())),
        None => Ok(())
    }
}

/// The finalist share of the field must lie in
/// `[MIN_PARTICIPATION_PERCENT * 0.2, MIN_PARTICIPATION_PERCENT]`.
pub fn validate_finals_requirements(
    total_players: usize,
    finalist_count: usize,
    config: &OpprConfig
) -> Result<(), ValidationError> {
    if total_players == 0 {
        return Err(ValidationError::NoPlayers);
    }

    let max = config.validation.min_participation_percent;
    let min = max * 0.2;
    let fraction = finalist_count as f64 / total_players as f64;

    if fraction < min || fraction > max {
        return Err(ValidationError::OutOfRange {
            field: "Finalist percentage".to_string(),
            value: fraction,
            min,
            max
        });
    }

    Ok(())
}

pub fn validate_date_not_future(
    date: DateTime<FixedOffset>,
    reference: DateTime<FixedOffset>
) -> Result<(), ValidationError> {
    if date > reference {
        return Err(ValidationError::FutureDate {
            date: date.to_rfc3339(),
            reference: reference.to_rfc3339()
        });
    }

    Ok(())
}

/// Range guard for fractional percentages, which must lie in `[0, 1]`.
pub fn validate_percentage(value: f64, field: &str) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min: 0.0,
            max: 1.0
        });
    }

    Ok(())
}

/// Parses an RFC 3339 timestamp or a `YYYY-MM-DD` calendar date. Calendar dates are taken as
/// midnight UTC.
pub fn parse_date(input: &str) -> Result<DateTime<FixedOffset>, ValidationError> {
    let trimmed = input.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().fixed_offset())
        .ok_or_else(|| ValidationError::InvalidDate(input.to_string()))
}

fn ensure_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    // NaN fails this comparison as well
    if !(value >= 0.0 && value.is_finite()) {
        return Err(ValidationError::NegativeValue {
            field: field.to_string(),
            value
        });
    }

    Ok(())
}
