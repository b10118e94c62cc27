use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{
    base_value::{calculate_base_value, count_rated_players},
    config::OpprConfig,
    event_booster::get_event_booster_multiplier,
    point_distribution::distribute_points,
    structures::{
        player::Player,
        tournament::{PlayerResult, Tournament},
        tournament_value::{PointDistribution, TournamentValue}
    },
    tgp::calculate_tgp,
    tva::calculate_tva,
    validation::{validate_player_results, validate_results_against_tournament, validate_tournament, ValidationError}
};

/// A valued tournament together with the points every non-opted-out finisher earned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentPoints {
    pub value: TournamentValue,
    pub distributions: Vec<PointDistribution>
}

/// `(base_value + total_tva) * tgp * event_booster_multiplier`
///
/// TVA is added before the TGP scales the sum, and the booster is applied last.
pub fn calculate_first_place_value(base_value: f64, total_tva: f64, tgp: f64, event_booster_multiplier: f64) -> f64 {
    (base_value + total_tva) * tgp * event_booster_multiplier
}

/// Validates `tournament` and computes every component of its value.
pub fn calculate_tournament_value(tournament: &Tournament, config: &OpprConfig) -> Result<TournamentValue, ValidationError> {
    validate_tournament(tournament, config)?;

    let value = assemble_value(tournament, &tournament.players, config);

    debug!(
        "Tournament {} valued at {:.4} (base {:.2}, tva {:.4}, tgp {:.4}, booster {})",
        tournament.id,
        value.first_place_value,
        value.base_value,
        value.total_tva,
        value.tgp,
        tournament.event_booster
    );

    Ok(value)
}

/// Values a tournament and distributes its first place value over `results`.
///
/// The tournament and the results are validated first. Field strength (base value and TVA)
/// and the rated player count used by the dynamic curve are taken from the players in the
/// result set.
pub fn calculate_tournament_points(
    tournament: &Tournament,
    results: &[PlayerResult],
    config: &OpprConfig
) -> Result<TournamentPoints, ValidationError> {
    validate_tournament(tournament, config)?;
    validate_player_results(results)?;
    validate_results_against_tournament(tournament, results)?;

    let players: Vec<Player> = results.iter().map(|r| r.player.clone()).collect();
    let value = assemble_value(tournament, &players, config);
    let rated_player_count = count_rated_players(&players);

    let distributions = distribute_points(results, rated_player_count, value.first_place_value, config);

    debug!(
        "Tournament {} distributed {:.4} points to {} of {} finishers",
        tournament.id,
        distributions.iter().map(|d| d.total_points).sum::<f64>(),
        distributions.len(),
        results.len()
    );

    Ok(TournamentPoints { value, distributions })
}

fn assemble_value(tournament: &Tournament, players: &[Player], config: &OpprConfig) -> TournamentValue {
    let base_value = calculate_base_value(players, config);
    let tva = calculate_tva(players, config);
    let tgp = calculate_tgp(&tournament.tgp_config, config);
    let event_booster_multiplier = get_event_booster_multiplier(tournament.event_booster, config);

    TournamentValue {
        base_value,
        tva_rating: tva.rating,
        tva_ranking: tva.ranking,
        total_tva: tva.total,
        tgp,
        event_booster_multiplier,
        first_place_value: calculate_first_place_value(base_value, tva.total, tgp, event_booster_multiplier)
    }
}
