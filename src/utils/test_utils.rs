use crate::model::{
    constants::{DEFAULT_RATING_SYSTEM, MAX_RD, RATED_PLAYER_THRESHOLD},
    structures::{
        event_booster_type::EventBoosterType,
        player::Player,
        player_event::PlayerEvent,
        rating::Rating,
        tgp_config::{FinalsConfig, FinalsFormat, QualifyingConfig, QualifyingType, TgpConfig},
        tournament::{PlayerResult, Tournament}
    }
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::IndexMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A player rated under the default rating system. Rated players get an event count at the
/// rated threshold, unrated ones one below it.
pub fn generate_player(id: &str, rating: f64, ranking: i32, is_rated: bool) -> Player {
    let mut ratings = IndexMap::new();
    ratings.insert(DEFAULT_RATING_SYSTEM.to_string(), Rating::new(rating, 100.0));

    Player {
        id: id.to_string(),
        ratings,
        ranking,
        is_rated,
        event_count: if is_rated {
            RATED_PLAYER_THRESHOLD
        } else {
            RATED_PLAYER_THRESHOLD - 1
        }
    }
}

/// `n` rated players `p1..pn` at rating 1500 with rankings 1..n
pub fn generate_rated_players(n: usize) -> Vec<Player> {
    (1..=n)
        .map(|i| generate_player(&format!("p{}", i), 1500.0, i as i32, true))
        .collect()
}

/// `n` players with reproducible random ratings, rankings and rated flags
pub fn generate_players(n: usize) -> Vec<Player> {
    // Initialize seeded RNG for reproducible results
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    (1..=n)
        .map(|i| {
            let rating = rng.random_range(1100.0..2000.0);
            let ranking = if rng.random_bool(0.9) {
                rng.random_range(1..5000)
            } else {
                0
            };
            let deviation = rng.random_range(20.0..MAX_RD);
            let event_count = rng.random_range(0..40);

            Player::new(format!("p{}", i))
                .with_rating(rating, deviation)
                .with_ranking(ranking)
                .with_event_count(event_count)
                .rated(event_count >= RATED_PLAYER_THRESHOLD)
        })
        .collect()
}

/// Limited qualifying over 7 games plus match-play finals over 12 games in four-player groups
pub fn standard_tgp_config() -> TgpConfig {
    TgpConfig::new(
        QualifyingConfig::new(QualifyingType::Limited, 7.0),
        FinalsConfig::new(FinalsFormat::MatchPlay, 12.0).with_four_player_groups()
    )
}

/// A tournament dated 2024-06-01 with no booster and opt-out disallowed
pub fn generate_tournament(id: &str, players: Vec<Player>, tgp_config: TgpConfig) -> Tournament {
    Tournament {
        id: id.to_string(),
        name: format!("Tournament {}", id),
        date: generate_date(2024, 6, 1),
        players,
        tgp_config,
        event_booster: EventBoosterType::None,
        allows_opt_out: false
    }
}

/// Standings in input order: the first player wins, the last finishes last
pub fn generate_results(players: &[Player]) -> Vec<PlayerResult> {
    players
        .iter()
        .enumerate()
        .map(|(i, p)| PlayerResult::new(p.clone(), i as u32 + 1))
        .collect()
}

pub fn generate_player_event(
    tournament_id: &str,
    event_date: DateTime<FixedOffset>,
    position: u32,
    total_points: f64,
    first_place_value: f64
) -> PlayerEvent {
    PlayerEvent::new(tournament_id, event_date, position, total_points, first_place_value)
}

/// Midnight UTC on the given day
pub fn generate_date(year: i32, month: u32, day: u32) -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("Invalid fixture date")
        .and_utc()
        .fixed_offset()
}
