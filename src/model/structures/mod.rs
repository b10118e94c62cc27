pub mod event_booster_type;
pub mod player;
pub mod player_event;
pub mod player_profile;
pub mod rating;
pub mod tgp_config;
pub mod tournament;
pub mod tournament_value;
