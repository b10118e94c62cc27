pub mod base_value;
pub mod config;
pub mod constants;
pub mod decay;
pub mod efficiency;
pub mod event_booster;
pub mod point_distribution;
pub mod profile;
pub mod rating;
pub mod structures;
pub mod tgp;
pub mod tournament_value;
pub mod tva;
pub mod validation;
