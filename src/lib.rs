pub mod model;
pub mod utils;

pub use model::{
    config::{get_default_config, ConfigError, ConfigStore, OpprConfig},
    validation::ValidationError
};
