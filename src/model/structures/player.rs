use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{
    constants::DEFAULT_RATING_SYSTEM,
    structures::rating::{get_primary_rating, Rating}
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    /// Ratings keyed by rating system id. Single-system players hold one entry
    /// under [`DEFAULT_RATING_SYSTEM`].
    #[serde(default)]
    pub ratings: IndexMap<String, Rating>,
    /// World ranking position, 0 when unranked
    #[serde(default)]
    pub ranking: i32,
    pub is_rated: bool,
    #[serde(default)]
    pub event_count: u32
}

impl Player {
    pub fn new(id: impl Into<String>) -> Player {
        Player {
            id: id.into(),
            ratings: IndexMap::new(),
            ranking: 0,
            is_rated: false,
            event_count: 0
        }
    }

    pub fn with_rating(mut self, value: f64, deviation: f64) -> Player {
        self.ratings
            .insert(DEFAULT_RATING_SYSTEM.to_string(), Rating::new(value, deviation));
        self
    }

    pub fn with_system_rating(mut self, system_id: &str, value: f64, deviation: f64) -> Player {
        self.ratings.insert(system_id.to_string(), Rating::new(value, deviation));
        self
    }

    pub fn with_ranking(mut self, ranking: i32) -> Player {
        self.ranking = ranking;
        self
    }

    pub fn rated(mut self, is_rated: bool) -> Player {
        self.is_rated = is_rated;
        self
    }

    pub fn with_event_count(mut self, event_count: u32) -> Player {
        self.event_count = event_count;
        self
    }

    pub fn primary_rating(&self) -> Option<f64> {
        get_primary_rating(&self.ratings, DEFAULT_RATING_SYSTEM)
    }
}
