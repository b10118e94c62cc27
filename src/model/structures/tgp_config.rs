use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum QualifyingType {
    #[default]
    None,
    Limited,
    Unlimited,
    Hybrid
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FinalsFormat {
    #[default]
    None,
    MatchPlay,
    SingleElimination,
    DoubleElimination,
    RoundRobin,
    Strike,
    Ladder
}

/// Ball count of a Flip Frenzy event, which determines how many matches make up one
/// meaningful game.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FlipFrenzyFormat {
    ThreeBall,
    OneBall
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QualifyingConfig {
    #[serde(rename = "type")]
    pub qualifying_type: QualifyingType,
    #[serde(default)]
    pub meaningful_games: f64,
    #[serde(default)]
    pub hours: Option<f64>,
    #[serde(default)]
    pub four_player_groups: bool,
    #[serde(default)]
    pub three_player_groups: bool,
    #[serde(default)]
    pub multi_matchplay: bool,
    #[serde(default)]
    pub machine_count: Option<u32>
}

impl QualifyingConfig {
    pub fn new(qualifying_type: QualifyingType, meaningful_games: f64) -> QualifyingConfig {
        QualifyingConfig {
            qualifying_type,
            meaningful_games,
            ..Default::default()
        }
    }

    pub fn with_hours(mut self, hours: f64) -> QualifyingConfig {
        self.hours = Some(hours);
        self
    }

    pub fn with_four_player_groups(mut self) -> QualifyingConfig {
        self.four_player_groups = true;
        self
    }

    pub fn with_three_player_groups(mut self) -> QualifyingConfig {
        self.three_player_groups = true;
        self
    }

    pub fn with_multi_matchplay(mut self) -> QualifyingConfig {
        self.multi_matchplay = true;
        self
    }

    pub fn with_machine_count(mut self, machine_count: u32) -> QualifyingConfig {
        self.machine_count = Some(machine_count);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinalsConfig {
    pub format_type: FinalsFormat,
    #[serde(default)]
    pub meaningful_games: f64,
    #[serde(default)]
    pub four_player_groups: bool,
    #[serde(default)]
    pub three_player_groups: bool,
    #[serde(default)]
    pub multi_matchplay: bool,
    #[serde(default)]
    pub finalist_count: Option<u32>
}

impl FinalsConfig {
    pub fn new(format_type: FinalsFormat, meaningful_games: f64) -> FinalsConfig {
        FinalsConfig {
            format_type,
            meaningful_games,
            ..Default::default()
        }
    }

    pub fn with_four_player_groups(mut self) -> FinalsConfig {
        self.four_player_groups = true;
        self
    }

    pub fn with_three_player_groups(mut self) -> FinalsConfig {
        self.three_player_groups = true;
        self
    }

    pub fn with_multi_matchplay(mut self) -> FinalsConfig {
        self.multi_matchplay = true;
        self
    }

    pub fn with_finalist_count(mut self, finalist_count: u32) -> FinalsConfig {
        self.finalist_count = Some(finalist_count);
        self
    }
}

/// Format description used to grade a tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TgpConfig {
    #[serde(default)]
    pub qualifying: QualifyingConfig,
    #[serde(default)]
    pub finals: FinalsConfig,
    /// Fraction in [0, 1] applied to every meaningful game
    #[serde(default = "default_ball_count_adjustment")]
    pub ball_count_adjustment: f64
}

fn default_ball_count_adjustment() -> f64 {
    1.0
}

impl Default for TgpConfig {
    fn default() -> Self {
        TgpConfig {
            qualifying: QualifyingConfig::default(),
            finals: FinalsConfig::default(),
            ball_count_adjustment: default_ball_count_adjustment()
        }
    }
}

impl TgpConfig {
    pub fn new(qualifying: QualifyingConfig, finals: FinalsConfig) -> TgpConfig {
        TgpConfig {
            qualifying,
            finals,
            ball_count_adjustment: default_ball_count_adjustment()
        }
    }

    pub fn with_ball_count_adjustment(mut self, ball_count_adjustment: f64) -> TgpConfig {
        self.ball_count_adjustment = ball_count_adjustment;
        self
    }
}
