use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EventBoosterType {
    #[default]
    None,
    Certified,
    CertifiedPlus,
    ChampionshipSeries,
    Major
}

impl TryFrom<i32> for EventBoosterType {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(EventBoosterType::None),
            1 => Ok(EventBoosterType::Certified),
            2 => Ok(EventBoosterType::CertifiedPlus),
            3 => Ok(EventBoosterType::ChampionshipSeries),
            4 => Ok(EventBoosterType::Major),
            _ => Err(())
        }
    }
}

impl From<EventBoosterType> for i32 {
    fn from(booster: EventBoosterType) -> Self {
        match booster {
            EventBoosterType::None => 0,
            EventBoosterType::Certified => 1,
            EventBoosterType::CertifiedPlus => 2,
            EventBoosterType::ChampionshipSeries => 3,
            EventBoosterType::Major => 4
        }
    }
}
