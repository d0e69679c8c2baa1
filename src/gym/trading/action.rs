use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter, EnumString};

use crate::error::{EnvError, StockGymError};

/// The discrete action space: full divest, do nothing, or full invest.
///
/// Wire encoding follows the RL convention `{-1, 0, 1}`; anything else is
/// rejected before it reaches the environment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    EnumCount,
    Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Sell,
    Hold,
    Buy,
}

impl Action {
    /// The integer code used at the training-loop boundary.
    pub fn wire(self) -> i8 {
        match self {
            Action::Sell => -1,
            Action::Hold => 0,
            Action::Buy => 1,
        }
    }
}

impl TryFrom<i8> for Action {
    type Error = StockGymError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(Action::Sell),
            0 => Ok(Action::Hold),
            1 => Ok(Action::Buy),
            other => Err(EnvError::InvalidAction(other).into()),
        }
    }
}
