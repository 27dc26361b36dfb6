use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;
use strum_macros::{Display, EnumIter};

#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[repr(u8)]
pub enum RatingAdjustmentType {
    /// Externally supplied opening rating of the first season
    Initial = 0,
    /// Opening rating of a later season, regressed from the prior season
    SeasonRegression = 1,
    Game = 2
}

impl TryFrom<i32> for RatingAdjustmentType {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(RatingAdjustmentType::Initial),
            1 => Ok(RatingAdjustmentType::SeasonRegression),
            2 => Ok(RatingAdjustmentType::Game),
            _ => Err(())
        }
    }
}

impl From<RatingAdjustmentType> for i32 {
    fn from(adjustment_type: RatingAdjustmentType) -> Self {
        adjustment_type as i32
    }
}
