use crate::model::structures::rating_adjustment_type::RatingAdjustmentType;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub type TeamId = i32;
/// Season label, e.g. `1314`. Ordering comes from the `seasons` table, not the label.
pub type Season = i32;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Teams without an initial rating cannot be processed
    pub initial_rating: Option<f64>
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub id: i32,
    pub season: Season,
    pub start_time: DateTime<FixedOffset>,
    pub away_team_id: TeamId,
    pub home_team_id: TeamId,
    pub away_score: i32,
    pub home_score: i32
}

/// A game annotated with both participants' ratings before and after it was played
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatedGame {
    #[serde(flatten)]
    pub game: Game,
    pub away_rating_pre: f64,
    pub away_rating_post: f64,
    pub home_rating_pre: f64,
    pub home_rating_post: f64
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingAdjustment {
    pub team_id: TeamId,
    pub season: Season,
    /// Only set for [`RatingAdjustmentType::Game`]
    pub game_id: Option<i32>,
    pub rating_before: f64,
    pub rating_after: f64,
    pub adjustment_type: RatingAdjustmentType
}
