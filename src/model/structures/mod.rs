pub mod game_outcome;
pub mod rating_adjustment_type;
