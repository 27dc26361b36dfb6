pub mod constants;
pub mod elo;
pub mod elo_model;
pub mod error;
pub mod rating_tracker;
pub mod rating_utils;
pub mod season;
pub mod structures;
