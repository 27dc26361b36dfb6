use serde::{Deserialize, Serialize};

// Model constants
pub const DEFAULT_MODEL_NAME: &str = "elo";
pub const HOME_ADVANTAGE: f64 = 100.0;
pub const LOGISTIC_SCALE: f64 = 400.0;
// K = K_MULTIPLIER * (mov + K_MOV_OFFSET)^K_MOV_EXPONENT / (K_BASE + K_RATING_GAP_WEIGHT * gap)
pub const K_MULTIPLIER: f64 = 20.0;
pub const K_MOV_OFFSET: f64 = 3.0;
pub const K_MOV_EXPONENT: f64 = 0.8;
pub const K_BASE: f64 = 7.5;
pub const K_RATING_GAP_WEIGHT: f64 = 0.006;
// Season regression: carryover * prior + (1 - carryover) * mean
pub const SEASON_CARRYOVER: f64 = 0.75;
pub const SEASON_MEAN_RATING: f64 = 1505.0;

/// The full set of formula parameters used by a model variant.
///
/// Every formula in [`crate::model::elo`] and [`crate::model::season`] reads its
/// coefficients from here, so a different K curve or home advantage is a different
/// `ModelParameters` value rather than a code change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub home_advantage: f64,
    pub logistic_scale: f64,
    pub k_multiplier: f64,
    pub k_mov_offset: f64,
    pub k_mov_exponent: f64,
    pub k_base: f64,
    pub k_rating_gap_weight: f64,
    pub season_carryover: f64,
    pub season_mean_rating: f64
}

impl Default for ModelParameters {
    fn default() -> Self {
        ModelParameters {
            home_advantage: HOME_ADVANTAGE,
            logistic_scale: LOGISTIC_SCALE,
            k_multiplier: K_MULTIPLIER,
            k_mov_offset: K_MOV_OFFSET,
            k_mov_exponent: K_MOV_EXPONENT,
            k_base: K_BASE,
            k_rating_gap_weight: K_RATING_GAP_WEIGHT,
            season_carryover: SEASON_CARRYOVER,
            season_mean_rating: SEASON_MEAN_RATING
        }
    }
}

impl ModelParameters {
    pub fn with_home_advantage(home_advantage: f64) -> ModelParameters {
        ModelParameters {
            home_advantage,
            ..Default::default()
        }
    }

    /// Weight given to the regression mean at a season boundary
    pub fn season_regression_weight(&self) -> f64 {
        1.0 - self.season_carryover
    }
}
