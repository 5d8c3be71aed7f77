pub mod config;
pub mod engine;
pub mod priority;
pub mod stats;
pub mod validation;

pub use config::*;
pub use engine::{
    calculate_score, calculate_score_with, score, ScoreBreakdown, ScoreInput, ScoreResult,
    ALGORITHM_VERSION, MIN_POINTS,
};
pub use priority::{multiplier_for_level, Priority};
pub use stats::TextStats;
pub use validation::validate_scoring;
