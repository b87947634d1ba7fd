pub mod algorithm;
pub mod calculator;
pub mod weights;

pub use algorithm::{summarize_activity, ScoringAlgorithm};
pub use calculator::{ActivityReport, ScoreCalculator};
pub use weights::ScoringWeights;
