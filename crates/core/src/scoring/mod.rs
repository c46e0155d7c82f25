//! Chasability scoring and parameter status classification.

pub mod chasability;
pub mod thresholds;

pub use chasability::{
    score_breakdown, score_chasability, GeographicRegion, QualityCap, ScoreBreakdown, MAX_BONUS,
    NEUTRAL_SCORE,
};
pub use thresholds::{favorable_count, parameter_status, ParameterStatus, ThresholdRule};
