//! Error types for the scoring pipeline.
//!
//! None of these cross the public scoring API. Each component computes
//! through a fallible inner function and converts a [`ComputeError`] into its
//! fallback table at exactly one point, so callers always receive a value.

use thiserror::Error;

/// Failure inside a closed-form index or score computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputeError {
    /// An intermediate or final quantity came out NaN or infinite.
    #[error("{quantity} is not finite ({value})")]
    NonFinite {
        /// Name of the offending quantity
        quantity: &'static str,
        /// The value that was produced
        value: f64,
    },

    /// An input lies outside the domain the formulas accept.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ComputeError {
    /// Return `value` unchanged if finite, otherwise a `NonFinite` error.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::NonFinite`] when `value` is NaN or infinite.
    pub fn check(quantity: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { quantity, value })
        }
    }
}

/// Failure of an external narrative annotator.
///
/// Annotation is best-effort: these errors are logged and the target list
/// is returned untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// The annotator service could not be reached or is not configured.
    #[error("annotator unavailable: {0}")]
    Unavailable(String),

    /// The annotator answered with blank text.
    #[error("annotator returned an empty narrative")]
    Empty,

    /// The annotator failed while producing a narrative.
    #[error("annotator failed: {0}")]
    Failed(String),
}
