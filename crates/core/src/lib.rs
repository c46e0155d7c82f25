//! Storm Chase Targeting Core
//!
//! Scores how favorable the atmosphere is for organized severe storms at a
//! location and proposes a short, ranked list of nearby places worth
//! driving to.
//!
//! ## Pipeline
//!
//! ```text
//! SurfaceObservation
//!   -> derive_base_parameters      CAPE, CIN, shear, SRH, LCL
//!   -> compute_composite_indices   SCP, STP, EHI, BRN, SHIP, ...
//!   -> score_chasability           0-100
//!   -> TargetGenerator             9×9 grid, spatial variation, ≤ 6 targets
//! ```
//!
//! Every stage is total: bad or missing inputs degrade to documented
//! fallback values instead of errors, and the degradation is visible on
//! [`BaseParameters::source`] or logged through `tracing`.
//!
//! The only randomness is the `rand::Rng` handed to the generator, so a
//! seeded generator reproduces its targets exactly.

pub mod annotation;
pub mod atmosphere;
pub mod cache;
pub mod core_types;
pub mod error;
pub mod scoring;
pub mod targeting;

// Re-export core types
pub use core_types::{
    BaseParameters, Celsius, CompositeIndices, Fahrenheit, HectoPascals, InitiationWindow, Knots,
    MetersPerSecond, ParameterSource, Severity, StormMode, SurfaceObservation, Target, TargetType,
};

// Re-export pipeline entry points
pub use annotation::{annotate_top_target, AnnotationContext, NarrativeAnnotator};
pub use atmosphere::{compute_composite_indices, derive_base_parameters};
pub use cache::{CachePolicy, TargetCache};
pub use error::{AnnotationError, ComputeError};
pub use scoring::{score_breakdown, score_chasability, ScoreBreakdown, NEUTRAL_SCORE};
pub use targeting::{
    generate_targets, legacy_rationale, GeneratorConfig, TargetGenerator, VariationConfig,
    DEFAULT_RADIUS_MILES,
};
