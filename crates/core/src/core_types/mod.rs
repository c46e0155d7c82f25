//! Core types and utilities

pub mod indices;
pub mod observation;
pub mod parameters;
pub mod target;
pub mod units;

pub use indices::CompositeIndices;
pub use observation::SurfaceObservation;
pub use parameters::{BaseParameters, ParameterSource};
pub use target::{InitiationWindow, Severity, StormMode, Target, TargetType};
pub use units::*;
