//! Spatial target generation.
//!
//! Samples a fixed grid around a base location, varies the base parameters
//! across it, scores and classifies each cell, and returns a short ranked
//! list of places worth driving to.

pub mod classify;
pub mod generator;
pub mod grid;
pub mod rationale;
pub mod variation;

pub use classify::{classify, Classification};
pub use generator::{generate_targets, GeneratorConfig, TargetGenerator, DEFAULT_RADIUS_MILES};
pub use grid::{compass_bearing, grid_cells, planar_distance_miles, GridCell};
pub use rationale::{legacy_rationale, target_rationale};
pub use variation::VariationConfig;
