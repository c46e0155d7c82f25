//! Ranked chase targets around a base location.
//!
//! Candidate cells are perturbed sequentially (so the random stream is
//! consumed in grid order), then indexed, scored and classified in
//! parallel. Collection preserves grid order, which keeps the output
//! identical to a sequential pass for the same seed.

use super::classify::classify;
use super::grid::{grid_cells, GridCell};
use super::rationale::target_rationale;
use super::variation::VariationConfig;
use crate::atmosphere::compute_composite_indices;
use crate::core_types::{BaseParameters, CompositeIndices, InitiationWindow, Target};
use crate::error::ComputeError;
use crate::scoring::score_chasability;
use chrono::Timelike;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Customary search radius (miles).
pub const DEFAULT_RADIUS_MILES: f64 = 150.0;

/// Target generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Cells scoring below this are dropped.
    pub min_score: u8,

    /// Length cap on the returned list.
    pub max_targets: usize,

    /// Local clock hour for the initiation window. `None` reads the
    /// system clock at generation time, which makes the window depend on
    /// when the call runs; set it for reproducible output.
    pub hour: Option<u32>,

    /// Return the synthetic fallback target instead of an empty list when
    /// no cell clears `min_score`.
    pub fallback_on_empty: bool,

    pub variation: VariationConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_score: 60,
            max_targets: 6,
            hour: None,
            fallback_on_empty: false,
            variation: VariationConfig::default(),
        }
    }
}

/// Spatial target generator.
#[derive(Debug, Clone, Default)]
pub struct TargetGenerator {
    config: GeneratorConfig,
}

/// A cell that cleared the score gate, before labelling.
struct Candidate {
    cell: GridCell,
    parameters: BaseParameters,
    indices: CompositeIndices,
    score: u8,
}

impl TargetGenerator {
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Ranked targets within `radius_miles` of the base location,
    /// best score first.
    ///
    /// An empty list means no cell cleared the score gate. Non-finite base
    /// inputs produce a single [`Target::fallback`].
    pub fn generate<R: Rng + ?Sized>(
        &self,
        base_latitude: f64,
        base_longitude: f64,
        base: &BaseParameters,
        radius_miles: f64,
        rng: &mut R,
    ) -> Vec<Target> {
        match self.try_generate(base_latitude, base_longitude, base, radius_miles, rng) {
            Ok(targets) if targets.is_empty() && self.config.fallback_on_empty => {
                debug!("No cell cleared score {}, using fallback target", self.config.min_score);
                vec![Target::fallback(base_latitude, base_longitude)]
            }
            Ok(targets) => targets,
            Err(e) => {
                warn!("Target generation failed, using fallback target: {e}");
                vec![Target::fallback(base_latitude, base_longitude)]
            }
        }
    }

    fn try_generate<R: Rng + ?Sized>(
        &self,
        base_latitude: f64,
        base_longitude: f64,
        base: &BaseParameters,
        radius_miles: f64,
        rng: &mut R,
    ) -> Result<Vec<Target>, ComputeError> {
        ComputeError::check("base_latitude", base_latitude)?;
        ComputeError::check("base_longitude", base_longitude)?;
        ComputeError::check("radius_miles", radius_miles)?;
        if radius_miles < 0.0 {
            return Err(ComputeError::InvalidInput(format!(
                "negative search radius {radius_miles}"
            )));
        }
        if !base.is_finite() {
            return Err(ComputeError::InvalidInput(
                "base parameters contain non-finite values".to_string(),
            ));
        }
        self.config.variation.validate()?;

        let window = InitiationWindow::from_hour(
            self.config
                .hour
                .unwrap_or_else(|| chrono::Local::now().hour()),
        );

        let variation = &self.config.variation;
        let perturbed: Vec<(GridCell, BaseParameters)> =
            grid_cells(base_latitude, base_longitude, radius_miles)
                .into_iter()
                .map(|cell| {
                    let parameters = variation.perturb(base, cell.delta_lat, cell.delta_lon, rng);
                    (cell, parameters)
                })
                .collect();
        let cell_count = perturbed.len();

        let min_score = self.config.min_score;
        let candidates: Vec<Candidate> = perturbed
            .into_par_iter()
            .filter_map(|(cell, parameters)| {
                let indices = compute_composite_indices(&parameters);
                let score = score_chasability(&parameters, &indices, cell.latitude, cell.longitude);
                (score >= min_score).then_some(Candidate {
                    cell,
                    parameters,
                    indices,
                    score,
                })
            })
            .collect();

        debug!(
            "{} of {cell_count} cells cleared score {min_score}",
            candidates.len()
        );

        let mut targets: Vec<Target> = candidates
            .into_iter()
            .enumerate()
            .map(|(n, candidate)| build_target(n + 1, candidate, window))
            .collect();

        // stable: equal scores keep grid order
        targets.sort_by(|a, b| b.score.cmp(&a.score));
        targets.truncate(self.config.max_targets);
        Ok(targets)
    }
}

fn build_target(number: usize, candidate: Candidate, window: InitiationWindow) -> Target {
    let Candidate {
        cell,
        parameters,
        indices,
        score,
    } = candidate;
    let class = classify(score, &indices);

    Target {
        latitude: cell.latitude,
        longitude: cell.longitude,
        label: format!(
            "Target {number} ({}mi {})",
            cell.distance_miles as u32,
            cell.bearing()
        ),
        severity: class.severity,
        score,
        priority: class.priority,
        distance_miles: cell.distance_miles,
        initiation_window: window,
        parameters,
        indices,
        target_type: class.target_type,
        storm_mode: class.storm_mode,
        rationale: target_rationale(
            &parameters,
            &indices,
            class.storm_mode,
            class.target_type,
            score,
        ),
        narrative: None,
    }
}

/// [`TargetGenerator::generate`] with the default configuration.
///
/// The default has no fixed hour, so the initiation window comes from the
/// local clock: two seeded calls either side of 14:00 or 17:00 differ in
/// `initiation_window` only. Use [`TargetGenerator`] with
/// [`GeneratorConfig::hour`] set when the whole list must be reproducible.
pub fn generate_targets<R: Rng + ?Sized>(
    base_latitude: f64,
    base_longitude: f64,
    base: &BaseParameters,
    radius_miles: f64,
    rng: &mut R,
) -> Vec<Target> {
    TargetGenerator::default().generate(base_latitude, base_longitude, base, radius_miles, rng)
}
