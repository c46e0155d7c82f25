//! Mesoscale variation of storm parameters across the candidate grid.
//!
//! A single observation says nothing about conditions 50 miles away, so each
//! grid cell gets the base parameters nudged by a deterministic gradient
//! plus bounded uniform noise:
//!
//! ```text
//! CAPE     += Δlon·200 + U(±300)            floor 500   (rises eastward)
//! Td       += -Δlat·3 + U(±5)               floor 40    (moisture from the Gulf)
//! shear    += U(±15)                        floor 10
//! CIN      += |Δlat|·20 + U(±20)            floor 0     (boundary proximity)
//! SRH      += |Δlat + Δlon|·30 + U(±50)     floor 50
//! LCL      += -10·ΔTd + U(±200)             floor 200   (moister = lower base)
//! ```
//!
//! Draws happen in the order listed, once per cell, so a seeded generator
//! reproduces the same field.

use crate::core_types::{BaseParameters, ParameterSource};
use crate::error::ComputeError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Largest noise half-width a uniform draw can span without overflowing.
pub const MAX_NOISE: f64 = f64::MAX / 2.0;

/// Gradient and noise magnitudes for the spatial variation model.
///
/// Noise fields are half-widths of uniform distributions; set them to zero
/// (see [`VariationConfig::disabled`]) to keep only the gradients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariationConfig {
    /// CAPE change per degree of longitude (J/kg).
    pub cape_gradient: f64,
    pub cape_noise: f64,

    /// Dewpoint decrease per degree of latitude (°F).
    pub dewpoint_gradient: f64,
    pub dewpoint_noise: f64,

    pub shear_noise: f64,

    /// CIN increase per degree of latitude offset (J/kg).
    pub cin_gradient: f64,
    pub cin_noise: f64,

    /// SRH increase per degree of combined offset (m²/s²).
    pub srh_gradient: f64,
    pub srh_noise: f64,

    /// LCL decrease per °F of dewpoint increase (m).
    pub lcl_moisture_coupling: f64,
    pub lcl_noise: f64,
}

impl Default for VariationConfig {
    fn default() -> Self {
        Self {
            cape_gradient: 200.0,
            cape_noise: 300.0,
            dewpoint_gradient: 3.0,
            dewpoint_noise: 5.0,
            shear_noise: 15.0,
            cin_gradient: 20.0,
            cin_noise: 20.0,
            srh_gradient: 30.0,
            srh_noise: 50.0,
            lcl_moisture_coupling: 10.0,
            lcl_noise: 200.0,
        }
    }
}

impl VariationConfig {
    /// Default gradients with every noise amplitude multiplied by `factor`.
    ///
    /// Negative factors are treated as zero.
    #[must_use]
    pub fn scaled(factor: f64) -> Self {
        let factor = factor.max(0.0);
        let base = Self::default();
        Self {
            cape_noise: base.cape_noise * factor,
            dewpoint_noise: base.dewpoint_noise * factor,
            shear_noise: base.shear_noise * factor,
            cin_noise: base.cin_noise * factor,
            srh_noise: base.srh_noise * factor,
            lcl_noise: base.lcl_noise * factor,
            ..base
        }
    }

    /// Deterministic gradients only.
    #[must_use]
    pub fn disabled() -> Self {
        Self::scaled(0.0)
    }

    /// Reject settings that cannot be sampled: non-finite gradients, and
    /// noise half-widths that are non-finite or not below [`MAX_NOISE`].
    ///
    /// # Errors
    ///
    /// [`ComputeError::NonFinite`] for a non-finite field,
    /// [`ComputeError::InvalidInput`] for an oversized noise half-width.
    pub fn validate(&self) -> Result<(), ComputeError> {
        let gradients = [
            ("cape_gradient", self.cape_gradient),
            ("dewpoint_gradient", self.dewpoint_gradient),
            ("cin_gradient", self.cin_gradient),
            ("srh_gradient", self.srh_gradient),
            ("lcl_moisture_coupling", self.lcl_moisture_coupling),
        ];
        for (name, value) in gradients {
            ComputeError::check(name, value)?;
        }

        let noise = [
            ("cape_noise", self.cape_noise),
            ("dewpoint_noise", self.dewpoint_noise),
            ("shear_noise", self.shear_noise),
            ("cin_noise", self.cin_noise),
            ("srh_noise", self.srh_noise),
            ("lcl_noise", self.lcl_noise),
        ];
        for (name, value) in noise {
            if ComputeError::check(name, value)? >= MAX_NOISE {
                return Err(ComputeError::InvalidInput(format!(
                    "{name} half-width {value} is too large to sample"
                )));
            }
        }
        Ok(())
    }

    /// Perturb `base` for a cell offset `(delta_lat, delta_lon)` degrees
    /// from the base location.
    ///
    /// The result is tagged [`ParameterSource::SpatialVariation`] and carries
    /// no mixing ratio. Callers validate the config first; see
    /// [`VariationConfig::validate`].
    pub fn perturb<R: Rng + ?Sized>(
        &self,
        base: &BaseParameters,
        delta_lat: f64,
        delta_lon: f64,
        rng: &mut R,
    ) -> BaseParameters {
        let cape_delta = delta_lon * self.cape_gradient + jitter(rng, self.cape_noise);
        let dewpoint_delta = -delta_lat * self.dewpoint_gradient + jitter(rng, self.dewpoint_noise);
        let shear_delta = jitter(rng, self.shear_noise);
        let cin_delta = delta_lat.abs() * self.cin_gradient + jitter(rng, self.cin_noise);
        let srh_delta =
            (delta_lat + delta_lon).abs() * self.srh_gradient + jitter(rng, self.srh_noise);
        let lcl_delta = -dewpoint_delta * self.lcl_moisture_coupling + jitter(rng, self.lcl_noise);

        BaseParameters {
            cape: (base.cape + cape_delta).max(500.0),
            cin: (base.cin + cin_delta).max(0.0),
            dewpoint: (base.dewpoint + dewpoint_delta).max(40.0),
            shear_0_6km: (base.shear_0_6km + shear_delta).max(10.0),
            srh_0_1km: (base.srh_0_1km + srh_delta).max(50.0),
            lcl_height: (base.lcl_height + lcl_delta).max(200.0),
            mixing_ratio: None,
            source: ParameterSource::SpatialVariation,
        }
    }
}

/// Uniform draw in `[-amplitude, amplitude]`; no draw when the amplitude is
/// not positive.
fn jitter<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    if amplitude > 0.0 {
        rng.random_range(-amplitude..=amplitude)
    } else {
        0.0
    }
}
