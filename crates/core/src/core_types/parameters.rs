//! Base severe-weather parameter set derived from surface observations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance of a [`BaseParameters`] record.
///
/// Degraded results are never signalled with errors; callers that care
/// inspect this tag instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSource {
    /// Derived from a complete surface observation.
    CalculatedFromSurfaceObs,
    /// Derived, but temperature or dewpoint was missing and defaulted.
    SurfaceDefaults,
    /// Arithmetic failed; the fixed fallback table was used.
    FallbackEstimates,
    /// Perturbed from a base record by the spatial variation model.
    SpatialVariation,
    /// Supplied directly by the caller.
    #[default]
    Provided,
}

impl ParameterSource {
    /// Whether the values should be treated as a lower-confidence estimate.
    #[must_use]
    pub fn is_degraded(self) -> bool {
        matches!(self, Self::SurfaceDefaults | Self::FallbackEstimates)
    }

    /// Stable string tag, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CalculatedFromSurfaceObs => "calculated_from_surface_obs",
            Self::SurfaceDefaults => "surface_defaults",
            Self::FallbackEstimates => "fallback_estimates",
            Self::SpatialVariation => "spatial_variation",
            Self::Provided => "provided",
        }
    }
}

impl fmt::Display for ParameterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storm-relevant quantities at one location.
///
/// CAPE, shear and SRH are all driven by the temperature-dewpoint spread;
/// see [`crate::atmosphere::derive_base_parameters`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseParameters {
    /// Convective available potential energy (J/kg).
    pub cape: f64,

    /// Convective inhibition magnitude (J/kg, positive = stronger cap).
    pub cin: f64,

    /// Surface dewpoint (°F).
    pub dewpoint: f64,

    /// Deep-layer 0-6 km bulk shear (kts).
    pub shear_0_6km: f64,

    /// 0-1 km storm-relative helicity (m²/s²).
    pub srh_0_1km: f64,

    /// Lifted condensation level height (m AGL).
    pub lcl_height: f64,

    /// Surface mixing ratio (g/kg). Diagnostic only; absent on fallback
    /// and perturbed records.
    pub mixing_ratio: Option<f64>,

    /// Where these values came from.
    pub source: ParameterSource,
}

impl BaseParameters {
    /// Create a caller-supplied parameter set.
    ///
    /// # Arguments
    ///
    /// * `cape` - CAPE (J/kg)
    /// * `dewpoint` - Dewpoint (°F)
    /// * `shear_0_6km` - Deep-layer shear (kts)
    /// * `cin` - CIN (J/kg)
    /// * `srh_0_1km` - 0-1 km SRH (m²/s²)
    /// * `lcl_height` - LCL height (m)
    #[must_use]
    pub fn new(
        cape: f64,
        dewpoint: f64,
        shear_0_6km: f64,
        cin: f64,
        srh_0_1km: f64,
        lcl_height: f64,
    ) -> Self {
        Self {
            cape,
            cin,
            dewpoint,
            shear_0_6km,
            srh_0_1km,
            lcl_height,
            mixing_ratio: None,
            source: ParameterSource::Provided,
        }
    }

    /// Fixed estimates used when derivation fails.
    ///
    /// The observed dewpoint is kept when one was available.
    #[must_use]
    pub fn fallback(dewpoint: f64) -> Self {
        Self {
            cape: 1500.0,
            cin: 50.0,
            dewpoint,
            shear_0_6km: 30.0,
            srh_0_1km: 150.0,
            lcl_height: 1000.0,
            mixing_ratio: None,
            source: ParameterSource::FallbackEstimates,
        }
    }

    /// Named values in display order, for reports and status tables.
    #[must_use]
    pub fn named_values(&self) -> [(&'static str, f64); 6] {
        [
            ("CAPE", self.cape),
            ("Dewpoint", self.dewpoint),
            ("Shear_0_6km", self.shear_0_6km),
            ("CIN", self.cin),
            ("SRH_0_1km", self.srh_0_1km),
            ("LCL_Height", self.lcl_height),
        ]
    }

    /// Whether every numeric field is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [
            self.cape,
            self.cin,
            self.dewpoint,
            self.shear_0_6km,
            self.srh_0_1km,
            self.lcl_height,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

impl Default for BaseParameters {
    fn default() -> Self {
        Self::fallback(60.0)
    }
}
