//! Derived storm parameters from a single surface observation.
//!
//! Converts temperature, dewpoint and station pressure into the base set of
//! severe-weather quantities used by the composite indices and the scorer.
//!
//! # Scientific Background
//!
//! Real CAPE, shear and helicity need a full vertical sounding. Without one,
//! the temperature-dewpoint spread is the strongest surface signal available:
//! a small spread means a moist boundary layer and more buoyancy for a
//! given temperature. Every quantity here is a closed-form
//! proxy driven by that spread.
//!
//! ```text
//! es       = 6.112 · exp(17.67·Td / (Td + 243.5))          (Bolton 1980)
//! w        = 0.622 · es / (p - es)
//! p_lcl    = p · (s / (s + 0.01))^(1/0.28571)
//! z_lcl    = (1 - (p_lcl/p)^0.1903) · 44307.7
//! ```
//!
//! # References
//!
//! - Bolton, D. (1980). "The computation of equivalent potential temperature."
//!   Monthly Weather Review, 108, 1046-1053.

use crate::core_types::{BaseParameters, ParameterSource, SurfaceObservation};
use crate::error::ComputeError;
use tracing::{debug, warn};

/// Bolton's saturation vapor pressure coefficient (hPa).
const BOLTON_E0: f64 = 6.112;

/// Ratio of dry-air to water-vapor gas constants.
const EPSILON: f64 = 0.622;

/// Poisson exponent R/cp.
const POISSON_EXPONENT: f64 = 0.28571;

/// Standard-atmosphere hypsometric exponent.
const HYPSOMETRIC_EXPONENT: f64 = 0.1903;

/// Standard-atmosphere height scale (m).
const HEIGHT_SCALE_M: f64 = 44307.7;

/// Spread above which the dry CAPE regime applies (°C).
const DRY_SPREAD_C: f64 = 20.0;

/// Spread below which the moist CAPE regime applies (°C).
const MOIST_SPREAD_C: f64 = 5.0;

/// Saturation vapor pressure over water (hPa) at `t_celsius`.
///
/// Bolton (1980), accurate to 0.1% between -30 °C and 35 °C.
#[must_use]
pub fn saturation_vapor_pressure(t_celsius: f64) -> f64 {
    BOLTON_E0 * (17.67 * t_celsius / (t_celsius + 243.5)).exp()
}

/// Mixing ratio (kg/kg) from vapor pressure and total pressure, both hPa.
#[must_use]
pub fn mixing_ratio(vapor_pressure: f64, pressure: f64) -> f64 {
    EPSILON * vapor_pressure / (pressure - vapor_pressure)
}

/// LCL height (m) from station pressure and temperature-dewpoint spread.
#[must_use]
pub fn lcl_height(pressure: f64, spread_c: f64) -> f64 {
    let lcl_pressure = pressure * (spread_c / (spread_c + 0.01)).powf(1.0 / POISSON_EXPONENT);
    (1.0 - (lcl_pressure / pressure).powf(HYPSOMETRIC_EXPONENT)) * HEIGHT_SCALE_M
}

/// CAPE proxy (J/kg) from surface temperature and spread.
///
/// Three disjoint regimes, then a temperature adjustment:
///
/// ```text
/// s > 20 (dry):      (s - 15) · 150
/// s < 5  (moist):    (T - 15) · 180 + (25 - s) · 100
/// otherwise:         (T - 10) · 120 + (20 - s) · 80
///
/// × 1.5 if T > 30 °C, × 0.5 if T < 15 °C, floored at 0
/// ```
#[must_use]
pub fn cape_estimate(t_celsius: f64, spread_c: f64) -> f64 {
    let cape = if spread_c > DRY_SPREAD_C {
        ((spread_c - 15.0) * 150.0).max(0.0)
    } else if spread_c < MOIST_SPREAD_C {
        ((t_celsius - 15.0) * 180.0 + (25.0 - spread_c) * 100.0).max(0.0)
    } else {
        ((t_celsius - 10.0) * 120.0 + (20.0 - spread_c) * 80.0).max(0.0)
    };

    let adjusted = if t_celsius > 30.0 {
        cape * 1.5
    } else if t_celsius < 15.0 {
        cape * 0.5
    } else {
        cape
    };

    adjusted.max(0.0)
}

/// Derive the base parameter set from a surface observation.
///
/// Never fails: missing temperature/dewpoint are replaced by 70 °F / 60 °F
/// and tagged [`ParameterSource::SurfaceDefaults`]; any arithmetic failure
/// yields [`BaseParameters::fallback`] tagged
/// [`ParameterSource::FallbackEstimates`].
#[must_use]
pub fn derive_base_parameters(observation: &SurfaceObservation) -> BaseParameters {
    match try_derive(observation) {
        Ok(parameters) => parameters,
        Err(e) => {
            warn!("Parameter derivation failed, using fallback estimates: {e}");
            let dewpoint = *observation.dewpoint_or_default();
            let dewpoint = if dewpoint.is_finite() {
                dewpoint
            } else {
                *SurfaceObservation::DEFAULT_DEWPOINT
            };
            BaseParameters::fallback(dewpoint)
        }
    }
}

fn try_derive(observation: &SurfaceObservation) -> Result<BaseParameters, ComputeError> {
    let temperature_f = observation.temperature_or_default();
    let dewpoint_f = observation.dewpoint_or_default();
    let pressure = *observation.pressure_or_default();

    ComputeError::check("temperature", *temperature_f)?;
    ComputeError::check("dewpoint", *dewpoint_f)?;
    ComputeError::check("pressure", pressure)?;

    let t_c = temperature_f.to_celsius();
    let td_c = dewpoint_f.to_celsius();
    let spread = t_c - td_c;

    let es = saturation_vapor_pressure(*td_c);
    let w = ComputeError::check("mixing_ratio", mixing_ratio(es, pressure))?;
    let lcl = ComputeError::check("lcl_height", lcl_height(pressure, spread))?;

    let cape = ComputeError::check("cape", cape_estimate(*t_c, spread))?;
    let cin = (lcl / 10.0 + spread * 2.0).clamp(5.0, 200.0);
    let shear = (spread * 2.0 + (30.0 - *t_c)).clamp(10.0, 80.0);
    let srh = (cape / 15.0 + shear * 3.0).clamp(50.0, 500.0);

    let source = if observation.is_incomplete() {
        ParameterSource::SurfaceDefaults
    } else {
        ParameterSource::CalculatedFromSurfaceObs
    };

    debug!(
        "Derived parameters: T={t_c} Td={td_c} spread={spread:.1} CAPE={cape:.0} \
         CIN={cin:.0} shear={shear:.0} SRH={srh:.0} LCL={lcl:.0} ({source})"
    );

    Ok(BaseParameters {
        cape: cape.round(),
        cin: cin.round(),
        dewpoint: *dewpoint_f,
        shear_0_6km: shear.round(),
        srh_0_1km: srh.round(),
        lcl_height: lcl.round(),
        mixing_ratio: Some((w * 1000.0 * 100.0).round() / 100.0),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bolton_reference_values() {
        // es(0 °C) = 6.112 hPa by construction; es(20 °C) ≈ 23.37 hPa
        assert_relative_eq!(saturation_vapor_pressure(0.0), 6.112);
        assert_relative_eq!(saturation_vapor_pressure(20.0), 23.37, epsilon = 0.05);
    }

    #[test]
    fn cape_regimes_are_disjoint() {
        // moist: T=25, s=3 -> (10·180 + 22·100) = 4000
        assert_relative_eq!(cape_estimate(25.0, 3.0), 4000.0);
        // moderate: T=25, s=10 -> (15·120 + 10·80) = 2600
        assert_relative_eq!(cape_estimate(25.0, 10.0), 2600.0);
        // dry: T=25, s=22 -> 7·150 = 1050
        assert_relative_eq!(cape_estimate(25.0, 22.0), 1050.0);
    }

    #[test]
    fn cape_temperature_adjustments() {
        // hot: T=32, s=10 -> (22·120 + 800) · 1.5 = 5160
        assert_relative_eq!(cape_estimate(32.0, 10.0), 5160.0);
        // cool: T=12, s=6 -> (2·120 + 14·80) · 0.5 = 680
        assert_relative_eq!(cape_estimate(12.0, 6.0), 680.0);
        // cold and moist floors at zero
        assert_eq!(cape_estimate(-10.0, 2.0), 0.0);
    }

    #[test]
    fn zero_spread_reaches_height_scale() {
        assert_relative_eq!(lcl_height(1013.25, 0.0), HEIGHT_SCALE_M);
        assert!(lcl_height(1013.25, 10.0) > 0.0);
    }

    #[test]
    fn complete_observation_is_tagged_calculated() {
        let obs = SurfaceObservation::new(86.0, 68.0);
        let p = derive_base_parameters(&obs);
        assert_eq!(p.source, ParameterSource::CalculatedFromSurfaceObs);
        assert_eq!(p.dewpoint, 68.0);
        assert!(p.mixing_ratio.is_some_and(|w| w > 10.0 && w < 20.0));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let p = derive_base_parameters(&SurfaceObservation::default());
        assert_eq!(p.source, ParameterSource::SurfaceDefaults);
        assert_eq!(p.dewpoint, 60.0);

        let explicit = derive_base_parameters(&SurfaceObservation::new(70.0, 60.0));
        assert_eq!(p.cape, explicit.cape);
        assert_eq!(p.lcl_height, explicit.lcl_height);
    }

    #[test]
    fn non_finite_input_falls_back() {
        let obs = SurfaceObservation::new(f64::NAN, 65.0);
        let p = derive_base_parameters(&obs);
        assert_eq!(p.source, ParameterSource::FallbackEstimates);
        assert_eq!(p.cape, 1500.0);
        assert_eq!(p.dewpoint, 65.0);
    }

    #[test]
    fn outputs_stay_in_documented_ranges() {
        for t in (-20..=115).step_by(5) {
            for td in (-30..=85).step_by(5) {
                let obs = SurfaceObservation::new(f64::from(t), f64::from(td));
                let p = derive_base_parameters(&obs);
                assert!(p.cape >= 0.0, "CAPE {} for T={t} Td={td}", p.cape);
                assert!((5.0..=200.0).contains(&p.cin), "CIN {} for T={t} Td={td}", p.cin);
                assert!(
                    (10.0..=80.0).contains(&p.shear_0_6km),
                    "shear {} for T={t} Td={td}",
                    p.shear_0_6km
                );
                assert!(
                    (50.0..=500.0).contains(&p.srh_0_1km),
                    "SRH {} for T={t} Td={td}",
                    p.srh_0_1km
                );
            }
        }
    }

    #[test]
    fn smaller_spread_means_more_cape_at_fixed_temperature() {
        let humid = derive_base_parameters(&SurfaceObservation::new(85.0, 72.0));
        let dry = derive_base_parameters(&SurfaceObservation::new(85.0, 50.0));
        assert!(humid.cape > dry.cape);
    }
}
