//! Composite severe-weather indices.
//!
//! Combines the base parameter set into the discriminators forecasters use
//! to separate supercell, tornado, hail and linear-mode environments.
//!
//! # Scientific Background
//!
//! Single parameters are poor predictors on their own: high CAPE without
//! shear gives pulse storms, strong shear without instability gives nothing.
//! Composite indices multiply normalized ingredients so that a weak
//! ingredient suppresses the whole product. All of them here share three
//! normalizing factors:
//!
//! ```text
//! cin_factor      = max(0, (50 - |CIN|) / 50)
//! lcl_factor      = clamp((2000 - LCL) / 1000, 0, 1)
//! dewpoint_factor = clamp(Td / 60, 0.5, 1.2)
//! ```
//!
//! Every index is clamped to a fixed range so that downstream threshold
//! ladders never see runaway values.
//!
//! # References
//!
//! - Thompson, R.L. et al. (2003). "Close proximity soundings within supercell
//!   environments obtained from the Rapid Update Cycle." Wea. Forecasting, 18.
//! - Bunkers, M.J. et al. (2000). "Predicting supercell motion using a new
//!   hodograph technique." Wea. Forecasting, 15, 61-79.
//! - Weisman, M.L. & Klemp, J.B. (1982). "The dependence of numerically
//!   simulated convective storms on vertical wind shear and buoyancy."
//!   Monthly Weather Review, 110, 504-520.

use crate::core_types::{BaseParameters, CompositeIndices, Knots};
use crate::error::ComputeError;
use nalgebra::Vector2;
use tracing::warn;

/// Mixed-layer CAPE as a fraction of surface-based CAPE.
const MIXED_LAYER_FRACTION: f64 = 0.9;

/// Assumed 0-6 km mean-flow bearing (degrees); southwesterly Plains flow.
const MEAN_FLOW_BEARING_DEG: f64 = 225.0;

/// Right-mover deviation from the mean flow (degrees).
const RIGHT_MOVER_DEVIATION_DEG: f64 = 30.0;

/// Fraction of 0-6 km shear present in the 0-3 km layer.
const LOW_LEVEL_SHEAR_FRACTION: f64 = 0.65;

/// BRN value assigned when there is no shear at all.
const BRN_CAP: f64 = 100.0;

/// CIN penalty: 1 with no cap, 0 at 50 J/kg or more.
#[must_use]
pub fn cin_factor(cin: f64) -> f64 {
    ((50.0 - cin.abs()) / 50.0).max(0.0)
}

/// Cloud-base factor: 1 at or below 1000 m, 0 at or above 2000 m.
#[must_use]
pub fn lcl_factor(lcl_height: f64) -> f64 {
    ((2000.0 - lcl_height) / 1000.0).clamp(0.0, 1.0)
}

/// Moisture factor relative to a 60 °F dewpoint.
#[must_use]
pub fn dewpoint_factor(dewpoint: f64) -> f64 {
    (dewpoint / 60.0).clamp(0.5, 1.2)
}

/// Bulk Richardson Number from mixed-layer CAPE and deep shear.
///
/// ```text
/// BRN = MLCAPE / (0.5 · U²),  U = shear in m/s
/// ```
///
/// Returns the cap (100) when there is no shear.
#[must_use]
pub fn bulk_richardson_number(mixed_layer_cape: f64, shear: Knots) -> f64 {
    let u = *shear.to_meters_per_second();
    let u_squared = u * u;
    if u_squared > 0.0 {
        (mixed_layer_cape / (0.5 * u_squared)).clamp(0.0, BRN_CAP)
    } else {
        BRN_CAP
    }
}

/// Bunkers right-mover motion (u, v in kts) from deep-layer shear.
///
/// The mean wind is taken as half the 0-6 km shear along an assumed
/// 225° flow, deviated 30° to the right.
#[must_use]
pub fn bunkers_right_mover(shear: Knots) -> Vector2<f64> {
    let mean_wind = (*shear * 0.5).max(0.0);
    let direction = (MEAN_FLOW_BEARING_DEG + RIGHT_MOVER_DEVIATION_DEG).to_radians();
    Vector2::new(mean_wind * direction.cos(), mean_wind * direction.sin())
}

/// Compute the composite index set for a base parameter record.
///
/// Total function: non-finite inputs or intermediates produce
/// [`CompositeIndices::FALLBACK`] instead of an error.
#[must_use]
pub fn compute_composite_indices(parameters: &BaseParameters) -> CompositeIndices {
    match try_compute(parameters) {
        Ok(indices) => indices,
        Err(e) => {
            warn!("Composite index computation failed, using fallback set: {e}");
            CompositeIndices::FALLBACK
        }
    }
}

fn try_compute(p: &BaseParameters) -> Result<CompositeIndices, ComputeError> {
    let cape = ComputeError::check("cape", p.cape)?;
    let cin = ComputeError::check("cin", p.cin)?;
    let shear_0_6 = ComputeError::check("shear_0_6km", p.shear_0_6km)?;
    let srh = ComputeError::check("srh_0_1km", p.srh_0_1km)?;
    let lcl = ComputeError::check("lcl_height", p.lcl_height)?;
    let dewpoint = ComputeError::check("dewpoint", p.dewpoint)?;

    let cin_f = cin_factor(cin);
    let lcl_f = lcl_factor(lcl);
    let dew_f = dewpoint_factor(dewpoint);

    let mixed_layer_cape = (cape * MIXED_LAYER_FRACTION).max(0.0);

    let scp = (mixed_layer_cape / 1000.0)
        * (shear_0_6 / 20.0)
        * (srh / 100.0)
        * lcl_f
        * cin_f
        * dew_f;

    // STP uses an unbounded-above LCL term, unlike SCP
    let stp_lcl = ((2000.0 - lcl) / 1000.0).max(0.0);
    let stp = (mixed_layer_cape / 1500.0) * stp_lcl * (srh / 150.0) * (shear_0_6 / 20.0) * cin_f;

    let srh_enhanced = (srh * (1.0 + dew_f * 0.2)).max(0.0);

    let brn = bulk_richardson_number(mixed_layer_cape, Knots::new(shear_0_6));

    let ehi = mixed_layer_cape * srh_enhanced / 160_000.0;

    let cape_term = (cape / 3000.0).min(1.5);
    let lapse_rate = 6.5 + cape_term * 2.5;

    let shear_0_3 = (shear_0_6 * LOW_LEVEL_SHEAR_FRACTION).max(0.0);

    let motion = bunkers_right_mover(Knots::new(shear_0_6));
    let mean_wind = (shear_0_6 * 0.5).max(0.0);

    let chp = (mixed_layer_cape / 1000.0) * (srh_enhanced / 150.0);
    let ship = (mixed_layer_cape / 1000.0) * (shear_0_6 / 20.0) * dew_f;
    let vgp = (srh_enhanced / 200.0) * (shear_0_3 / 25.0) * cin_f;

    let sreh = if brn < 50.0 {
        srh_enhanced * (1.0 + (brn - 20.0) / 50.0)
    } else {
        srh_enhanced
    };

    let indices = CompositeIndices {
        mixed_layer_cape,
        scp: ComputeError::check("scp", scp)?.clamp(0.0, 20.0),
        stp: ComputeError::check("stp", stp)?.clamp(0.0, 8.0),
        srh_enhanced,
        brn,
        ehi: ComputeError::check("ehi", ehi)?.clamp(0.0, 8.0),
        lapse_rate_700_500: lapse_rate.clamp(4.0, 12.0),
        shear_0_3km: shear_0_3,
        bunkers_right_u: motion.x,
        bunkers_right_v: motion.y,
        storm_motion_speed: motion.norm(),
        mean_wind_0_6km: mean_wind,
        chp: ComputeError::check("chp", chp)?.clamp(0.0, 10.0),
        ship: ComputeError::check("ship", ship)?.clamp(0.0, 12.0),
        vgp: ComputeError::check("vgp", vgp)?.clamp(0.0, 5.0),
        sreh: ComputeError::check("sreh", sreh)?.max(0.0),
    };

    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn kansas() -> BaseParameters {
        BaseParameters::new(3000.0, 68.0, 50.0, 20.0, 300.0, 900.0)
    }

    #[test]
    fn normalizing_factors() {
        assert_eq!(cin_factor(0.0), 1.0);
        assert_eq!(cin_factor(-25.0), 0.5);
        assert_eq!(cin_factor(80.0), 0.0);
        assert_eq!(lcl_factor(500.0), 1.0);
        assert_eq!(lcl_factor(1500.0), 0.5);
        assert_eq!(lcl_factor(2500.0), 0.0);
        assert_eq!(dewpoint_factor(20.0), 0.5);
        assert_eq!(dewpoint_factor(90.0), 1.2);
    }

    #[test]
    fn kansas_supercell_environment() {
        let i = compute_composite_indices(&kansas());
        assert_relative_eq!(i.mixed_layer_cape, 2700.0);
        // 2.7 · 2.5 · 3 · 1 · 0.6 · (68/60)
        assert_relative_eq!(i.scp, 13.77, epsilon = 1e-9);
        // 1.8 · 1.1 · 2 · 2.5 · 0.6
        assert_relative_eq!(i.stp, 5.94, epsilon = 1e-9);
        assert!(i.scp >= 3.0);
        assert_relative_eq!(i.shear_0_3km, 32.5);
        assert_relative_eq!(i.lapse_rate_700_500, 9.0);
        assert_relative_eq!(i.mean_wind_0_6km, 25.0);
        assert_relative_eq!(i.storm_motion_speed, 25.0, epsilon = 1e-9);
        // 50 kt shear -> BRN ≈ 8.2: linear mode
        assert!(i.brn < 10.0);
    }

    #[test]
    fn bunkers_direction_is_255_degrees() {
        let v = bunkers_right_mover(Knots::new(40.0));
        let bearing = v.y.atan2(v.x).to_degrees().rem_euclid(360.0);
        assert_relative_eq!(bearing, 255.0, epsilon = 1e-9);
        assert_relative_eq!(v.norm(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn brn_without_shear_is_capped() {
        assert_eq!(bulk_richardson_number(2000.0, Knots::new(0.0)), 100.0);
        let mut p = kansas();
        p.shear_0_6km = 0.0;
        let i = compute_composite_indices(&p);
        assert_eq!(i.brn, 100.0);
        assert_eq!(i.scp, 0.0);
    }

    #[test]
    fn sreh_scales_only_below_brn_50() {
        // BRN ≈ 8.2 -> factor 1 + (8.2 - 20)/50 < 1
        let i = compute_composite_indices(&kansas());
        assert!(i.sreh < i.srh_enhanced);

        let mut weak_shear = kansas();
        weak_shear.shear_0_6km = 10.0;
        let i = compute_composite_indices(&weak_shear);
        assert_eq!(i.brn, 100.0);
        assert_eq!(i.sreh, i.srh_enhanced);
    }

    #[test]
    fn non_finite_input_yields_fallback() {
        let mut p = kansas();
        p.cape = f64::NAN;
        assert_eq!(compute_composite_indices(&p), CompositeIndices::FALLBACK);
        p.cape = f64::INFINITY;
        assert_eq!(compute_composite_indices(&p), CompositeIndices::FALLBACK);
    }

    #[test]
    fn repeated_computation_is_identical() {
        let p = kansas();
        assert_eq!(compute_composite_indices(&p), compute_composite_indices(&p));
    }

    #[test]
    fn every_index_respects_its_range() {
        let capes = [0.0, 250.0, 1000.0, 3000.0, 6000.0, 20000.0];
        let shears = [0.0, 10.0, 35.0, 80.0, 150.0];
        let cins = [-300.0, 0.0, 25.0, 200.0];
        let srhs = [0.0, 50.0, 300.0, 900.0];
        let lcls = [-500.0, 200.0, 1000.0, 3000.0];
        let dewpoints = [-10.0, 40.0, 68.0, 85.0];

        for &cape in &capes {
            for &shear in &shears {
                for &cin in &cins {
                    for &srh in &srhs {
                        for &lcl in &lcls {
                            for &dewpoint in &dewpoints {
                                let p = BaseParameters::new(cape, dewpoint, shear, cin, srh, lcl);
                                let i = compute_composite_indices(&p);
                                assert!(i.mixed_layer_cape >= 0.0);
                                assert!((0.0..=20.0).contains(&i.scp));
                                assert!((0.0..=8.0).contains(&i.stp));
                                assert!(i.srh_enhanced >= 0.0);
                                assert!((0.0..=100.0).contains(&i.brn));
                                assert!((0.0..=8.0).contains(&i.ehi));
                                assert!((4.0..=12.0).contains(&i.lapse_rate_700_500));
                                assert!(i.shear_0_3km >= 0.0);
                                assert!(i.storm_motion_speed >= 0.0);
                                assert!(i.mean_wind_0_6km >= 0.0);
                                assert!((0.0..=10.0).contains(&i.chp));
                                assert!((0.0..=12.0).contains(&i.ship));
                                assert!((0.0..=5.0).contains(&i.vgp));
                                assert!(i.sreh >= 0.0);
                            }
                        }
                    }
                }
            }
        }
    }
}
