//! Chasability score (0-100).
//!
//! Additive point buckets over threshold ladders, a capped bonus pool, a
//! geographic prior for the classic Plains corridors, and two quality-control
//! caps that stop a single extreme ingredient from inflating a marginal
//! environment.
//!
//! ```text
//! core ingredients      MLCAPE 20 · shear 15 · low-level shear 10
//!                       dewpoint 10 · CIN 5                          (60)
//! composites            SCP 10 · STP 10 · BRN 5                      (25)
//! bonus (capped at 15)  SRH 5 · EHI 3 · lapse 3 · motion 2 · SHIP 2
//!                       + one geographic region (1-3)
//! ```

use crate::core_types::{BaseParameters, CompositeIndices};
use crate::error::ComputeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Score returned when the computation itself fails.
pub const NEUTRAL_SCORE: u8 = 50;

/// Maximum contribution of the bonus pool.
pub const MAX_BONUS: u32 = 15;

// Ladders are (threshold, points), checked top-down; first match wins.
const MLCAPE_LADDER: [(f64, u8); 6] = [
    (4000.0, 20),
    (3000.0, 18),
    (2500.0, 15),
    (2000.0, 12),
    (1500.0, 8),
    (1000.0, 4),
];
const DEEP_SHEAR_LADDER: [(f64, u8); 5] =
    [(60.0, 15), (50.0, 13), (40.0, 11), (30.0, 8), (20.0, 5)];
const LOW_LEVEL_SHEAR_LADDER: [(f64, u8); 4] = [(35.0, 10), (25.0, 8), (20.0, 6), (15.0, 4)];
const DEWPOINT_LADDER: [(f64, u8); 5] = [(70.0, 10), (65.0, 8), (60.0, 6), (55.0, 4), (50.0, 2)];
// Inverse ladder: value must be at or below the threshold
const CIN_LADDER: [(f64, u8); 4] = [(15.0, 5), (30.0, 4), (50.0, 3), (75.0, 1)];
const SCP_LADDER: [(f64, u8); 5] = [(8.0, 10), (6.0, 8), (4.0, 6), (2.0, 4), (1.0, 2)];
const STP_LADDER: [(f64, u8); 5] = [(4.0, 10), (3.0, 8), (2.0, 6), (1.0, 4), (0.5, 2)];

const SRH_BONUS_LADDER: [(f64, u8); 5] =
    [(400.0, 5), (300.0, 4), (200.0, 3), (150.0, 2), (100.0, 1)];
const EHI_BONUS_LADDER: [(f64, u8); 3] = [(3.0, 3), (2.0, 2), (1.0, 1)];
const LAPSE_BONUS_LADDER: [(f64, u8); 3] = [(8.5, 3), (7.5, 2), (7.0, 1)];
const SHIP_BONUS_LADDER: [(f64, u8); 2] = [(4.0, 2), (2.0, 1)];

/// Points for the highest threshold that `value` meets or exceeds.
fn at_least(value: f64, ladder: &[(f64, u8)]) -> u8 {
    ladder
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map_or(0, |(_, points)| *points)
}

/// Points for the lowest threshold that `value` does not exceed.
fn at_most(value: f64, ladder: &[(f64, u8)]) -> u8 {
    ladder
        .iter()
        .find(|(threshold, _)| value <= *threshold)
        .map_or(0, |(_, points)| *points)
}

/// BRN storm-mode points: 5 in the supercell band, 3 for organized storms,
/// 1 for linear mode, 0 above 50.
fn brn_points(brn: f64) -> u8 {
    if (15.0..=40.0).contains(&brn) {
        5
    } else if (10.0..=50.0).contains(&brn) {
        3
    } else if brn < 10.0 {
        1
    } else {
        0
    }
}

/// Storm-motion bonus: 2 in the 20-35 kt band, 1 in 15-45 kt.
fn storm_motion_points(speed: f64) -> u8 {
    if (20.0..=35.0).contains(&speed) {
        2
    } else if (15.0..=45.0).contains(&speed) {
        1
    } else {
        0
    }
}

/// Plains corridors that receive a climatological bonus.
///
/// The boxes overlap; [`GeographicRegion::locate`] checks them in
/// declaration order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeographicRegion {
    /// 40-42.5°N, 104-95°W
    NebraskaCorridor,
    /// 36-40°N, 102-94°W
    KansasStormAlley,
    /// 33-37°N, 103-95°W
    OklahomaTexasPanhandle,
    /// 37-41°N, 99-90°W
    MissouriIowaCorridor,
}

impl GeographicRegion {
    /// Regions in priority order.
    pub const ALL: [GeographicRegion; 4] = [
        Self::NebraskaCorridor,
        Self::KansasStormAlley,
        Self::OklahomaTexasPanhandle,
        Self::MissouriIowaCorridor,
    ];

    /// Bounding box as `(lat_min, lat_max, lon_min, lon_max)`, inclusive.
    #[must_use]
    pub const fn bounds(self) -> (f64, f64, f64, f64) {
        match self {
            Self::NebraskaCorridor => (40.0, 42.5, -104.0, -95.0),
            Self::KansasStormAlley => (36.0, 40.0, -102.0, -94.0),
            Self::OklahomaTexasPanhandle => (33.0, 37.0, -103.0, -95.0),
            Self::MissouriIowaCorridor => (37.0, 41.0, -99.0, -90.0),
        }
    }

    /// Bonus points for targets inside this region.
    #[must_use]
    pub const fn bonus(self) -> u8 {
        match self {
            Self::NebraskaCorridor => 3,
            Self::KansasStormAlley | Self::OklahomaTexasPanhandle => 2,
            Self::MissouriIowaCorridor => 1,
        }
    }

    /// Whether the point lies inside this region's box.
    #[must_use]
    pub fn contains(self, latitude: f64, longitude: f64) -> bool {
        let (lat_min, lat_max, lon_min, lon_max) = self.bounds();
        (lat_min..=lat_max).contains(&latitude) && (lon_min..=lon_max).contains(&longitude)
    }

    /// First region in priority order containing the point.
    #[must_use]
    pub fn locate(latitude: f64, longitude: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|region| region.contains(latitude, longitude))
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NebraskaCorridor => "Nebraska storm corridor",
            Self::KansasStormAlley => "Kansas storm alley",
            Self::OklahomaTexasPanhandle => "Oklahoma/Texas panhandle",
            Self::MissouriIowaCorridor => "Missouri/Iowa corridor",
        }
    }
}

impl fmt::Display for GeographicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Quality-control cap applied to an internally inconsistent environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityCap {
    /// MLCAPE < 1000 and deep shear < 20 kt: score capped at 30.
    MarginalEnvironment,
    /// SCP < 1 and STP < 0.5: score capped at 50.
    PoorComposites,
}

impl QualityCap {
    /// Maximum score allowed under this cap.
    #[must_use]
    pub const fn limit(self) -> u32 {
        match self {
            Self::MarginalEnvironment => 30,
            Self::PoorComposites => 50,
        }
    }
}

/// Per-bucket explanation of a chasability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Mixed-layer CAPE points (0-20).
    pub instability: u8,
    /// Deep-layer shear points (0-15).
    pub deep_shear: u8,
    /// 0-3 km shear points (0-10).
    pub low_level_shear: u8,
    /// Dewpoint points (0-10).
    pub moisture: u8,
    /// CIN points (0-5).
    pub capping: u8,
    /// SCP points (0-10).
    pub supercell: u8,
    /// STP points (0-10).
    pub tornado: u8,
    /// BRN points (0-5).
    pub storm_mode: u8,
    /// Enhanced SRH bonus (0-5).
    pub helicity_bonus: u8,
    /// EHI bonus (0-3).
    pub ehi_bonus: u8,
    /// Lapse-rate bonus (0-3).
    pub lapse_rate_bonus: u8,
    /// Storm-motion bonus (0-2).
    pub storm_motion_bonus: u8,
    /// SHIP bonus (0-2).
    pub hail_bonus: u8,
    /// Region that supplied the geographic bonus, if any.
    pub region: Option<GeographicRegion>,
    /// Quality-control cap whose condition held, if any.
    pub quality_cap: Option<QualityCap>,
    /// Final score (0-100).
    pub score: u8,
    /// Whether the neutral fallback score was returned.
    pub is_fallback: bool,
}

impl ScoreBreakdown {
    /// Breakdown returned when scoring fails.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            score: NEUTRAL_SCORE,
            is_fallback: true,
            ..Self::default()
        }
    }

    /// Sum of the eight base buckets (0-85).
    #[must_use]
    pub fn base_points(&self) -> u32 {
        [
            self.instability,
            self.deep_shear,
            self.low_level_shear,
            self.moisture,
            self.capping,
            self.supercell,
            self.tornado,
            self.storm_mode,
        ]
        .iter()
        .map(|&p| u32::from(p))
        .sum()
    }

    /// Bonus pool before the cap.
    #[must_use]
    pub fn raw_bonus(&self) -> u32 {
        [
            self.helicity_bonus,
            self.ehi_bonus,
            self.lapse_rate_bonus,
            self.storm_motion_bonus,
            self.hail_bonus,
            self.region.map_or(0, GeographicRegion::bonus),
        ]
        .iter()
        .map(|&p| u32::from(p))
        .sum()
    }

    /// Bonus pool after the cap.
    #[must_use]
    pub fn capped_bonus(&self) -> u32 {
        self.raw_bonus().min(MAX_BONUS)
    }
}

/// Chasability score (0-100) at a location.
#[must_use]
pub fn score_chasability(
    parameters: &BaseParameters,
    indices: &CompositeIndices,
    latitude: f64,
    longitude: f64,
) -> u8 {
    score_breakdown(parameters, indices, latitude, longitude).score
}

/// Chasability score with the points contributed by every bucket.
///
/// Any non-finite input yields [`ScoreBreakdown::neutral`] (score 50).
#[must_use]
pub fn score_breakdown(
    parameters: &BaseParameters,
    indices: &CompositeIndices,
    latitude: f64,
    longitude: f64,
) -> ScoreBreakdown {
    match try_score(parameters, indices, latitude, longitude) {
        Ok(breakdown) => breakdown,
        Err(e) => {
            warn!("Chasability scoring failed, returning neutral score: {e}");
            ScoreBreakdown::neutral()
        }
    }
}

fn try_score(
    p: &BaseParameters,
    i: &CompositeIndices,
    latitude: f64,
    longitude: f64,
) -> Result<ScoreBreakdown, ComputeError> {
    let ml_cape = ComputeError::check("mixed_layer_cape", i.mixed_layer_cape)?;
    let shear_0_6 = ComputeError::check("shear_0_6km", p.shear_0_6km)?;
    let shear_0_3 = ComputeError::check("shear_0_3km", i.shear_0_3km)?;
    let dewpoint = ComputeError::check("dewpoint", p.dewpoint)?;
    let cin = ComputeError::check("cin", p.cin)?;
    let scp = ComputeError::check("scp", i.scp)?;
    let stp = ComputeError::check("stp", i.stp)?;
    let brn = ComputeError::check("brn", i.brn)?;
    let srh_enhanced = ComputeError::check("srh_enhanced", i.srh_enhanced)?;
    let ehi = ComputeError::check("ehi", i.ehi)?;
    let lapse = ComputeError::check("lapse_rate_700_500", i.lapse_rate_700_500)?;
    let speed = ComputeError::check("storm_motion_speed", i.storm_motion_speed)?;
    let ship = ComputeError::check("ship", i.ship)?;
    ComputeError::check("latitude", latitude)?;
    ComputeError::check("longitude", longitude)?;

    let mut breakdown = ScoreBreakdown {
        instability: at_least(ml_cape, &MLCAPE_LADDER),
        deep_shear: at_least(shear_0_6, &DEEP_SHEAR_LADDER),
        low_level_shear: at_least(shear_0_3, &LOW_LEVEL_SHEAR_LADDER),
        moisture: at_least(dewpoint, &DEWPOINT_LADDER),
        capping: at_most(cin, &CIN_LADDER),
        supercell: at_least(scp, &SCP_LADDER),
        tornado: at_least(stp, &STP_LADDER),
        storm_mode: brn_points(brn),
        helicity_bonus: at_least(srh_enhanced, &SRH_BONUS_LADDER),
        ehi_bonus: at_least(ehi, &EHI_BONUS_LADDER),
        lapse_rate_bonus: at_least(lapse, &LAPSE_BONUS_LADDER),
        storm_motion_bonus: storm_motion_points(speed),
        hail_bonus: at_least(ship, &SHIP_BONUS_LADDER),
        region: GeographicRegion::locate(latitude, longitude),
        quality_cap: None,
        score: 0,
        is_fallback: false,
    };

    let mut total = breakdown.base_points() + breakdown.capped_bonus();

    breakdown.quality_cap = if ml_cape < 1000.0 && shear_0_6 < 20.0 {
        Some(QualityCap::MarginalEnvironment)
    } else if scp < 1.0 && stp < 0.5 {
        Some(QualityCap::PoorComposites)
    } else {
        None
    };
    if let Some(cap) = breakdown.quality_cap {
        total = total.min(cap.limit());
    }

    breakdown.score = total.min(100) as u8;
    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::compute_composite_indices;

    fn scored(p: &BaseParameters, lat: f64, lon: f64) -> ScoreBreakdown {
        score_breakdown(p, &compute_composite_indices(p), lat, lon)
    }

    #[test]
    fn ladders_pick_highest_threshold_met() {
        assert_eq!(at_least(4200.0, &MLCAPE_LADDER), 20);
        assert_eq!(at_least(3000.0, &MLCAPE_LADDER), 18);
        assert_eq!(at_least(999.0, &MLCAPE_LADDER), 0);
        assert_eq!(at_most(10.0, &CIN_LADDER), 5);
        assert_eq!(at_most(50.0, &CIN_LADDER), 3);
        assert_eq!(at_most(76.0, &CIN_LADDER), 0);
    }

    #[test]
    fn brn_bands() {
        assert_eq!(brn_points(25.0), 5);
        assert_eq!(brn_points(12.0), 3);
        assert_eq!(brn_points(45.0), 3);
        assert_eq!(brn_points(5.0), 1);
        assert_eq!(brn_points(60.0), 0);
    }

    #[test]
    fn storm_motion_bands() {
        assert_eq!(storm_motion_points(25.0), 2);
        assert_eq!(storm_motion_points(16.0), 1);
        assert_eq!(storm_motion_points(50.0), 0);
    }

    #[test]
    fn geographic_first_match_wins() {
        // 40.0N 97W sits in Nebraska, Kansas and Missouri/Iowa boxes
        assert_eq!(
            GeographicRegion::locate(40.0, -97.0),
            Some(GeographicRegion::NebraskaCorridor)
        );
        // 36.5N 98W sits in Kansas and Oklahoma boxes
        assert_eq!(
            GeographicRegion::locate(36.5, -98.0),
            Some(GeographicRegion::KansasStormAlley)
        );
        assert_eq!(
            GeographicRegion::locate(34.0, -100.0),
            Some(GeographicRegion::OklahomaTexasPanhandle)
        );
        assert_eq!(
            GeographicRegion::locate(38.0, -92.0),
            Some(GeographicRegion::MissouriIowaCorridor)
        );
        assert_eq!(GeographicRegion::locate(45.0, -80.0), None);
    }

    #[test]
    fn kansas_scenario_breakdown() {
        let p = BaseParameters::new(3000.0, 68.0, 50.0, 20.0, 300.0, 900.0);
        let b = scored(&p, 38.8, -97.5);
        assert_eq!(b.instability, 15);
        assert_eq!(b.deep_shear, 13);
        assert_eq!(b.low_level_shear, 8);
        assert_eq!(b.moisture, 8);
        assert_eq!(b.capping, 4);
        assert_eq!(b.supercell, 10);
        assert_eq!(b.tornado, 10);
        assert_eq!(b.storm_mode, 1);
        assert_eq!(b.base_points(), 69);
        assert_eq!(b.region, Some(GeographicRegion::KansasStormAlley));
        assert_eq!(b.raw_bonus(), 16);
        assert_eq!(b.capped_bonus(), 15);
        assert_eq!(b.quality_cap, None);
        assert_eq!(b.score, 84);
    }

    #[test]
    fn marginal_environment_is_capped_at_30() {
        let p = BaseParameters::new(400.0, 45.0, 12.0, 180.0, 60.0, 2200.0);
        let b = scored(&p, 38.8, -97.5);
        assert_eq!(b.quality_cap, Some(QualityCap::MarginalEnvironment));
        assert!(b.score <= 30);
    }

    #[test]
    fn poor_composites_cap_at_50() {
        // Plenty of CAPE and shear, but a strong cap kills SCP/STP
        let p = BaseParameters::new(4500.0, 72.0, 65.0, 150.0, 450.0, 900.0);
        let b = scored(&p, 41.0, -100.0);
        assert_eq!(b.quality_cap, Some(QualityCap::PoorComposites));
        assert!(b.score <= 50);
    }

    #[test]
    fn all_zero_inputs_score_in_range() {
        let p = BaseParameters::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let zeros = CompositeIndices {
            brn: 0.0,
            lapse_rate_700_500: 0.0,
            ..CompositeIndices::FALLBACK
        };
        let score = score_chasability(&p, &zeros, 0.0, 0.0);
        assert!(score <= 100);
    }

    #[test]
    fn non_finite_inputs_return_neutral() {
        let p = BaseParameters::new(3000.0, 68.0, 50.0, 20.0, 300.0, 900.0);
        let i = compute_composite_indices(&p);
        let b = score_breakdown(&p, &i, f64::NAN, -97.5);
        assert!(b.is_fallback);
        assert_eq!(b.score, NEUTRAL_SCORE);

        let mut bad = i;
        bad.scp = f64::INFINITY;
        assert_eq!(score_chasability(&p, &bad, 38.8, -97.5), NEUTRAL_SCORE);
    }

    #[test]
    fn score_is_monotonic_in_mixed_layer_cape() {
        let p = BaseParameters::new(2000.0, 66.0, 45.0, 25.0, 250.0, 1000.0);
        let base = compute_composite_indices(&p);
        let mut previous = 0;
        for step in 0..=120 {
            let indices = CompositeIndices {
                mixed_layer_cape: f64::from(step) * 50.0,
                ..base
            };
            let score = score_chasability(&p, &indices, 38.8, -97.5);
            assert!(
                score >= previous,
                "score fell from {previous} to {score} at MLCAPE {}",
                indices.mixed_layer_cape
            );
            previous = score;
        }
    }
}
