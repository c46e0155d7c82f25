//! Composite severe-weather discriminators.

use serde::{Deserialize, Serialize};

/// Composite indices computed from a [`super::BaseParameters`] record.
///
/// Each field is clamped independently; the ranges are listed per field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeIndices {
    /// Mixed-layer CAPE (J/kg, ≥ 0).
    pub mixed_layer_cape: f64,

    /// Supercell Composite Parameter (0-20).
    pub scp: f64,

    /// Significant Tornado Parameter (0-8).
    pub stp: f64,

    /// Moisture-enhanced 0-1 km SRH (m²/s², ≥ 0).
    pub srh_enhanced: f64,

    /// Bulk Richardson Number (0-100).
    pub brn: f64,

    /// Energy Helicity Index (0-8).
    pub ehi: f64,

    /// 700-500 mb lapse rate (°C/km, 4-12).
    pub lapse_rate_700_500: f64,

    /// 0-3 km shear (kts, ≥ 0).
    pub shear_0_3km: f64,

    /// Bunkers right-mover u component (kts).
    pub bunkers_right_u: f64,

    /// Bunkers right-mover v component (kts).
    pub bunkers_right_v: f64,

    /// Bunkers right-mover speed (kts, ≥ 0).
    pub storm_motion_speed: f64,

    /// 0-6 km mean wind (kts, ≥ 0).
    pub mean_wind_0_6km: f64,

    /// Composite Hodograph Parameter (0-10).
    pub chp: f64,

    /// Significant Hail Parameter (0-12).
    pub ship: f64,

    /// Vorticity Generation Parameter (0-5).
    pub vgp: f64,

    /// Storm-relative environmental helicity (m²/s², ≥ 0).
    pub sreh: f64,
}

impl CompositeIndices {
    /// Fixed index set returned when computation fails.
    ///
    /// BRN sits at 50 (disorganized) and the lapse rate at the
    /// moist-adiabatic-ish 6.5 °C/km; everything else is zero.
    pub const FALLBACK: CompositeIndices = CompositeIndices {
        mixed_layer_cape: 0.0,
        scp: 0.0,
        stp: 0.0,
        srh_enhanced: 0.0,
        brn: 50.0,
        ehi: 0.0,
        lapse_rate_700_500: 6.5,
        shear_0_3km: 0.0,
        bunkers_right_u: 0.0,
        bunkers_right_v: 0.0,
        storm_motion_speed: 0.0,
        mean_wind_0_6km: 0.0,
        chp: 0.0,
        ship: 0.0,
        vgp: 0.0,
        sreh: 0.0,
    };

    /// The fallback index set.
    #[must_use]
    pub fn fallback() -> Self {
        Self::FALLBACK
    }

    /// Named values in display order, for reports and status tables.
    #[must_use]
    pub fn named_values(&self) -> [(&'static str, f64); 16] {
        [
            ("Mixed_Layer_CAPE", self.mixed_layer_cape),
            ("SCP", self.scp),
            ("STP", self.stp),
            ("SRH_0_1km_Enhanced", self.srh_enhanced),
            ("BRN", self.brn),
            ("EHI", self.ehi),
            ("Lapse_Rate_700_500", self.lapse_rate_700_500),
            ("Shear_0_3km", self.shear_0_3km),
            ("Bunkers_Right_U", self.bunkers_right_u),
            ("Bunkers_Right_V", self.bunkers_right_v),
            ("Storm_Motion_Speed", self.storm_motion_speed),
            ("Mean_Wind_0_6km", self.mean_wind_0_6km),
            ("CHP", self.chp),
            ("SHIP", self.ship),
            ("VGP", self.vgp),
            ("SREH", self.sreh),
        ]
    }
}

impl Default for CompositeIndices {
    fn default() -> Self {
        Self::FALLBACK
    }
}
