//! `#[repr(C)]` mirrors of the core value types.
//!
//! Layouts are stable for C/C++/C# consumers. Optional values use an
//! explicit `has_*` flag; strings are fixed, null-terminated buffers so no
//! memory crosses the boundary.

use std::os::raw::c_char;
use storm_chase_core::{
    BaseParameters, CompositeIndices, Fahrenheit, HectoPascals, ParameterSource, Severity,
    StormMode, SurfaceObservation, Target, TargetType,
};

use crate::helpers::write_c_string;

/// Capacity of [`StormChaseTarget::label`], including the null.
pub const STORM_CHASE_LABEL_LEN: usize = 64;

/// Capacity of [`StormChaseTarget::rationale`], including the null.
pub const STORM_CHASE_RATIONALE_LEN: usize = 512;

/// Surface observation. Missing fields are replaced by defaults.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StormChaseObservation {
    pub has_temperature: bool,
    /// Temperature (°F).
    pub temperature_f: f64,
    pub has_dewpoint: bool,
    /// Dewpoint (°F).
    pub dewpoint_f: f64,
    pub has_pressure: bool,
    /// Station pressure (hPa).
    pub pressure_hpa: f64,
}

impl From<&StormChaseObservation> for SurfaceObservation {
    fn from(obs: &StormChaseObservation) -> Self {
        let mut out = SurfaceObservation::default();
        if obs.has_temperature {
            out.temperature = Some(Fahrenheit::new(obs.temperature_f));
        }
        if obs.has_dewpoint {
            out.dewpoint = Some(Fahrenheit::new(obs.dewpoint_f));
        }
        if obs.has_pressure {
            out.pressure = Some(HectoPascals::new(obs.pressure_hpa));
        }
        out
    }
}

/// Where a parameter set came from.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormChaseParameterSource {
    CalculatedFromSurfaceObs = 0,
    SurfaceDefaults = 1,
    FallbackEstimates = 2,
    SpatialVariation = 3,
    Provided = 4,
}

impl From<ParameterSource> for StormChaseParameterSource {
    fn from(source: ParameterSource) -> Self {
        match source {
            ParameterSource::CalculatedFromSurfaceObs => Self::CalculatedFromSurfaceObs,
            ParameterSource::SurfaceDefaults => Self::SurfaceDefaults,
            ParameterSource::FallbackEstimates => Self::FallbackEstimates,
            ParameterSource::SpatialVariation => Self::SpatialVariation,
            ParameterSource::Provided => Self::Provided,
        }
    }
}

impl From<StormChaseParameterSource> for ParameterSource {
    fn from(source: StormChaseParameterSource) -> Self {
        match source {
            StormChaseParameterSource::CalculatedFromSurfaceObs => Self::CalculatedFromSurfaceObs,
            StormChaseParameterSource::SurfaceDefaults => Self::SurfaceDefaults,
            StormChaseParameterSource::FallbackEstimates => Self::FallbackEstimates,
            StormChaseParameterSource::SpatialVariation => Self::SpatialVariation,
            StormChaseParameterSource::Provided => Self::Provided,
        }
    }
}

/// Base storm parameters.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StormChaseParameters {
    /// CAPE (J/kg).
    pub cape: f64,
    /// CIN (J/kg).
    pub cin: f64,
    /// Dewpoint (°F).
    pub dewpoint: f64,
    /// 0-6 km shear (kts).
    pub shear_0_6km: f64,
    /// 0-1 km SRH (m²/s²).
    pub srh_0_1km: f64,
    /// LCL height (m).
    pub lcl_height: f64,
    pub has_mixing_ratio: bool,
    /// Mixing ratio (g/kg).
    pub mixing_ratio: f64,
    pub source: StormChaseParameterSource,
}

impl From<&BaseParameters> for StormChaseParameters {
    fn from(p: &BaseParameters) -> Self {
        Self {
            cape: p.cape,
            cin: p.cin,
            dewpoint: p.dewpoint,
            shear_0_6km: p.shear_0_6km,
            srh_0_1km: p.srh_0_1km,
            lcl_height: p.lcl_height,
            has_mixing_ratio: p.mixing_ratio.is_some(),
            mixing_ratio: p.mixing_ratio.unwrap_or(0.0),
            source: p.source.into(),
        }
    }
}

impl From<&StormChaseParameters> for BaseParameters {
    fn from(p: &StormChaseParameters) -> Self {
        Self {
            cape: p.cape,
            cin: p.cin,
            dewpoint: p.dewpoint,
            shear_0_6km: p.shear_0_6km,
            srh_0_1km: p.srh_0_1km,
            lcl_height: p.lcl_height,
            mixing_ratio: p.has_mixing_ratio.then_some(p.mixing_ratio),
            source: p.source.into(),
        }
    }
}

/// Composite severe-weather indices.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StormChaseIndices {
    pub mixed_layer_cape: f64,
    pub scp: f64,
    pub stp: f64,
    pub srh_enhanced: f64,
    pub brn: f64,
    pub ehi: f64,
    pub lapse_rate_700_500: f64,
    pub shear_0_3km: f64,
    pub bunkers_right_u: f64,
    pub bunkers_right_v: f64,
    pub storm_motion_speed: f64,
    pub mean_wind_0_6km: f64,
    pub chp: f64,
    pub ship: f64,
    pub vgp: f64,
    pub sreh: f64,
}

impl From<&CompositeIndices> for StormChaseIndices {
    fn from(i: &CompositeIndices) -> Self {
        Self {
            mixed_layer_cape: i.mixed_layer_cape,
            scp: i.scp,
            stp: i.stp,
            srh_enhanced: i.srh_enhanced,
            brn: i.brn,
            ehi: i.ehi,
            lapse_rate_700_500: i.lapse_rate_700_500,
            shear_0_3km: i.shear_0_3km,
            bunkers_right_u: i.bunkers_right_u,
            bunkers_right_v: i.bunkers_right_v,
            storm_motion_speed: i.storm_motion_speed,
            mean_wind_0_6km: i.mean_wind_0_6km,
            chp: i.chp,
            ship: i.ship,
            vgp: i.vgp,
            sreh: i.sreh,
        }
    }
}

impl From<&StormChaseIndices> for CompositeIndices {
    fn from(i: &StormChaseIndices) -> Self {
        Self {
            mixed_layer_cape: i.mixed_layer_cape,
            scp: i.scp,
            stp: i.stp,
            srh_enhanced: i.srh_enhanced,
            brn: i.brn,
            ehi: i.ehi,
            lapse_rate_700_500: i.lapse_rate_700_500,
            shear_0_3km: i.shear_0_3km,
            bunkers_right_u: i.bunkers_right_u,
            bunkers_right_v: i.bunkers_right_v,
            storm_motion_speed: i.storm_motion_speed,
            mean_wind_0_6km: i.mean_wind_0_6km,
            chp: i.chp,
            ship: i.ship,
            vgp: i.vgp,
            sreh: i.sreh,
        }
    }
}

/// Target severity, most severe first.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormChaseSeverity {
    Extreme = 0,
    High = 1,
    Moderate = 2,
    Marginal = 3,
}

impl From<Severity> for StormChaseSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Extreme => Self::Extreme,
            Severity::High => Self::High,
            Severity::Moderate => Self::Moderate,
            Severity::Marginal => Self::Marginal,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormChaseTargetType {
    SupercellTornadoPotential = 0,
    SupercellLikely = 1,
    OrganizedConvection = 2,
    MarginalConvection = 3,
    ConvectiveTarget = 4,
}

impl From<TargetType> for StormChaseTargetType {
    fn from(target_type: TargetType) -> Self {
        match target_type {
            TargetType::SupercellTornadoPotential => Self::SupercellTornadoPotential,
            TargetType::SupercellLikely => Self::SupercellLikely,
            TargetType::OrganizedConvection => Self::OrganizedConvection,
            TargetType::MarginalConvection => Self::MarginalConvection,
            TargetType::ConvectiveTarget => Self::ConvectiveTarget,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormChaseStormMode {
    SupercellsFavored = 0,
    SquallLine = 1,
    DisorganizedPulse = 2,
    OrganizedStorms = 3,
}

impl From<StormMode> for StormChaseStormMode {
    fn from(mode: StormMode) -> Self {
        match mode {
            StormMode::SupercellsFavored => Self::SupercellsFavored,
            StormMode::SquallLine => Self::SquallLine,
            StormMode::DisorganizedPulse => Self::DisorganizedPulse,
            StormMode::OrganizedStorms => Self::OrganizedStorms,
        }
    }
}

/// One ranked chase target.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StormChaseTarget {
    pub latitude: f64,
    pub longitude: f64,
    /// Null-terminated UTF-8 label, e.g. `Target 3 (48mi SE)`.
    pub label: [c_char; STORM_CHASE_LABEL_LEN],
    pub severity: StormChaseSeverity,
    /// Chasability score (0-100).
    pub score: u8,
    /// 1 = go first, 3 = lowest.
    pub priority: u8,
    pub distance_miles: f64,
    /// Initiation window start hour, local Central time.
    pub initiation_start_hour: u8,
    pub initiation_end_hour: u8,
    pub parameters: StormChaseParameters,
    pub indices: StormChaseIndices,
    pub target_type: StormChaseTargetType,
    pub storm_mode: StormChaseStormMode,
    /// Null-terminated UTF-8 rationale, truncated to fit.
    pub rationale: [c_char; STORM_CHASE_RATIONALE_LEN],
}

impl From<&Target> for StormChaseTarget {
    fn from(t: &Target) -> Self {
        let mut label = [0; STORM_CHASE_LABEL_LEN];
        write_c_string(&t.label, &mut label);
        let mut rationale = [0; STORM_CHASE_RATIONALE_LEN];
        write_c_string(&t.rationale, &mut rationale);

        Self {
            latitude: t.latitude,
            longitude: t.longitude,
            label,
            severity: t.severity.into(),
            score: t.score,
            priority: t.priority,
            distance_miles: t.distance_miles,
            initiation_start_hour: t.initiation_window.start_hour,
            initiation_end_hour: t.initiation_window.end_hour,
            parameters: (&t.parameters).into(),
            indices: (&t.indices).into(),
            target_type: t.target_type.into(),
            storm_mode: t.storm_mode.into(),
            rationale,
        }
    }
}
