//! Chase target value objects.

use super::{BaseParameters, CompositeIndices};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expected severity of convection at a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Significant severe weather expected
    Extreme,
    /// Strong severe weather likely
    High,
    /// Organized storms possible
    Moderate,
    /// Weak organized convection
    Marginal,
}

impl Severity {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Extreme => "Extreme",
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Marginal => "Marginal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expected convective character, paired with [`Severity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    /// Paired with [`Severity::Extreme`]
    SupercellTornadoPotential,
    /// Paired with [`Severity::High`]
    SupercellLikely,
    /// Paired with [`Severity::Moderate`]
    OrganizedConvection,
    /// Paired with [`Severity::Marginal`]
    MarginalConvection,
    /// Used only by the legacy rationale entry point
    ConvectiveTarget,
}

impl TargetType {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SupercellTornadoPotential => "Supercell with Tornado Potential",
            Self::SupercellLikely => "Supercell Likely",
            Self::OrganizedConvection => "Organized Convection",
            Self::MarginalConvection => "Marginal Convection",
            Self::ConvectiveTarget => "Convective target",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storm mode expected from the Bulk Richardson Number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StormMode {
    /// BRN in [10, 40]
    SupercellsFavored,
    /// BRN below 10
    SquallLine,
    /// BRN above 40
    DisorganizedPulse,
    /// Used only by the legacy rationale entry point
    OrganizedStorms,
}

impl StormMode {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SupercellsFavored => "Supercells Favored",
            Self::SquallLine => "Squall Line/QLCS",
            Self::DisorganizedPulse => "Disorganized/Pulse",
            Self::OrganizedStorms => "Organized storms",
        }
    }
}

impl fmt::Display for StormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Estimated storm initiation window in local (Central) time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InitiationWindow {
    /// Start hour (0-23).
    pub start_hour: u8,
    /// End hour (0-23).
    pub end_hour: u8,
}

impl InitiationWindow {
    /// Coarse step function of the current local hour.
    ///
    /// ```text
    /// hour < 14  -> 15:00-17:00
    /// hour < 17  -> 17:00-19:00
    /// otherwise  -> 19:00-21:00
    /// ```
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        if hour < 14 {
            Self {
                start_hour: 15,
                end_hour: 17,
            }
        } else if hour < 17 {
            Self {
                start_hour: 17,
                end_hour: 19,
            }
        } else {
            Self {
                start_hour: 19,
                end_hour: 21,
            }
        }
    }

    /// Window attached to the synthetic fallback target.
    pub const FALLBACK: InitiationWindow = InitiationWindow {
        start_hour: 16,
        end_hour: 18,
    };
}

impl fmt::Display for InitiationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:00-{:02}:00 CT",
            self.start_hour, self.end_hour
        )
    }
}

/// A ranked chase target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Latitude (degrees).
    pub latitude: f64,

    /// Longitude (degrees).
    pub longitude: f64,

    /// Human-readable label, e.g. `Target 3 (48mi SE)`.
    pub label: String,

    /// Severity class.
    pub severity: Severity,

    /// Chasability score (0-100).
    pub score: u8,

    /// Chase priority, 1 = go first, 3 = lowest.
    pub priority: u8,

    /// Planar distance from the base location (miles).
    pub distance_miles: f64,

    /// Estimated storm initiation window.
    pub initiation_window: InitiationWindow,

    /// Perturbed parameters at this location.
    pub parameters: BaseParameters,

    /// Composite indices at this location.
    pub indices: CompositeIndices,

    /// Convective character.
    pub target_type: TargetType,

    /// Expected storm mode.
    pub storm_mode: StormMode,

    /// Generated rationale, clauses joined with ` • `.
    pub rationale: String,

    /// Optional free-text commentary from an external annotator.
    pub narrative: Option<String>,
}

impl Target {
    /// Synthetic target returned when target generation fails outright.
    ///
    /// Placed half a degree north-east of the base location with a
    /// moderate rating so the caller still has somewhere to head.
    #[must_use]
    pub fn fallback(base_latitude: f64, base_longitude: f64) -> Self {
        Self {
            latitude: base_latitude + 0.5,
            longitude: base_longitude + 0.5,
            label: "Default Target".to_string(),
            severity: Severity::Moderate,
            score: 65,
            priority: 2,
            distance_miles: 35.0,
            initiation_window: InitiationWindow::FALLBACK,
            parameters: BaseParameters::default(),
            indices: CompositeIndices::FALLBACK,
            target_type: TargetType::OrganizedConvection,
            storm_mode: StormMode::OrganizedStorms,
            rationale: "Default target due to analysis error".to_string(),
            narrative: None,
        }
    }

    /// Copy of this target carrying `narrative`.
    #[must_use]
    pub fn with_narrative(&self, narrative: String) -> Self {
        Self {
            narrative: Some(narrative),
            ..self.clone()
        }
    }
}
