//! Per-parameter status classification for reports.
//!
//! Each named parameter carries a threshold rule and, for most, an ideal
//! band. A value is classified as favorable, borderline or unfavorable for
//! severe convection; display-only parameters are neutral.

use crate::core_types::{BaseParameters, CompositeIndices};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a parameter's value is judged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThresholdRule {
    /// Favorable above the threshold, borderline above 80% of it. A value
    /// above the threshold but outside the ideal band is borderline.
    Above {
        /// Lower bound for favorable
        threshold: f64,
        /// Ideal band `(low, high)`
        ideal: Option<(f64, f64)>,
    },
    /// Favorable below the threshold, borderline below 120% of it.
    Below {
        /// Upper bound for favorable
        threshold: f64,
    },
    /// Favorable inside `[low, high]`, borderline within 100 units outside.
    Between {
        /// Lower bound
        low: f64,
        /// Upper bound
        high: f64,
    },
    /// Shown for reference, never judged.
    DisplayOnly,
}

impl ThresholdRule {
    /// Classify `value` under this rule.
    #[must_use]
    pub fn classify(self, value: f64) -> ParameterStatus {
        match self {
            Self::Above { threshold, ideal } => {
                if value > threshold {
                    match ideal {
                        Some((low, high)) if value < low || value > high => {
                            ParameterStatus::Borderline
                        }
                        _ => ParameterStatus::Favorable,
                    }
                } else if value > threshold * 0.8 {
                    ParameterStatus::Borderline
                } else {
                    ParameterStatus::Unfavorable
                }
            }
            Self::Below { threshold } => {
                if value < threshold {
                    ParameterStatus::Favorable
                } else if value < threshold * 1.2 {
                    ParameterStatus::Borderline
                } else {
                    ParameterStatus::Unfavorable
                }
            }
            Self::Between { low, high } => {
                if (low..=high).contains(&value) {
                    ParameterStatus::Favorable
                } else if (low - 100.0..low).contains(&value)
                    || (value > high && value <= high + 100.0)
                {
                    ParameterStatus::Borderline
                } else {
                    ParameterStatus::Unfavorable
                }
            }
            Self::DisplayOnly => ParameterStatus::Neutral,
        }
    }
}

/// Result of classifying one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterStatus {
    Favorable,
    Borderline,
    Unfavorable,
    /// Display-only parameter
    Neutral,
    /// Name not present in the threshold table
    Unknown,
}

impl ParameterStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Favorable => "favorable",
            Self::Borderline => "borderline",
            Self::Unfavorable => "unfavorable",
            Self::Neutral => "neutral",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ParameterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold entry for one named parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterThreshold {
    pub name: &'static str,
    pub rule: ThresholdRule,
    pub unit: &'static str,
    pub description: &'static str,
}

const fn above(threshold: f64, low: f64, high: f64) -> ThresholdRule {
    ThresholdRule::Above {
        threshold,
        ideal: Some((low, high)),
    }
}

/// Threshold table, base parameters first, then composite indices.
pub const THRESHOLDS: [ParameterThreshold; 18] = [
    ParameterThreshold {
        name: "CAPE",
        rule: above(2000.0, 2500.0, 4000.0),
        unit: "J/kg",
        description: "Surface-based convective available potential energy",
    },
    ParameterThreshold {
        name: "Dewpoint",
        rule: above(60.0, 65.0, 70.0),
        unit: "°F",
        description: "Surface dewpoint temperature",
    },
    ParameterThreshold {
        name: "Shear_0_6km",
        rule: above(40.0, 45.0, 60.0),
        unit: "kts",
        description: "Deep-layer wind shear (0-6 km)",
    },
    ParameterThreshold {
        name: "CIN",
        rule: ThresholdRule::Below { threshold: 50.0 },
        unit: "J/kg",
        description: "Convective inhibition",
    },
    ParameterThreshold {
        name: "SRH_0_1km",
        rule: above(150.0, 200.0, 400.0),
        unit: "m²/s²",
        description: "Storm-relative helicity (0-1 km)",
    },
    ParameterThreshold {
        name: "LCL_Height",
        rule: ThresholdRule::Between {
            low: 500.0,
            high: 1500.0,
        },
        unit: "m",
        description: "Lifted condensation level height",
    },
    ParameterThreshold {
        name: "Mixed_Layer_CAPE",
        rule: above(1800.0, 2200.0, 3800.0),
        unit: "J/kg",
        description: "Mixed-layer CAPE",
    },
    ParameterThreshold {
        name: "SCP",
        rule: above(4.0, 6.0, 12.0),
        unit: "",
        description: "Supercell composite parameter",
    },
    ParameterThreshold {
        name: "STP",
        rule: above(1.0, 2.0, 4.0),
        unit: "",
        description: "Significant tornado parameter",
    },
    ParameterThreshold {
        name: "SRH_0_1km_Enhanced",
        rule: above(200.0, 250.0, 450.0),
        unit: "m²/s²",
        description: "Moisture-enhanced 0-1 km storm-relative helicity",
    },
    ParameterThreshold {
        name: "BRN",
        rule: ThresholdRule::Between {
            low: 10.0,
            high: 45.0,
        },
        unit: "",
        description: "Bulk Richardson number (storm mode)",
    },
    ParameterThreshold {
        name: "EHI",
        rule: above(1.0, 2.0, 4.0),
        unit: "",
        description: "Energy-helicity index",
    },
    ParameterThreshold {
        name: "Lapse_Rate_700_500",
        rule: above(7.0, 7.5, 9.0),
        unit: "°C/km",
        description: "700-500 hPa lapse rate",
    },
    ParameterThreshold {
        name: "Shear_0_3km",
        rule: above(25.0, 30.0, 45.0),
        unit: "kts",
        description: "Low-level wind shear (0-3 km)",
    },
    ParameterThreshold {
        name: "Bunkers_Right_U",
        rule: ThresholdRule::DisplayOnly,
        unit: "kts",
        description: "Bunkers right-mover motion, U component",
    },
    ParameterThreshold {
        name: "Bunkers_Right_V",
        rule: ThresholdRule::DisplayOnly,
        unit: "kts",
        description: "Bunkers right-mover motion, V component",
    },
    ParameterThreshold {
        name: "Storm_Motion_Speed",
        rule: above(15.0, 20.0, 35.0),
        unit: "kts",
        description: "Bunkers storm motion speed",
    },
    ParameterThreshold {
        name: "Mean_Wind_0_6km",
        rule: above(20.0, 25.0, 40.0),
        unit: "kts",
        description: "Mean wind 0-6 km",
    },
];

/// Threshold entry for `name`, if any.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static ParameterThreshold> {
    THRESHOLDS.iter().find(|t| t.name == name)
}

/// Classify a named parameter value.
#[must_use]
pub fn parameter_status(name: &str, value: f64) -> ParameterStatus {
    lookup(name).map_or(ParameterStatus::Unknown, |t| t.rule.classify(value))
}

/// Status of every tabled parameter present in the two records, in table
/// order.
#[must_use]
pub fn classify_all(
    parameters: &BaseParameters,
    indices: &CompositeIndices,
) -> Vec<(&'static ParameterThreshold, f64, ParameterStatus)> {
    let values: Vec<(&str, f64)> = parameters
        .named_values()
        .into_iter()
        .chain(indices.named_values())
        .collect();

    THRESHOLDS
        .iter()
        .filter_map(|t| {
            values
                .iter()
                .find(|(name, _)| *name == t.name)
                .map(|&(_, value)| (t, value, t.rule.classify(value)))
        })
        .collect()
}

/// `(favorable, total)` over the threshold table.
#[must_use]
pub fn favorable_count(parameters: &BaseParameters, indices: &CompositeIndices) -> (usize, usize) {
    let favorable = classify_all(parameters, indices)
        .iter()
        .filter(|(_, _, status)| *status == ParameterStatus::Favorable)
        .count();
    (favorable, THRESHOLDS.len())
}
