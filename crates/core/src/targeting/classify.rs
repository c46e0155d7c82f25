//! Severity, priority and storm-mode classification of a scored cell.

use crate::core_types::{CompositeIndices, Severity, StormMode, TargetType};

/// Lowest chase priority.
pub const LOWEST_PRIORITY: u8 = 3;

/// Classification of one scored location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub severity: Severity,
    pub target_type: TargetType,
    pub storm_mode: StormMode,
    /// 1 = go first, 3 = lowest
    pub priority: u8,
}

/// Severity, base priority and target type from score and composites.
///
/// ```text
/// score ≥ 85 or (SCP ≥ 6 and STP ≥ 2) or EHI ≥ 3     Extreme  / 1
/// score ≥ 75 or (SCP ≥ 3 and STP ≥ 1) or EHI ≥ 1.5   High     / 1
/// score ≥ 65 or (SCP ≥ 1.5 and STP ≥ 0.5)            Moderate / 2
/// otherwise                                          Marginal / 3
/// ```
#[must_use]
pub fn severity(score: u8, indices: &CompositeIndices) -> (Severity, u8, TargetType) {
    let CompositeIndices { scp, stp, ehi, .. } = *indices;

    if score >= 85 || (scp >= 6.0 && stp >= 2.0) || ehi >= 3.0 {
        (Severity::Extreme, 1, TargetType::SupercellTornadoPotential)
    } else if score >= 75 || (scp >= 3.0 && stp >= 1.0) || ehi >= 1.5 {
        (Severity::High, 1, TargetType::SupercellLikely)
    } else if score >= 65 || (scp >= 1.5 && stp >= 0.5) {
        (Severity::Moderate, 2, TargetType::OrganizedConvection)
    } else {
        (Severity::Marginal, LOWEST_PRIORITY, TargetType::MarginalConvection)
    }
}

/// Storm mode from the Bulk Richardson Number.
#[must_use]
pub fn storm_mode(brn: f64) -> StormMode {
    if (10.0..=40.0).contains(&brn) {
        StormMode::SupercellsFavored
    } else if brn < 10.0 {
        StormMode::SquallLine
    } else {
        StormMode::DisorganizedPulse
    }
}

/// Priority after accounting for storm mode.
///
/// Linear modes are demoted one step; pulse storms go straight to the
/// bottom.
#[must_use]
pub fn adjust_priority(priority: u8, mode: StormMode) -> u8 {
    match mode {
        StormMode::SquallLine if priority < LOWEST_PRIORITY => priority + 1,
        StormMode::DisorganizedPulse => LOWEST_PRIORITY,
        _ => priority,
    }
}

/// Full classification of a scored cell.
#[must_use]
pub fn classify(score: u8, indices: &CompositeIndices) -> Classification {
    let (severity, base_priority, target_type) = severity(score, indices);
    let storm_mode = storm_mode(indices.brn);
    Classification {
        severity,
        target_type,
        storm_mode,
        priority: adjust_priority(base_priority, storm_mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(scp: f64, stp: f64, ehi: f64, brn: f64) -> CompositeIndices {
        CompositeIndices {
            scp,
            stp,
            ehi,
            brn,
            ..CompositeIndices::FALLBACK
        }
    }

    #[test]
    fn severity_tiers_by_score() {
        let quiet = indices(0.0, 0.0, 0.0, 25.0);
        assert_eq!(severity(90, &quiet).0, Severity::Extreme);
        assert_eq!(severity(80, &quiet).0, Severity::High);
        assert_eq!(severity(70, &quiet).0, Severity::Moderate);
        assert_eq!(severity(60, &quiet).0, Severity::Marginal);
    }

    #[test]
    fn composites_can_promote_a_low_score() {
        assert_eq!(severity(60, &indices(6.0, 2.0, 0.0, 25.0)).0, Severity::Extreme);
        assert_eq!(severity(60, &indices(0.0, 0.0, 3.0, 25.0)).0, Severity::Extreme);
        assert_eq!(severity(60, &indices(3.0, 1.0, 0.0, 25.0)).0, Severity::High);
        assert_eq!(severity(60, &indices(0.0, 0.0, 1.5, 25.0)).0, Severity::High);
        assert_eq!(severity(60, &indices(1.5, 0.5, 0.0, 25.0)).0, Severity::Moderate);
    }

    #[test]
    fn storm_mode_bands() {
        assert_eq!(storm_mode(10.0), StormMode::SupercellsFavored);
        assert_eq!(storm_mode(40.0), StormMode::SupercellsFavored);
        assert_eq!(storm_mode(9.9), StormMode::SquallLine);
        assert_eq!(storm_mode(45.0), StormMode::DisorganizedPulse);
    }

    #[test]
    fn squall_line_demotes_but_never_below_lowest() {
        assert_eq!(adjust_priority(1, StormMode::SquallLine), 2);
        assert_eq!(adjust_priority(2, StormMode::SquallLine), 3);
        assert_eq!(adjust_priority(3, StormMode::SquallLine), 3);
        assert_eq!(adjust_priority(1, StormMode::DisorganizedPulse), 3);
        assert_eq!(adjust_priority(1, StormMode::SupercellsFavored), 1);
    }

    #[test]
    fn classify_combines_tiers_and_mode() {
        let c = classify(84, &indices(13.77, 5.94, 6.2, 8.2));
        assert_eq!(c.severity, Severity::Extreme);
        assert_eq!(c.target_type, TargetType::SupercellTornadoPotential);
        assert_eq!(c.storm_mode, StormMode::SquallLine);
        assert_eq!(c.priority, 2);
    }
}
