//! Human-readable rationale for a chase target.
//!
//! Clauses are drawn from a fixed catalogue in priority order and the first
//! [`MAX_CLAUSES`] that apply are joined with [`CLAUSE_SEPARATOR`].

use crate::core_types::{BaseParameters, CompositeIndices, StormMode, TargetType};

/// Number of clauses kept.
pub const MAX_CLAUSES: usize = 4;

pub const CLAUSE_SEPARATOR: &str = " • ";

/// Rationale for a classified target.
///
/// Falls back to `"{type} • Score: {score}"` when any input the catalogue
/// reads is not finite.
#[must_use]
pub fn target_rationale(
    parameters: &BaseParameters,
    indices: &CompositeIndices,
    storm_mode: StormMode,
    target_type: TargetType,
    score: u8,
) -> String {
    let inputs = [
        indices.mixed_layer_cape,
        indices.shear_0_3km,
        indices.scp,
        indices.stp,
        indices.ehi,
        indices.brn,
        indices.lapse_rate_700_500,
        indices.storm_motion_speed,
        parameters.shear_0_6km,
        parameters.dewpoint,
        parameters.cin,
    ];
    if inputs.iter().any(|v| !v.is_finite()) {
        return format!("{target_type}{CLAUSE_SEPARATOR}Score: {score}");
    }

    clauses(parameters, indices, storm_mode, target_type)
        .into_iter()
        .take(MAX_CLAUSES)
        .collect::<Vec<_>>()
        .join(CLAUSE_SEPARATOR)
}

/// Rationale with the generic target type and storm mode, for callers
/// that score a single location without classifying it.
#[must_use]
pub fn legacy_rationale(parameters: &BaseParameters, indices: &CompositeIndices, score: u8) -> String {
    target_rationale(
        parameters,
        indices,
        StormMode::OrganizedStorms,
        TargetType::ConvectiveTarget,
        score,
    )
}

fn clauses(
    p: &BaseParameters,
    i: &CompositeIndices,
    storm_mode: StormMode,
    target_type: TargetType,
) -> Vec<String> {
    let mut out = vec![format!("{target_type}{CLAUSE_SEPARATOR}{storm_mode}")];

    let (scp, stp) = (i.scp, i.stp);
    if scp >= 6.0 && stp >= 2.0 {
        out.push(format!(
            "Exceptional supercell/tornado environment (SCP:{scp:.1}, STP:{stp:.1})"
        ));
    } else if scp >= 3.0 && stp >= 1.0 {
        out.push(format!("Strong supercell environment (SCP:{scp:.1}, STP:{stp:.1})"));
    } else if scp >= 1.5 {
        out.push(format!("Supercell possible (SCP:{scp:.1})"));
    }

    let ml_cape = i.mixed_layer_cape;
    if ml_cape >= 3500.0 {
        out.push(format!("Extreme instability (ML-CAPE: {ml_cape:.0} J/kg)"));
    } else if ml_cape >= 2500.0 {
        out.push(format!("Very high instability (ML-CAPE: {ml_cape:.0} J/kg)"));
    } else if ml_cape >= 2000.0 {
        out.push(format!("High instability (ML-CAPE: {ml_cape:.0} J/kg)"));
    }

    let (deep, low) = (p.shear_0_6km, i.shear_0_3km);
    if deep >= 50.0 && low >= 25.0 {
        out.push(format!(
            "Excellent shear profile ({deep:.0}kt deep, {low:.0}kt low-level)"
        ));
    } else if deep >= 40.0 {
        out.push(format!("Strong deep shear ({deep:.0} kts)"));
    } else if low >= 25.0 {
        out.push(format!("Good low-level shear ({low:.0} kts)"));
    }

    let brn = i.brn;
    if (15.0..=35.0).contains(&brn) {
        out.push(format!("Optimal supercell BRN ({brn:.0})"));
    } else if brn < 15.0 {
        out.push(format!("Linear storm mode favored (BRN:{brn:.0})"));
    } else if brn > 45.0 {
        out.push(format!("Pulse storm risk (BRN:{brn:.0})"));
    }

    let ehi = i.ehi;
    if ehi >= 2.0 {
        out.push(format!("High tornado potential (EHI:{ehi:.1})"));
    } else if ehi >= 1.0 {
        out.push(format!("Tornado possible (EHI:{ehi:.1})"));
    }

    let dewpoint = p.dewpoint;
    if dewpoint >= 65.0 {
        out.push(format!("Excellent moisture ({dewpoint:.0}°F)"));
    } else if dewpoint >= 60.0 {
        out.push(format!("Good moisture ({dewpoint:.0}°F)"));
    }

    let lapse = i.lapse_rate_700_500;
    if lapse >= 8.0 {
        out.push(format!("Steep lapse rate ({lapse:.1}°C/km)"));
    }

    if p.cin <= 25.0 {
        out.push("Easy storm initiation (low cap)".to_string());
    } else if p.cin <= 50.0 {
        out.push("Focused initiation (moderate cap)".to_string());
    }

    let speed = i.storm_motion_speed;
    if (20.0..=35.0).contains(&speed) {
        out.push(format!("Optimal storm motion ({speed:.0} kts)"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::compute_composite_indices;

    fn kansas() -> (BaseParameters, CompositeIndices) {
        let p = BaseParameters::new(3000.0, 68.0, 50.0, 20.0, 300.0, 900.0);
        let i = compute_composite_indices(&p);
        (p, i)
    }

    #[test]
    fn keeps_first_four_clauses_in_catalogue_order() {
        let (p, i) = kansas();
        let text = target_rationale(
            &p,
            &i,
            StormMode::SquallLine,
            TargetType::SupercellTornadoPotential,
            84,
        );
        assert!(text.starts_with(
            "Supercell with Tornado Potential • Squall Line/QLCS • \
             Exceptional supercell/tornado environment (SCP:13.8, STP:5.9) • \
             Very high instability (ML-CAPE: 2700 J/kg) • \
             Excellent shear profile (50kt deep, "
        ));
        assert!(!text.contains("EHI"));
        // type•mode counts as a single clause
        assert_eq!(text.split(CLAUSE_SEPARATOR).count(), MAX_CLAUSES + 1);
    }

    #[test]
    fn weak_environment_skips_inapplicable_clauses() {
        let p = BaseParameters::new(400.0, 45.0, 12.0, 180.0, 60.0, 2200.0);
        let i = compute_composite_indices(&p);
        let text = target_rationale(
            &p,
            &i,
            StormMode::DisorganizedPulse,
            TargetType::MarginalConvection,
            20,
        );
        assert!(text.starts_with("Marginal Convection • Disorganized/Pulse"));
        assert!(!text.contains("instability"));
        assert!(!text.contains("moisture"));
    }

    #[test]
    fn legacy_uses_generic_labels() {
        let (p, i) = kansas();
        let text = legacy_rationale(&p, &i, 84);
        assert!(text.starts_with("Convective target • Organized storms"));
    }

    #[test]
    fn non_finite_input_falls_back_to_score() {
        let (p, mut i) = kansas();
        i.scp = f64::NAN;
        let text = target_rationale(&p, &i, StormMode::SquallLine, TargetType::SupercellLikely, 77);
        assert_eq!(text, "Supercell Likely • Score: 77");
    }
}
