//! End-to-end scenarios: observation or parameter set in, score and targets out.
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use storm_chase_core::scoring::{GeographicRegion, QualityCap};
use storm_chase_core::{
    compute_composite_indices, derive_base_parameters, legacy_rationale, score_breakdown,
    score_chasability, BaseParameters, GeneratorConfig, ParameterSource, Severity,
    SurfaceObservation, TargetGenerator,
};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn kansas_supercell_day() -> BaseParameters {
    BaseParameters::new(3000.0, 68.0, 50.0, 20.0, 300.0, 900.0)
}

#[test]
fn kansas_supercell_day_scores_high() {
    let params = kansas_supercell_day();
    let indices = compute_composite_indices(&params);

    assert!(indices.scp >= 3.0, "SCP {}", indices.scp);
    let score = score_chasability(&params, &indices, 38.8, -97.5);
    assert!(score >= 75, "score {score}");

    let breakdown = score_breakdown(&params, &indices, 38.8, -97.5);
    assert_eq!(breakdown.score, score);
    assert_eq!(breakdown.region, Some(GeographicRegion::KansasStormAlley));
    assert_eq!(breakdown.base_points() + breakdown.capped_bonus(), u32::from(score));
}

#[test]
fn marginal_day_scores_low() {
    let params = BaseParameters::new(400.0, 45.0, 12.0, 180.0, 60.0, 2200.0);
    let indices = compute_composite_indices(&params);
    let breakdown = score_breakdown(&params, &indices, 38.8, -97.5);
    assert!(breakdown.score <= 30, "score {}", breakdown.score);
    assert_eq!(breakdown.quality_cap, Some(QualityCap::MarginalEnvironment));
}

#[test]
fn observation_to_targets() {
    // hot, humid Plains afternoon
    let obs = SurfaceObservation::new(88.0, 70.0).with_pressure(1004.0);
    let params = derive_base_parameters(&obs);
    assert_eq!(params.source, ParameterSource::CalculatedFromSurfaceObs);
    assert!(params.cape > 2000.0, "CAPE {}", params.cape);

    let generator = TargetGenerator::new(GeneratorConfig {
        hour: Some(15),
        ..GeneratorConfig::default()
    });
    let mut rng = StdRng::seed_from_u64(17);
    let targets = generator.generate(38.8, -97.5, &params, 150.0, &mut rng);

    assert!(targets.len() <= 6);
    for t in &targets {
        assert!(t.score >= 60);
        assert!((1..=3).contains(&t.priority));
        assert_eq!(t.initiation_window.to_string(), "17:00-19:00 CT");
        assert_eq!(t.parameters.source, ParameterSource::SpatialVariation);
        assert!(!t.rationale.is_empty());
        assert!(t.distance_miles <= 150.0);
        // snapshot indices match the snapshot parameters
        assert_eq!(t.indices, compute_composite_indices(&t.parameters));
    }
}

#[test]
fn extreme_targets_rank_first() {
    let generator = TargetGenerator::new(GeneratorConfig {
        hour: Some(12),
        ..GeneratorConfig::default()
    });
    let mut rng = StdRng::seed_from_u64(8);
    let targets = generator.generate(38.8, -97.5, &kansas_supercell_day(), 150.0, &mut rng);
    assert!(!targets.is_empty());
    let best = &targets[0];
    assert!(targets.iter().all(|t| t.score <= best.score));
    if best.score >= 85 {
        assert_eq!(best.severity, Severity::Extreme);
    }
}

#[test]
fn missing_observation_degrades_but_still_scores() {
    let params = derive_base_parameters(&SurfaceObservation::default());
    assert_eq!(params.source, ParameterSource::SurfaceDefaults);
    assert!(params.source.is_degraded());

    let indices = compute_composite_indices(&params);
    let score = score_chasability(&params, &indices, 35.0, -97.0);
    assert!(score <= 100);
}

#[test]
fn legacy_rationale_reads_like_target_rationale() {
    let params = kansas_supercell_day();
    let indices = compute_composite_indices(&params);
    let text = legacy_rationale(&params, &indices, 84);
    let clauses: Vec<&str> = text.split(" • ").collect();
    assert_eq!(clauses[0], "Convective target");
    assert_eq!(clauses[1], "Organized storms");
    assert!(clauses[2].starts_with("Exceptional supercell/tornado environment"));
}

#[test]
fn bunkers_motion_matches_mean_wind() {
    let indices = compute_composite_indices(&kansas_supercell_day());
    assert_relative_eq!(indices.storm_motion_speed, indices.mean_wind_0_6km, epsilon = 1e-9);
    // 255°: both components negative
    assert!(indices.bunkers_right_u < 0.0);
    assert!(indices.bunkers_right_v < 0.0);
}
