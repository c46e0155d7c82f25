use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use storm_chase_core::scoring::favorable_count;
use storm_chase_core::scoring::thresholds::classify_all;
use storm_chase_core::{
    compute_composite_indices, derive_base_parameters, score_breakdown, Fahrenheit,
    GeneratorConfig, HectoPascals, SurfaceObservation, TargetGenerator, VariationConfig,
    DEFAULT_RADIUS_MILES,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Storm chase targeting from a single surface observation
#[derive(Parser, Debug)]
#[command(name = "chase-targets")]
#[command(about = "Rank storm chase targets around a base location", long_about = None)]
struct Args {
    /// Surface temperature in °F (omit to use the default)
    #[arg(short, long)]
    temperature: Option<f64>,

    /// Surface dewpoint in °F (omit to use the default)
    #[arg(short, long)]
    dewpoint: Option<f64>,

    /// Station pressure in hPa
    #[arg(short, long)]
    pressure: Option<f64>,

    /// Base latitude
    #[arg(long, default_value_t = 38.8, allow_negative_numbers = true)]
    lat: f64,

    /// Base longitude
    #[arg(long, default_value_t = -97.5, allow_negative_numbers = true)]
    lon: f64,

    /// Search radius in miles
    #[arg(short, long, default_value_t = DEFAULT_RADIUS_MILES)]
    radius: f64,

    /// Random seed for spatial variation (omit for a fresh draw)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Local hour (0-23) used for the initiation window (omit for now)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    hour: Option<u32>,

    /// Minimum score for a cell to become a target
    #[arg(short, long, default_value_t = 60)]
    min_score: u8,

    /// Multiplier on the random noise amplitudes (0 = gradients only)
    #[arg(short, long, default_value_t = 1.0)]
    noise_scale: f64,

    /// Print the target list as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let observation = SurfaceObservation {
        temperature: args.temperature.map(Fahrenheit::new),
        dewpoint: args.dewpoint.map(Fahrenheit::new),
        pressure: args.pressure.map(HectoPascals::new),
    };
    let params = derive_base_parameters(&observation);
    let indices = compute_composite_indices(&params);

    let generator = TargetGenerator::new(GeneratorConfig {
        min_score: args.min_score,
        hour: args.hour,
        variation: VariationConfig::scaled(args.noise_scale),
        ..GeneratorConfig::default()
    });
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let targets = generator.generate(args.lat, args.lon, &params, args.radius, &mut rng);
    info!(count = targets.len(), radius = args.radius, "targets generated");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
        return Ok(());
    }

    println!("=== Storm Chase Targeting ===\n");
    println!("Base: {:.2}, {:.2} (source: {})", args.lat, args.lon, params.source);

    println!("\nParameters");
    println!("{:<20} | {:>9} | {:<7} | Status", "Name", "Value", "Unit");
    println!("---------------------|-----------|---------|------------");
    for (threshold, value, status) in classify_all(&params, &indices) {
        println!(
            "{:<20} | {:>9.1} | {:<7} | {}",
            threshold.name, value, threshold.unit, status
        );
    }
    let (favorable, total) = favorable_count(&params, &indices);
    println!("{favorable}/{total} parameters favorable");

    println!("\nComposite indices");
    println!(
        "CHP {:.2}  SHIP {:.2}  VGP {:.3}  SREH {:.0}",
        indices.chp, indices.ship, indices.vgp, indices.sreh
    );

    let breakdown = score_breakdown(&params, &indices, args.lat, args.lon);
    println!("\nScore at base: {}", breakdown.score);
    println!(
        "  instability {}  deep shear {}  0-3km shear {}  moisture {}  capping {}",
        breakdown.instability,
        breakdown.deep_shear,
        breakdown.low_level_shear,
        breakdown.moisture,
        breakdown.capping
    );
    println!(
        "  supercell {}  tornado {}  storm mode {}  bonus {}",
        breakdown.supercell,
        breakdown.tornado,
        breakdown.storm_mode,
        breakdown.capped_bonus()
    );
    if let Some(region) = breakdown.region {
        println!("  region: {region}");
    }
    if let Some(cap) = breakdown.quality_cap {
        println!("  capped at {} ({cap:?})", cap.limit());
    }

    println!("\nTargets");
    if targets.is_empty() {
        println!("  none scored {} or higher", args.min_score);
    }
    for target in &targets {
        println!(
            "  [P{}] {:<24} {:>3}  {:<8} {:.2}, {:.2}  {}",
            target.priority,
            target.label,
            target.score,
            target.severity.name(),
            target.latitude,
            target.longitude,
            target.initiation_window
        );
        println!("        {}", target.rationale);
    }

    Ok(())
}
