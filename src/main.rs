//! Patrol Swarm - headless runner
//!
//! Builds an engine, assigns a patrol area, steps the simulation for a
//! simulated duration and reports the resulting fleet state.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use patrol_swarm::core::error::{PatrolError, Result};
use patrol_swarm::{EngineConfig, LngLat, PatrolEngine};

#[derive(Parser, Debug)]
#[command(name = "patrol-swarm", about = "Run the patrol drone simulation headless")]
struct Args {
    /// Engine config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated duration in seconds
    #[arg(long, default_value_t = 900.0)]
    seconds: f64,

    /// Tick length in seconds
    #[arg(long, default_value_t = 0.5)]
    dt: f64,

    /// Target number of active drones
    #[arg(long, default_value_t = 6)]
    target: usize,

    /// Patrol polygon as "lng,lat;lng,lat;..." (at least three points)
    #[arg(long)]
    polygon: Option<String>,

    /// Override the config's random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Log a fleet summary every N simulated seconds
    #[arg(long, default_value_t = 60.0)]
    report_every: f64,

    /// Write the final snapshot as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("patrol_swarm=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let polygon = match &args.polygon {
        Some(text) => parse_polygon(text)?,
        None => default_polygon(config.home_position),
    };

    if !(args.dt > 0.0) {
        return Err(PatrolError::InvalidConfig(format!("dt ({}) must be positive", args.dt)));
    }

    let mut engine = PatrolEngine::new(config)?;
    engine.set_patrol_area(polygon, args.target);

    tracing::info!(
        seconds = args.seconds,
        dt = args.dt,
        target = args.target,
        pool = engine.fleet().len(),
        "Patrol Swarm starting"
    );

    let ticks = (args.seconds / args.dt).ceil() as u64;
    let mut next_report = args.report_every;
    for _ in 0..ticks {
        engine.step(args.dt);
        if args.report_every > 0.0 && engine.sim_time() >= next_report {
            tracing::info!("{}", engine.snapshot().summary());
            next_report += args.report_every;
        }
    }

    let snapshot = engine.snapshot();
    println!("{}", snapshot.summary());
    for event in &snapshot.recent_events {
        println!(
            "  [{:>7.1}s] {:<16} {}",
            event.timestamp,
            format!("{:?}", event.category),
            event.message
        );
    }

    if let Some(path) = &args.output {
        std::fs::write(path, snapshot.to_json()?)?;
        println!("Snapshot written to {}", path.display());
    }

    Ok(())
}

/// Parse "lng,lat;lng,lat;..." into vertices
fn parse_polygon(text: &str) -> Result<Vec<LngLat>> {
    let vertices = text
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| -> Result<LngLat> {
            let (lng, lat) = pair
                .split_once(',')
                .ok_or_else(|| PatrolError::InvalidPolygon(format!("expected lng,lat but got '{}'", pair)))?;
            let parse = |v: &str| {
                v.trim()
                    .parse::<f64>()
                    .map_err(|e| PatrolError::InvalidPolygon(format!("'{}': {}", v.trim(), e)))
            };
            Ok(LngLat::new(parse(lng)?, parse(lat)?))
        })
        .collect::<Result<Vec<_>>>()?;

    if vertices.len() < 3 {
        return Err(PatrolError::InvalidPolygon(format!(
            "need at least 3 vertices, got {}",
            vertices.len()
        )));
    }
    Ok(vertices)
}

/// Small square north-east of home
fn default_polygon(home: LngLat) -> Vec<LngLat> {
    let center = home + LngLat::new(0.03, 0.017);
    let half = 0.01;
    vec![
        center + LngLat::new(-half, -half),
        center + LngLat::new(half, -half),
        center + LngLat::new(half, half),
        center + LngLat::new(-half, half),
    ]
}
