//! Fleet Simulation Runner
//!
//! Populates the operating area with simulated haul trucks, drives them along
//! their paths on a fixed clock, and writes a JSON snapshot of the visible
//! fleet after every tick.
//!
//! Examples:
//!   cargo run -p fleet-core -- --seed 42 --ticks 20
//!   cargo run -p fleet-core -- --boundary area.geojson --tick-period-ms 500

use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_core::config::{Config, DEFAULT_CONFIG_PATH};
use fleet_core::output::SnapshotGenerator;
use fleet_core::registry::EndBehavior;
use fleet_core::setup::{partners_to_json, PARTNERS_FILE};
use fleet_core::{load_boundary, FleetSimulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "fleet_sim")]
#[command(about = "Simulated vehicle fleet inside an operating area")]
struct Args {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to run; runs until Ctrl-C when omitted
    #[arg(long)]
    ticks: Option<u64>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_period_ms: Option<u64>,

    /// Number of vehicles to spawn
    #[arg(long)]
    vehicles: Option<usize>,

    /// GeoJSON polygon for the operating area
    #[arg(long)]
    boundary: Option<PathBuf>,

    /// Output directory for snapshots
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Send vehicles back to the start of their path instead of stopping
    #[arg(long)]
    loop_paths: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(period) = self.tick_period_ms {
            config.simulation.tick_period_ms = period;
        }
        if let Some(vehicles) = self.vehicles {
            config.fleet.vehicle_count = vehicles;
        }
        if let Some(boundary) = &self.boundary {
            config.area.boundary_path = Some(boundary.clone());
        }
        if let Some(output_dir) = &self.output_dir {
            config.output.output_dir = output_dir.clone();
        }
        if self.loop_paths {
            config.simulation.end_behavior = EndBehavior::Loop;
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let args = Args::parse();

    let mut config = if args.config.exists() {
        Config::from_file(&args.config)?
    } else {
        warn!("{} not found, using defaults", args.config.display());
        Config::default()
    };
    args.apply(&mut config);
    config.validate()?;

    let boundary = load_boundary(&config.area)?;
    let output_dir = config.output.output_dir.clone();
    fs::create_dir_all(&output_dir)?;
    let boundary_path = output_dir.join("boundary.geojson");
    fs::write(&boundary_path, boundary.to_geojson().to_string())?;
    info!(path = %boundary_path.display(), "Wrote boundary overlay");

    let mut sim = FleetSimulation::new(config, boundary)?;
    let partners_path = output_dir.join(PARTNERS_FILE);
    fs::write(&partners_path, partners_to_json(sim.partners()))?;
    info!(path = %partners_path.display(), "Wrote partner list");
    let summary = sim.spawn_summary().await;
    info!(vehicles = summary.total_vehicles, "Spawned fleet");
    for (partner, count) in &summary.by_partner {
        info!("  {}: {}", partner, count);
    }
    for (status, count) in &summary.by_status {
        info!("  {}: {}", status.label(), count);
    }

    let mut generator =
        SnapshotGenerator::new(&output_dir, sim.config().output.snapshot_interval);
    let initial = sim.snapshot(&mut generator).await;
    generator.write_current_state(&initial)?;
    generator.archive(&initial)?;

    let mut clock = sim.clock()?;
    let mut ticks = clock.subscribe();
    clock.start()?;

    let mut last_tick = clock.ticks();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = ticks.changed() => {
                if changed.is_err() {
                    break;
                }
                let tick = *ticks.borrow_and_update();
                let snapshot = sim.snapshot(&mut generator).await;
                if let Err(e) = generator.write_current_state(&snapshot) {
                    warn!("Could not write current state at tick {}: {}", tick, e);
                }
                if tick > last_tick + 1 {
                    debug!(from = last_tick, to = tick, "Ticks merged while writing");
                }
                last_tick = tick;
                if generator.archive_due(tick) {
                    if let Err(e) = generator.archive(&snapshot) {
                        warn!("Could not write snapshot at tick {}: {}", tick, e);
                    }
                }
                if tick % 10 == 0 {
                    info!(tick, visible = snapshot.vehicles.len(), "Tick");
                }
                if args.ticks.is_some_and(|max| tick >= max) {
                    break;
                }
            }
            _ = &mut shutdown => {
                info!("Interrupted");
                break;
            }
        }
    }

    clock.stop().await;

    let final_snapshot = sim.snapshot(&mut generator).await;
    generator.write_current_state(&final_snapshot)?;
    generator.archive(&final_snapshot)?;

    info!(
        ticks = clock.ticks(),
        snapshots = generator.archived_count(),
        "Simulation complete"
    );
    Ok(())
}
