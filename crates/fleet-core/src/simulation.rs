//! Fleet Simulation
//!
//! Ties the pieces together for one run: boundary, partners, the shared
//! registry, the UI selection and the seeded random source.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use tracing::info;

use fleet_events::FleetSnapshot;

use crate::clock::{share, ClockError, SharedRegistry, SimulationClock};
use crate::config::{AreaConfig, Config};
use crate::error::FleetError;
use crate::filter::SelectionState;
use crate::geometry::Boundary;
use crate::output::SnapshotGenerator;
use crate::setup::{build_registry, get_spawn_summary, mining_area, Partner, SpawnSummary};

/// Loads the configured boundary file, or the built-in mining area.
pub fn load_boundary(area: &AreaConfig) -> Result<Boundary, FleetError> {
    let boundary = match &area.boundary_path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(crate::error::BoundaryError::from)?;
            Boundary::from_geojson_str(&content)?
        }
        None => mining_area()?,
    };
    info!(
        name = boundary.name().unwrap_or("unnamed"),
        vertices = boundary.outer().len(),
        holes = boundary.holes().count(),
        fill_ratio = boundary.fill_ratio(),
        "Boundary loaded"
    );
    Ok(boundary)
}

/// One simulation run.
pub struct FleetSimulation {
    config: Config,
    boundary: Boundary,
    partners: Vec<Partner>,
    registry: SharedRegistry,
    selection: SelectionState,
    seed: u64,
    rng: SmallRng,
}

impl FleetSimulation {
    /// Populates a new run. Uses the configured seed, or draws one.
    pub fn new(config: Config, boundary: Boundary) -> Result<Self, FleetError> {
        let seed = config
            .simulation
            .seed
            .unwrap_or_else(|| rand::thread_rng().next_u64());
        let mut rng = SmallRng::seed_from_u64(seed);

        let (partners, registry) = build_registry(&config, &boundary, &mut rng)?;
        let selection = SelectionState::all_selected(partners.iter().map(|p| p.id), registry.ids());
        info!(seed, "Simulation seeded");

        Ok(Self {
            config,
            boundary,
            partners,
            registry: share(registry),
            selection,
            seed,
            rng,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn partners(&self) -> &[Partner] {
        &self.partners
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn registry(&self) -> SharedRegistry {
        Arc::clone(&self.registry)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Selection toggles go through here.
    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    /// A clock driving this run's registry at the configured period.
    pub fn clock(&self) -> Result<SimulationClock, ClockError> {
        SimulationClock::new(self.registry(), self.config.simulation.tick_period())
    }

    /// Replaces the population with a fresh one from `seed`. The selection
    /// resets to everything selected since vehicle ids are reissued.
    ///
    /// A running clock drives the new population from its next tick, with
    /// the tick count starting again from 1.
    pub async fn reseed(&mut self, seed: u64) -> Result<(), FleetError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (partners, fresh) = build_registry(&self.config, &self.boundary, &mut rng)?;

        let mut registry = self.registry.lock().await;
        let run_id = fresh.run_id();
        registry.reseed(fresh.into_vehicles(), run_id);
        self.selection = SelectionState::all_selected(partners.iter().map(|p| p.id), registry.ids());
        drop(registry);

        self.partners = partners;
        self.seed = seed;
        self.rng = rng;
        info!(seed, "Simulation reseeded");
        Ok(())
    }

    pub async fn spawn_summary(&self) -> SpawnSummary {
        get_spawn_summary(&*self.registry.lock().await, &self.partners)
    }

    /// Snapshot of the currently visible vehicles.
    pub async fn snapshot(&mut self, generator: &mut SnapshotGenerator) -> FleetSnapshot {
        let registry = self.registry.lock().await;
        generator.generate(&registry, &self.selection, &mut self.rng)
    }
}
