//! Fleet Spawning
//!
//! Builds the initial population: partner assignment, status draw, waypoint
//! sampling and path construction for every vehicle.

use rand::Rng;
use std::collections::BTreeMap;
use tracing::info;

use fleet_events::{VehicleId, VehicleStatus};

use crate::config::Config;
use crate::error::FleetError;
use crate::geometry::Boundary;
use crate::path::PathBuilder;
use crate::registry::{generate_run_id, Vehicle, VehicleRegistry};
use crate::sampler::PolygonSampler;

use super::partners::{create_partners, vehicles_per_partner, Partner};
use super::status::StatusTable;

/// Generate the display name of a partner's `n`th vehicle (1-based)
pub fn generate_vehicle_name(partner: &Partner, n: usize) -> String {
    format!("{} - Truck {}", partner.name, n)
}

/// Spawn every vehicle for the given partners.
///
/// Ids run from 1 across the whole fleet in partner order. For each vehicle
/// the status is drawn first, then its waypoints, so a given seed always
/// produces the same fleet.
pub fn spawn_fleet<R: Rng + ?Sized>(
    config: &Config,
    boundary: &Boundary,
    partners: &[Partner],
    rng: &mut R,
) -> Result<Vec<Vehicle>, FleetError> {
    if partners.is_empty() {
        return Err(FleetError::NoPartners);
    }

    let table = StatusTable::from_weights(&config.fleet.status_weights)?;
    let sampler = PolygonSampler::new(boundary).with_max_attempts(config.simulation.max_sample_attempts);
    let builder = PathBuilder::new(boundary, config.simulation.sample_resolution);
    let waypoint_count = config.fleet.waypoints_per_vehicle.max(1);

    let split = vehicles_per_partner(config.fleet.vehicle_count, partners.len());
    let mut vehicles = Vec::with_capacity(config.fleet.vehicle_count);
    let mut next_id: u32 = 1;

    for (partner, &count) in partners.iter().zip(&split) {
        for n in 1..=count {
            let status = table.sample(rng);
            let waypoints = sampler.sample(rng, waypoint_count)?;
            let path = builder.build(&waypoints)?;

            vehicles.push(Vehicle::new(
                VehicleId(next_id),
                generate_vehicle_name(partner, n),
                partner.id,
                status,
                path,
            ));
            next_id += 1;
        }
    }

    Ok(vehicles)
}

/// Create partners and spawn a complete registry from configuration.
pub fn build_registry<R: Rng + ?Sized>(
    config: &Config,
    boundary: &Boundary,
    rng: &mut R,
) -> Result<(Vec<Partner>, VehicleRegistry), FleetError> {
    let partners = create_partners(config.fleet.partner_count);
    let vehicles = spawn_fleet(config, boundary, &partners, rng)?;
    let registry = VehicleRegistry::from_vehicles(vehicles, config.simulation.end_behavior)
        .with_run_id(generate_run_id(rng));

    info!(
        vehicles = registry.len(),
        partners = partners.len(),
        run_id = %registry.run_id(),
        "Fleet populated"
    );
    Ok((partners, registry))
}

/// Summary of the spawned population
#[derive(Debug, Clone, Default)]
pub struct SpawnSummary {
    pub total_vehicles: usize,
    pub by_partner: Vec<(String, usize)>,
    pub by_status: BTreeMap<VehicleStatus, usize>,
}

/// Count vehicles per partner and per status
pub fn get_spawn_summary(registry: &VehicleRegistry, partners: &[Partner]) -> SpawnSummary {
    let by_partner = partners
        .iter()
        .map(|p| {
            let count = registry.iter().filter(|v| v.group_id() == p.id).count();
            (p.name.clone(), count)
        })
        .collect();

    let by_status = VehicleStatus::ALL
        .iter()
        .map(|&s| (s, registry.count_with_status(s)))
        .collect();

    SpawnSummary {
        total_vehicles: registry.len(),
        by_partner,
        by_status,
    }
}
