//! Determinism verification tests
//!
//! The same seed and configuration must produce the same fleet, the same
//! paths, and the same cursor history.

use fleet_core::config::Config;
use fleet_core::output::SnapshotGenerator;
use fleet_core::FleetSimulation;
use fleet_core::setup::{build_registry, mining_area, StatusTable};
use fleet_core::{PolygonSampler, VehicleRegistry};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn config(vehicles: usize) -> Config {
    let mut config = Config::default();
    config.fleet.vehicle_count = vehicles;
    config
}

fn fingerprint(registry: &VehicleRegistry) -> Vec<(u32, String, u32, String, usize, usize)> {
    registry
        .iter()
        .map(|v| {
            (
                v.id().0,
                v.display_name().to_string(),
                v.group_id().0,
                v.status().to_string(),
                v.path().len(),
                v.cursor(),
            )
        })
        .collect()
}

/// Same seed produces an identical population, path for path
#[test]
fn test_population_determinism() {
    let boundary = mining_area().unwrap();

    let (_, a) = build_registry(&config(60), &boundary, &mut SmallRng::seed_from_u64(42)).unwrap();
    let (_, b) = build_registry(&config(60), &boundary, &mut SmallRng::seed_from_u64(42)).unwrap();

    assert_eq!(fingerprint(&a), fingerprint(&b));
    for (va, vb) in a.iter().zip(b.iter()) {
        assert_eq!(va.path(), vb.path(), "paths differ for {}", va.display_name());
    }
}

/// Different seeds produce different fleets
#[test]
fn test_different_seeds_differ() {
    let boundary = mining_area().unwrap();

    let (_, a) = build_registry(&config(60), &boundary, &mut SmallRng::seed_from_u64(42)).unwrap();
    let (_, b) = build_registry(&config(60), &boundary, &mut SmallRng::seed_from_u64(43)).unwrap();

    let paths_a: Vec<_> = a.iter().map(|v| v.path().clone()).collect();
    let paths_b: Vec<_> = b.iter().map(|v| v.path().clone()).collect();
    assert_ne!(paths_a, paths_b);
}

/// Cursor history depends only on the population, not on wall-clock timing
#[test]
fn test_advance_history_determinism() {
    let boundary = mining_area().unwrap();

    let run = |seed: u64| {
        let (_, mut registry) =
            build_registry(&config(40), &boundary, &mut SmallRng::seed_from_u64(seed)).unwrap();
        let mut history = Vec::new();
        for _ in 0..50 {
            registry.advance_all();
            history.push(registry.iter().map(|v| v.cursor()).collect::<Vec<_>>());
        }
        history
    };

    assert_eq!(run(7), run(7));
}

/// Sampled points repeat exactly for the same seed
#[test]
fn test_sampler_determinism() {
    let boundary = mining_area().unwrap();
    let sampler = PolygonSampler::new(&boundary);

    let a = sampler.sample(&mut SmallRng::seed_from_u64(12345), 100).unwrap();
    let b = sampler.sample(&mut SmallRng::seed_from_u64(12345), 100).unwrap();

    assert_eq!(a, b);
}

/// Status draws repeat exactly for the same seed
#[test]
fn test_status_draw_determinism() {
    let table = StatusTable::default();

    let mut rng1 = SmallRng::seed_from_u64(999);
    let mut rng2 = SmallRng::seed_from_u64(999);
    let draws1: Vec<_> = (0..100).map(|_| table.sample(&mut rng1)).collect();
    let draws2: Vec<_> = (0..100).map(|_| table.sample(&mut rng2)).collect();

    assert_eq!(draws1, draws2);
}

/// Two runs from the same seed write byte-identical snapshots, run id included
#[tokio::test]
async fn test_snapshot_sequence_determinism() {
    let run = || async {
        let mut config = config(5);
        config.simulation.seed = Some(42);
        let mut sim = FleetSimulation::new(config, mining_area().unwrap()).unwrap();
        let mut generator = SnapshotGenerator::new("unused", 0);
        let mut sequence = Vec::new();
        for _ in 0..3 {
            sim.registry().lock().await.advance_all();
            let snapshot = sim.snapshot(&mut generator).await;
            sequence.push(serde_json::to_string(&snapshot).unwrap());
        }
        sequence
    };

    assert_eq!(run().await, run().await);
}
