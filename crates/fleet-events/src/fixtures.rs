//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // fleet-events = { path = "../fleet-events", features = ["test-fixtures"] }
//!
//! use fleet_events::fixtures;
//!
//! let snapshot = fixtures::sample_snapshot();
//! ```

use crate::FleetSnapshot;

/// Returns a sample fleet snapshot from the fixtures file.
///
/// Contains:
/// - 6 vehicles across 3 partners
/// - 3 active, 1 inactive, 2 in maintenance
/// - telemetry on the first vehicle only
pub fn sample_snapshot() -> FleetSnapshot {
    let json = include_str!("../tests/fixtures/sample_snapshot.json");
    serde_json::from_str(json).expect("Failed to parse sample_snapshot.json")
}
