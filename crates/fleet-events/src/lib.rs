//! Shared data types for the fleet simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is the contract between the simulation core and whatever renders it.

pub mod geo;
pub mod ids;
pub mod snapshot;
pub mod status;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export geometry types
pub use geo::GeoPoint;

// Re-export identifier types
pub use ids::{PartnerId, VehicleId};

// Re-export status types
pub use status::{ParseStatusError, VehicleStatus};

// Re-export snapshot types
pub use snapshot::{
    generate_snapshot_id, FleetSnapshot, TelemetrySnapshot, TireReading, VehicleSnapshot,
};
