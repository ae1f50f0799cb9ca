//! Fleet simulation core: operating area, vehicle paths, clock, and filters.
//!
//! # Data flow
//!
//! ```text
//! Boundary ─▶ PolygonSampler ─▶ PathBuilder ─▶ VehicleRegistry ◀─ SimulationClock
//!                                                   │
//!                                   SelectionState ─┴─▶ visible() ─▶ FleetSnapshot
//! ```
//!
//! # Modules
//!
//! - [`geometry`]: Boundary polygons, bounding boxes, point-in-polygon, GeoJSON
//! - [`sampler`]: Rejection sampling of points inside a boundary
//! - [`path`]: Boundary-clipped interpolation between waypoints
//! - [`registry`]: The vehicle population and its only mutation, `advance_all`
//! - [`clock`]: Fixed-period tokio driver for the registry
//! - [`filter`]: Partner / vehicle / status visibility selection
//! - [`telemetry`]: Cosmetic speed, fuel and tyre readings
//! - [`setup`]: Built-in area, partners, status table, fleet spawning
//! - [`output`]: Snapshot generation and JSON output
//! - [`simulation`]: One run, wiring the above together

pub mod clock;
pub mod config;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod output;
pub mod path;
pub mod registry;
pub mod sampler;
pub mod setup;
pub mod simulation;
pub mod telemetry;

pub use clock::{share, ClockError, ClockState, SharedRegistry, SimulationClock};
pub use config::{Config, ConfigError};
pub use error::{BoundaryError, FleetError};
pub use filter::{sidebar_listing, visible, Filterable, SelectionState};
pub use geometry::{Boundary, BoundingBox};
pub use output::SnapshotGenerator;
pub use path::{Path, PathBuilder};
pub use registry::{EndBehavior, Vehicle, VehicleRegistry};
pub use sampler::PolygonSampler;
pub use simulation::{load_boundary, FleetSimulation};
