//! Error Types
//!
//! Every failure the core can report is local and recoverable by the caller.
//! The core never substitutes default geometry on its own.

use thiserror::Error;

/// Problems with a boundary polygon.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("boundary has no rings")]
    NoRings,
    #[error("ring {ring} is not closed (first and last point differ)")]
    RingNotClosed { ring: usize },
    #[error("ring {ring} has {points} points, at least 4 required")]
    TooFewPoints { ring: usize, points: usize },
    #[error("ring {ring} has fewer than 3 distinct vertices")]
    TooFewDistinctVertices { ring: usize },
    #[error("ring {ring} contains a non-finite coordinate")]
    NonFiniteCoordinate { ring: usize },
    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(String),
    #[error("could not read boundary file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
}

/// Errors raised while building or populating the simulation.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("rejection sampling gave up after {attempts} attempts without a point inside the boundary")]
    SamplingExhausted { attempts: u32 },
    #[error("no interpolated point between {waypoints} waypoints fell inside the boundary")]
    EmptyPath { waypoints: usize },
    #[error("invalid boundary: {0}")]
    InvalidBoundary(#[from] BoundaryError),
    #[error("status weights must be non-negative and sum to a positive value")]
    InvalidStatusWeights,
    #[error("at least one business partner is required")]
    NoPartners,
}
