//! Polygon Sampler
//!
//! Rejection sampling: draw uniform points inside the boundary's bounding box
//! and keep only those the boundary contains. Every draw is capped so that a
//! boundary covering a tiny fraction of its bounding box fails loudly instead
//! of spinning forever.

use rand::Rng;
use tracing::warn;

use fleet_events::GeoPoint;

use crate::error::FleetError;
use crate::geometry::Boundary;

/// Default cap on draws per accepted point.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Draws uniformly distributed points inside a boundary.
#[derive(Debug, Clone, Copy)]
pub struct PolygonSampler<'a> {
    boundary: &'a Boundary,
    max_attempts: u32,
}

impl<'a> PolygonSampler<'a> {
    pub fn new(boundary: &'a Boundary) -> Self {
        Self {
            boundary,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn boundary(&self) -> &'a Boundary {
        self.boundary
    }

    /// Draws a single point inside the boundary.
    pub fn sample_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GeoPoint, FleetError> {
        let bbox = self.boundary.bbox();
        for _ in 0..self.max_attempts {
            let candidate = GeoPoint::new(
                rng.gen_range(bbox.min_lng..=bbox.max_lng),
                rng.gen_range(bbox.min_lat..=bbox.max_lat),
            );
            if self.boundary.contains(candidate) {
                return Ok(candidate);
            }
        }

        warn!(
            attempts = self.max_attempts,
            fill_ratio = self.boundary.fill_ratio(),
            "Rejection sampling exhausted"
        );
        Err(FleetError::SamplingExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Draws `count` points inside the boundary.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<GeoPoint>, FleetError> {
        (0..count).map(|_| self.sample_one(rng)).collect()
    }
}

/// Convenience wrapper: `count` points inside `boundary` with the default cap.
pub fn sample<R: Rng + ?Sized>(
    boundary: &Boundary,
    count: usize,
    rng: &mut R,
) -> Result<Vec<GeoPoint>, FleetError> {
    PolygonSampler::new(boundary).sample(rng, count)
}
