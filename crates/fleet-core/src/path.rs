//! Path Building
//!
//! Turns an ordered list of waypoints into a dense sequence of positions by
//! straight-line interpolation. Interpolated points outside the boundary are
//! dropped, so excursions are clipped rather than rerouted. This is not a
//! route planner.

use fleet_events::GeoPoint;

use crate::error::FleetError;
use crate::geometry::Boundary;

/// Default number of interpolation steps per waypoint segment.
pub const DEFAULT_RESOLUTION: u32 = 10;

/// An ordered, non-empty route. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<GeoPoint>,
}

impl Path {
    /// Wraps a list of points, rejecting an empty list.
    pub fn new(points: Vec<GeoPoint>) -> Result<Self, FleetError> {
        if points.is_empty() {
            return Err(FleetError::EmptyPath { waypoints: 0 });
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for the `len` convention.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    /// Position at `index`, clamped to the last point.
    pub fn position(&self, index: usize) -> GeoPoint {
        self.points[index.min(self.last_index())]
    }

    pub fn first(&self) -> GeoPoint {
        self.points[0]
    }

    pub fn last(&self) -> GeoPoint {
        self.points[self.last_index()]
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }
}

/// Builds boundary-clipped paths between waypoints.
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder<'a> {
    boundary: &'a Boundary,
    resolution: u32,
}

impl<'a> PathBuilder<'a> {
    /// `resolution` is the number of steps per segment; zero is treated as one.
    pub fn new(boundary: &'a Boundary, resolution: u32) -> Self {
        Self {
            boundary,
            resolution: resolution.max(1),
        }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Interpolates `resolution + 1` points per consecutive waypoint pair and
    /// keeps those inside the boundary.
    ///
    /// A single waypoint yields a stationary path if it lies inside.
    pub fn build(&self, waypoints: &[GeoPoint]) -> Result<Path, FleetError> {
        let empty = FleetError::EmptyPath {
            waypoints: waypoints.len(),
        };

        let points: Vec<GeoPoint> = match waypoints {
            [] => return Err(empty),
            [only] => vec![*only],
            _ => waypoints
                .windows(2)
                .flat_map(|segment| self.interpolate(segment[0], segment[1]))
                .collect(),
        };

        let inside: Vec<GeoPoint> = points
            .into_iter()
            .filter(|p| self.boundary.contains(*p))
            .collect();

        if inside.is_empty() {
            return Err(empty);
        }
        Ok(Path { points: inside })
    }

    fn interpolate(&self, from: GeoPoint, to: GeoPoint) -> impl Iterator<Item = GeoPoint> {
        let resolution = self.resolution;
        (0..=resolution).map(move |step| from.lerp(to, f64::from(step) / f64::from(resolution)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::boundary::tests::unit_square;

    #[test]
    fn test_path_clipped_at_boundary() {
        let boundary = unit_square();
        let builder = PathBuilder::new(&boundary, 10);

        let path = builder
            .build(&[GeoPoint::new(0.0, 0.0), GeoPoint::new(2.0, 0.0)])
            .unwrap();

        assert!(!path.is_empty());
        // x = 0.0, 0.2, ..., 1.0 survive
        assert_eq!(path.len(), 6);
        for p in path.points() {
            assert!(p.lng <= 1.0, "point escaped boundary: {}", p);
        }
        assert_eq!(path.last(), GeoPoint::new(1.0, 0.0));
    }

    #[test]
    fn test_interior_segment_keeps_every_step() {
        let boundary = unit_square();
        let builder = PathBuilder::new(&boundary, 4);

        let path = builder
            .build(&[
                GeoPoint::new(0.1, 0.1),
                GeoPoint::new(0.9, 0.1),
                GeoPoint::new(0.9, 0.9),
            ])
            .unwrap();

        // Two segments of resolution + 1 points each
        assert_eq!(path.len(), 10);
        assert_eq!(path.first(), GeoPoint::new(0.1, 0.1));
        assert_eq!(path.last(), GeoPoint::new(0.9, 0.9));
        assert!(path.points().iter().all(|p| boundary.contains(*p)));
    }

    #[test]
    fn test_path_entirely_outside_fails() {
        let boundary = unit_square();
        let builder = PathBuilder::new(&boundary, 10);

        let result = builder.build(&[GeoPoint::new(2.0, 2.0), GeoPoint::new(3.0, 3.0)]);

        assert!(matches!(result, Err(FleetError::EmptyPath { waypoints: 2 })));
    }

    #[test]
    fn test_single_and_no_waypoints() {
        let boundary = unit_square();
        let builder = PathBuilder::new(&boundary, 10);

        let path = builder.build(&[GeoPoint::new(0.5, 0.5)]).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.last_index(), 0);

        assert!(matches!(builder.build(&[]), Err(FleetError::EmptyPath { waypoints: 0 })));
    }

    #[test]
    fn test_zero_resolution_treated_as_one() {
        let boundary = unit_square();
        let builder = PathBuilder::new(&boundary, 0);

        let path = builder
            .build(&[GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)])
            .unwrap();

        assert_eq!(builder.resolution(), 1);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_position_clamps_to_last() {
        let path = Path::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)]).unwrap();

        assert_eq!(path.position(0), GeoPoint::new(0.0, 0.0));
        assert_eq!(path.position(99), GeoPoint::new(1.0, 1.0));
        assert!(Path::new(vec![]).is_err());
    }
}
