//! Area Boundary
//!
//! An immutable polygon, possibly with holes, describing where vehicles may
//! operate. Ring 0 is the outer boundary; any further rings are holes.
//!
//! Containment uses the even-odd rule over all rings. A point lying exactly on
//! any ring edge counts as inside, so interpolated points that land on the
//! border are kept rather than dropped.

use fleet_events::GeoPoint;

use crate::error::BoundaryError;

/// Tolerance for the on-edge test, in degrees.
const EDGE_EPSILON: f64 = 1e-12;

/// Axis-aligned bounding box in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    fn from_points(points: &[GeoPoint]) -> Self {
        let mut bbox = BoundingBox {
            min_lng: f64::INFINITY,
            min_lat: f64::INFINITY,
            max_lng: f64::NEG_INFINITY,
            max_lat: f64::NEG_INFINITY,
        };
        for p in points {
            bbox.min_lng = bbox.min_lng.min(p.lng);
            bbox.min_lat = bbox.min_lat.min(p.lat);
            bbox.max_lng = bbox.max_lng.max(p.lng);
            bbox.max_lat = bbox.max_lat.max(p.lat);
        }
        bbox
    }

    /// Inclusive containment.
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lng >= self.min_lng && p.lng <= self.max_lng && p.lat >= self.min_lat && p.lat <= self.max_lat
    }

    pub fn width(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lng + self.max_lng) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}

/// The permitted operating region.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    name: Option<String>,
    rings: Vec<Vec<GeoPoint>>,
    bbox: BoundingBox,
}

impl Boundary {
    /// Validates and builds a boundary from closed rings.
    ///
    /// Each ring must repeat its first point as its last, hold at least four
    /// points, and have at least three distinct vertices.
    pub fn new(rings: Vec<Vec<GeoPoint>>) -> Result<Self, BoundaryError> {
        if rings.is_empty() {
            return Err(BoundaryError::NoRings);
        }
        for (index, ring) in rings.iter().enumerate() {
            validate_ring(index, ring)?;
        }
        let bbox = BoundingBox::from_points(&rings[0]);
        Ok(Self { name: None, rings, bbox })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn outer(&self) -> &[GeoPoint] {
        &self.rings[0]
    }

    pub fn holes(&self) -> impl Iterator<Item = &[GeoPoint]> {
        self.rings[1..].iter().map(Vec::as_slice)
    }

    pub fn rings(&self) -> &[Vec<GeoPoint>] {
        &self.rings
    }

    /// Bounding box of the outer ring, computed once at construction.
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Point-in-polygon test; on-edge points count as inside.
    pub fn contains(&self, p: GeoPoint) -> bool {
        if !self.bbox.contains(p) {
            return false;
        }
        if self.rings.iter().any(|ring| on_ring_edge(ring, p)) {
            return true;
        }
        self.rings
            .iter()
            .fold(false, |inside, ring| inside ^ ray_crosses_odd(ring, p))
    }

    /// Planar area in square degrees (outer ring minus holes).
    pub fn area(&self) -> f64 {
        let outer = ring_area(&self.rings[0]);
        let holes: f64 = self.rings[1..].iter().map(|r| ring_area(r)).sum();
        (outer - holes).max(0.0)
    }

    /// Fraction of the bounding box covered by the polygon. This is the
    /// expected acceptance rate of rejection sampling.
    pub fn fill_ratio(&self) -> f64 {
        let bbox_area = self.bbox.area();
        if bbox_area <= 0.0 {
            return 0.0;
        }
        self.area() / bbox_area
    }
}

fn validate_ring(index: usize, ring: &[GeoPoint]) -> Result<(), BoundaryError> {
    if ring.len() < 4 {
        return Err(BoundaryError::TooFewPoints { ring: index, points: ring.len() });
    }
    if ring.iter().any(|p| !p.lng.is_finite() || !p.lat.is_finite()) {
        return Err(BoundaryError::NonFiniteCoordinate { ring: index });
    }
    if ring.first() != ring.last() {
        return Err(BoundaryError::RingNotClosed { ring: index });
    }

    let mut distinct: Vec<GeoPoint> = Vec::with_capacity(3);
    for p in &ring[..ring.len() - 1] {
        if !distinct.contains(p) {
            distinct.push(*p);
            if distinct.len() >= 3 {
                return Ok(());
            }
        }
    }
    Err(BoundaryError::TooFewDistinctVertices { ring: index })
}

fn on_ring_edge(ring: &[GeoPoint], p: GeoPoint) -> bool {
    ring.windows(2).any(|edge| on_segment(edge[0], edge[1], p))
}

fn on_segment(a: GeoPoint, b: GeoPoint, p: GeoPoint) -> bool {
    let cross = (b.lng - a.lng) * (p.lat - a.lat) - (b.lat - a.lat) * (p.lng - a.lng);
    if cross.abs() > EDGE_EPSILON {
        return false;
    }
    p.lng >= a.lng.min(b.lng) - EDGE_EPSILON
        && p.lng <= a.lng.max(b.lng) + EDGE_EPSILON
        && p.lat >= a.lat.min(b.lat) - EDGE_EPSILON
        && p.lat <= a.lat.max(b.lat) + EDGE_EPSILON
}

/// True if a ray cast from `p` towards +lng crosses the ring an odd number of times.
fn ray_crosses_odd(ring: &[GeoPoint], p: GeoPoint) -> bool {
    let mut inside = false;
    for edge in ring.windows(2) {
        let (a, b) = (edge[0], edge[1]);
        if (a.lat > p.lat) != (b.lat > p.lat) {
            let x = a.lng + (p.lat - a.lat) * (b.lng - a.lng) / (b.lat - a.lat);
            if p.lng < x {
                inside = !inside;
            }
        }
    }
    inside
}

fn ring_area(ring: &[GeoPoint]) -> f64 {
    let twice: f64 = ring
        .windows(2)
        .map(|edge| edge[0].lng * edge[1].lat - edge[1].lng * edge[0].lat)
        .sum();
    (twice / 2.0).abs()
}
