//! Geometry
//!
//! The operating area as a polygon with holes, its bounding box, and the
//! containment test everything else relies on.

pub mod boundary;
pub mod geojson_io;

pub use boundary::{Boundary, BoundingBox};
