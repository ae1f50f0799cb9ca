//! Output
//!
//! Snapshot generation and JSON output for the render layer.

pub mod snapshot;

pub use snapshot::*;
