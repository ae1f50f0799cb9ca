//! Fleet Setup
//!
//! Operating area, business partners, and the initial vehicle population.

pub mod area;
pub mod fleet;
pub mod partners;
pub mod status;

pub use area::*;
pub use fleet::*;
pub use partners::*;
pub use status::*;
