//! Identifier Types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a simulated vehicle, stable for the life of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub u32);

/// Identifier of the business partner (organisation) that owns a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerId(pub u32);

impl From<u32> for VehicleId {
    fn from(id: u32) -> Self {
        VehicleId(id)
    }
}

impl From<u32> for PartnerId {
    fn from(id: u32) -> Self {
        PartnerId(id)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vehicle_{:04}", self.0)
    }
}

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "partner_{:02}", self.0)
    }
}
