//! Vehicle Status
//!
//! Operational status of a vehicle, plus the legend metadata the map overlay
//! shows for each status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operational status of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    Inactive,
    Maintenance,
}

impl VehicleStatus {
    /// Every status, in legend order.
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Active,
        VehicleStatus::Inactive,
        VehicleStatus::Maintenance,
    ];

    /// Marker colour used by the map layer.
    pub fn color(self) -> &'static str {
        match self {
            VehicleStatus::Active => "#00FF00",
            VehicleStatus::Inactive => "#FF0000",
            VehicleStatus::Maintenance => "#FFFF00",
        }
    }

    /// Legend label for the status toggle.
    pub fn label(self) -> &'static str {
        match self {
            VehicleStatus::Active => "Truck Active",
            VehicleStatus::Inactive => "Truck Inactive",
            VehicleStatus::Maintenance => "Truck Maintenance",
        }
    }

    /// Only active vehicles move along their paths.
    pub fn is_moving(self) -> bool {
        matches!(self, VehicleStatus::Active)
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleStatus::Active => write!(f, "active"),
            VehicleStatus::Inactive => write!(f, "inactive"),
            VehicleStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

impl FromStr for VehicleStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(VehicleStatus::Active),
            "inactive" => Ok(VehicleStatus::Inactive),
            "maintenance" => Ok(VehicleStatus::Maintenance),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Error returned when a status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown vehicle status: {}", self.0)
    }
}

impl std::error::Error for ParseStatusError {}
