//! Snapshot Types
//!
//! Serialization structs for fleet snapshots.
//!
//! A snapshot is what the render layer consumes: every visible vehicle with
//! its current position, produced on each clock tick and on each selection
//! change.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{GeoPoint, PartnerId, VehicleId, VehicleStatus};

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// A single tyre reading from the pressure monitoring system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TireReading {
    pub tire_no: u8,
    pub pressure_kpa: f32,
    pub pressure_psi: f32,
    pub temperature_c: f32,
    #[serde(default)]
    pub warning: bool,
}

/// Cosmetic telemetry, regenerated for every snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub serial_number: String,
    pub sim_number: String,
    pub speed_kph: f32,
    pub fuel_percent: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tires: Vec<TireReading>,
}

impl TelemetrySnapshot {
    /// True if any tyre reports a warning.
    pub fn has_tire_warning(&self) -> bool {
        self.tires.iter().any(|t| t.warning)
    }
}

/// View of one vehicle at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub display_name: String,
    pub group_id: PartnerId,
    pub status: VehicleStatus,
    pub position: GeoPoint,
    pub cursor: usize,
    pub path_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<TelemetrySnapshot>,
}

impl VehicleSnapshot {
    /// True once the cursor sits on the last point of the path.
    pub fn at_path_end(&self) -> bool {
        self.cursor + 1 >= self.path_length
    }
}

/// Complete fleet snapshot handed to the render layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub snapshot_id: String,
    pub run_id: Uuid,
    pub tick: u64,
    #[serde(default)]
    pub boundary_visible: bool,
    #[serde(default)]
    pub total_vehicles: usize,
    pub vehicles: Vec<VehicleSnapshot>,
}

impl FleetSnapshot {
    /// Number of vehicles in the snapshot with the given status.
    pub fn count_with_status(&self, status: VehicleStatus) -> usize {
        self.vehicles.iter().filter(|v| v.status == status).count()
    }

    /// Looks up a vehicle by id.
    pub fn vehicle(&self, id: VehicleId) -> Option<&VehicleSnapshot> {
        self.vehicles.iter().find(|v| v.id == id)
    }
}
