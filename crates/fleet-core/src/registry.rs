//! Vehicle Registry
//!
//! Owns the simulated population. The cursor is the only field that changes
//! after population, and only through [`VehicleRegistry::advance_all`], so the
//! cursor stays within its path and, under the default clamp behaviour, never
//! decreases.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use fleet_events::{GeoPoint, PartnerId, VehicleId, VehicleSnapshot, VehicleStatus};

use crate::path::Path;

/// What happens when a vehicle reaches the last point of its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndBehavior {
    /// Stop on the last point.
    #[default]
    Clamp,
    /// Jump back to the first point and drive the route again.
    Loop,
}

/// A single simulated vehicle.
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: VehicleId,
    display_name: String,
    group_id: PartnerId,
    status: VehicleStatus,
    path: Path,
    cursor: usize,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        display_name: impl Into<String>,
        group_id: PartnerId,
        status: VehicleStatus,
        path: Path,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            group_id,
            status,
            path,
            cursor: 0,
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn group_id(&self) -> PartnerId {
        self.group_id
    }

    pub fn status(&self) -> VehicleStatus {
        self.status
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn position(&self) -> GeoPoint {
        self.path.position(self.cursor)
    }

    pub fn at_path_end(&self) -> bool {
        self.cursor == self.path.last_index()
    }

    /// Moves one step along the path. Returns true if the cursor changed.
    fn advance(&mut self, end_behavior: EndBehavior) -> bool {
        if !self.status.is_moving() {
            return false;
        }
        let last = self.path.last_index();
        match end_behavior {
            EndBehavior::Clamp => {
                if self.cursor < last {
                    self.cursor += 1;
                    true
                } else {
                    false
                }
            }
            EndBehavior::Loop => {
                let next = if self.cursor < last { self.cursor + 1 } else { 0 };
                let moved = next != self.cursor;
                self.cursor = next;
                moved
            }
        }
    }

    /// Render view without telemetry.
    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            id: self.id,
            display_name: self.display_name.clone(),
            group_id: self.group_id,
            status: self.status,
            position: self.position(),
            cursor: self.cursor,
            path_length: self.path.len(),
            telemetry: None,
        }
    }
}

/// Draws a version 4 run id from `rng`, so a seeded run always gets the same id.
pub fn generate_run_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// The canonical list of vehicles for one simulation run.
#[derive(Debug, Clone)]
pub struct VehicleRegistry {
    run_id: Uuid,
    vehicles: Vec<Vehicle>,
    index: HashMap<VehicleId, usize>,
    end_behavior: EndBehavior,
    ticks_applied: u64,
}

impl Default for VehicleRegistry {
    fn default() -> Self {
        Self::new(EndBehavior::default())
    }
}

impl VehicleRegistry {
    /// An empty registry with the nil run id; see [`Self::with_run_id`].
    pub fn new(end_behavior: EndBehavior) -> Self {
        Self {
            run_id: Uuid::nil(),
            vehicles: Vec::new(),
            index: HashMap::new(),
            end_behavior,
            ticks_applied: 0,
        }
    }

    /// Builds a registry from an initial population. Later duplicates of an id
    /// are dropped.
    pub fn from_vehicles(vehicles: Vec<Vehicle>, end_behavior: EndBehavior) -> Self {
        let mut registry = Self::new(end_behavior);
        for vehicle in vehicles {
            registry.insert(vehicle);
        }
        registry
    }

    pub fn with_run_id(mut self, run_id: Uuid) -> Self {
        self.run_id = run_id;
        self
    }

    /// Adds a vehicle during population. Returns false if the id is taken.
    pub fn insert(&mut self, vehicle: Vehicle) -> bool {
        if self.index.contains_key(&vehicle.id) {
            return false;
        }
        self.index.insert(vehicle.id, self.vehicles.len());
        self.vehicles.push(vehicle);
        true
    }

    /// Discards the current population and starts run `run_id`.
    pub fn reseed(&mut self, vehicles: Vec<Vehicle>, run_id: Uuid) {
        let end_behavior = self.end_behavior;
        *self = Self::from_vehicles(vehicles, end_behavior).with_run_id(run_id);
    }

    /// Consumes the registry, returning its vehicles in population order.
    pub fn into_vehicles(self) -> Vec<Vehicle> {
        self.vehicles
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn end_behavior(&self) -> EndBehavior {
        self.end_behavior
    }

    /// Number of clock ticks applied since population.
    pub fn ticks_applied(&self) -> u64 {
        self.ticks_applied
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.index.get(&id).map(|&i| &self.vehicles[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.vehicles.iter().map(|v| v.id)
    }

    /// Distinct partner ids in population order.
    pub fn partner_ids(&self) -> Vec<PartnerId> {
        let mut partners: Vec<PartnerId> = Vec::new();
        for vehicle in &self.vehicles {
            if !partners.contains(&vehicle.group_id) {
                partners.push(vehicle.group_id);
            }
        }
        partners
    }

    pub fn count_with_status(&self, status: VehicleStatus) -> usize {
        self.vehicles.iter().filter(|v| v.status == status).count()
    }

    /// Advances every active vehicle one step. Returns how many moved.
    pub fn advance_all(&mut self) -> usize {
        let end_behavior = self.end_behavior;
        let moved = self
            .vehicles
            .iter_mut()
            .map(|v| v.advance(end_behavior))
            .filter(|&moved| moved)
            .count();
        self.ticks_applied += 1;
        debug!(tick = self.ticks_applied, moved, "Advanced vehicles");
        moved
    }

    /// Immutable render views of every vehicle, in population order.
    pub fn snapshot(&self) -> Vec<VehicleSnapshot> {
        self.vehicles.iter().map(Vehicle::snapshot).collect()
    }
}
