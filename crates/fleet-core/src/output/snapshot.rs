//! Snapshot Output
//!
//! Builds fleet snapshots from the registry and the current selection, and
//! writes them as JSON: `current_state.json` on every tick plus an archived
//! copy every `snapshot_interval` ticks.

use rand::Rng;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use fleet_events::{generate_snapshot_id, FleetSnapshot};

use crate::filter::{visible, SelectionState};
use crate::registry::VehicleRegistry;
use crate::telemetry::generate_telemetry;

/// File name of the always-current snapshot
pub const CURRENT_STATE_FILE: &str = "current_state.json";

/// Subdirectory for archived snapshots
pub const SNAPSHOT_DIR: &str = "snapshots";

/// Tracks snapshot numbering and where snapshots are written
#[derive(Debug, Clone)]
pub struct SnapshotGenerator {
    output_dir: PathBuf,
    snapshot_interval: u64,
    sequence: u64,
    archived: u64,
    last_tick: u64,
}

impl SnapshotGenerator {
    pub fn new(output_dir: impl Into<PathBuf>, snapshot_interval: u64) -> Self {
        Self {
            output_dir: output_dir.into(),
            snapshot_interval,
            sequence: 0,
            archived: 0,
            last_tick: 0,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Records `tick` as seen and returns true if an interval boundary was
    /// reached since the previous call. Ticks merged by a slow reader still
    /// trigger the archive for the boundary they skipped.
    pub fn archive_due(&mut self, tick: u64) -> bool {
        let previous = std::mem::replace(&mut self.last_tick, tick);
        self.snapshot_interval > 0
            && tick != previous
            && tick / self.snapshot_interval != previous / self.snapshot_interval
    }

    pub fn next_id(&mut self) -> String {
        let id = generate_snapshot_id(self.sequence);
        self.sequence += 1;
        id
    }

    /// Number of snapshots generated so far
    pub fn snapshot_count(&self) -> u64 {
        self.sequence
    }

    /// Number of snapshots archived so far
    pub fn archived_count(&self) -> u64 {
        self.archived
    }

    /// Builds a snapshot of the visible vehicles with fresh telemetry.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        registry: &VehicleRegistry,
        selection: &SelectionState,
        rng: &mut R,
    ) -> FleetSnapshot {
        let vehicles = visible(registry.iter(), selection)
            .into_iter()
            .map(|vehicle| {
                let mut snapshot = vehicle.snapshot();
                snapshot.telemetry = Some(generate_telemetry(&snapshot, rng));
                snapshot
            })
            .collect();

        FleetSnapshot {
            snapshot_id: self.next_id(),
            run_id: registry.run_id(),
            tick: registry.ticks_applied(),
            boundary_visible: selection.is_boundary_visible(),
            total_vehicles: registry.len(),
            vehicles,
        }
    }

    /// Writes `current_state.json`
    pub fn write_current_state(&self, snapshot: &FleetSnapshot) -> io::Result<PathBuf> {
        let path = self.output_dir.join(CURRENT_STATE_FILE);
        write_snapshot(snapshot, &path)?;
        Ok(path)
    }

    /// Writes `snapshots/<snapshot_id>.json`
    pub fn archive(&mut self, snapshot: &FleetSnapshot) -> io::Result<PathBuf> {
        let dir = self.output_dir.join(SNAPSHOT_DIR);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.json", snapshot.snapshot_id));
        write_snapshot(snapshot, &path)?;
        self.archived += 1;
        debug!(path = %path.display(), "Archived snapshot");
        Ok(path)
    }
}

/// Write a snapshot as pretty JSON to a specific path
pub fn write_snapshot(snapshot: &FleetSnapshot, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)
}

/// Read a snapshot back from disk
pub fn read_snapshot(path: impl AsRef<Path>) -> io::Result<FleetSnapshot> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
