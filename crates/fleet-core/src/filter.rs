//! Visibility Filter
//!
//! Three independent selection sets (partners, individual vehicles, statuses)
//! plus the boundary overlay flag. A vehicle is visible only if its partner,
//! its own id, and its status are all selected. Toggling one key flips that
//! key alone.

use std::collections::{BTreeMap, BTreeSet};

use fleet_events::{PartnerId, VehicleId, VehicleSnapshot, VehicleStatus};

use crate::registry::Vehicle;

/// Anything the filter can classify.
pub trait Filterable {
    fn vehicle_id(&self) -> VehicleId;
    fn partner_id(&self) -> PartnerId;
    fn vehicle_status(&self) -> VehicleStatus;
    fn name(&self) -> &str;
}

impl Filterable for Vehicle {
    fn vehicle_id(&self) -> VehicleId {
        self.id()
    }

    fn partner_id(&self) -> PartnerId {
        self.group_id()
    }

    fn vehicle_status(&self) -> VehicleStatus {
        self.status()
    }

    fn name(&self) -> &str {
        self.display_name()
    }
}

impl Filterable for VehicleSnapshot {
    fn vehicle_id(&self) -> VehicleId {
        self.id
    }

    fn partner_id(&self) -> PartnerId {
        self.group_id
    }

    fn vehicle_status(&self) -> VehicleStatus {
        self.status
    }

    fn name(&self) -> &str {
        &self.display_name
    }
}

/// UI selection state consumed by the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    groups: BTreeSet<PartnerId>,
    vehicles: BTreeSet<VehicleId>,
    status_visible: BTreeMap<VehicleStatus, bool>,
    boundary_visible: bool,
}

impl Default for SelectionState {
    /// Nothing selected, every status visible, overlay shown.
    fn default() -> Self {
        Self {
            groups: BTreeSet::new(),
            vehicles: BTreeSet::new(),
            status_visible: VehicleStatus::ALL.iter().map(|&s| (s, true)).collect(),
            boundary_visible: true,
        }
    }
}

impl SelectionState {
    /// Everything selected: the dashboard's initial state.
    pub fn all_selected(
        groups: impl IntoIterator<Item = PartnerId>,
        vehicles: impl IntoIterator<Item = VehicleId>,
    ) -> Self {
        Self {
            groups: groups.into_iter().collect(),
            vehicles: vehicles.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Flips one partner's membership. Returns the new membership.
    pub fn toggle_group(&mut self, group: PartnerId) -> bool {
        toggle(&mut self.groups, group)
    }

    /// Flips one vehicle's membership. Returns the new membership.
    pub fn toggle_vehicle(&mut self, vehicle: VehicleId) -> bool {
        toggle(&mut self.vehicles, vehicle)
    }

    /// Flips one status flag. Returns the new flag.
    pub fn toggle_status(&mut self, status: VehicleStatus) -> bool {
        let flag = self.status_visible.entry(status).or_insert(true);
        *flag = !*flag;
        *flag
    }

    /// Flips the boundary overlay flag. Returns the new flag.
    pub fn toggle_boundary(&mut self) -> bool {
        self.boundary_visible = !self.boundary_visible;
        self.boundary_visible
    }

    /// Replaces the partner selection; vehicle and status selections are untouched.
    pub fn set_groups(&mut self, groups: impl IntoIterator<Item = PartnerId>) {
        self.groups = groups.into_iter().collect();
    }

    /// Replaces the vehicle selection; partner and status selections are untouched.
    pub fn set_vehicles(&mut self, vehicles: impl IntoIterator<Item = VehicleId>) {
        self.vehicles = vehicles.into_iter().collect();
    }

    pub fn is_group_selected(&self, group: PartnerId) -> bool {
        self.groups.contains(&group)
    }

    pub fn is_vehicle_selected(&self, vehicle: VehicleId) -> bool {
        self.vehicles.contains(&vehicle)
    }

    /// Statuses without an explicit flag are visible.
    pub fn is_status_visible(&self, status: VehicleStatus) -> bool {
        self.status_visible.get(&status).copied().unwrap_or(true)
    }

    pub fn is_boundary_visible(&self) -> bool {
        self.boundary_visible
    }

    pub fn selected_groups(&self) -> impl Iterator<Item = PartnerId> + '_ {
        self.groups.iter().copied()
    }

    pub fn selected_vehicles(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.vehicles.iter().copied()
    }

    /// The full visibility predicate.
    pub fn admits<T: Filterable + ?Sized>(&self, entity: &T) -> bool {
        self.is_group_selected(entity.partner_id())
            && self.is_vehicle_selected(entity.vehicle_id())
            && self.is_status_visible(entity.vehicle_status())
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, key: T) -> bool {
    if set.remove(&key) {
        false
    } else {
        set.insert(key);
        true
    }
}

/// The visible subset of `entities`, in input order.
pub fn visible<'a, T, I>(entities: I, selection: &SelectionState) -> Vec<&'a T>
where
    T: Filterable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    entities.into_iter().filter(|e| selection.admits(*e)).collect()
}

/// Sidebar vehicle list: vehicles of selected partners whose name contains
/// `query`, ignoring case. Independent of the per-vehicle selection so that
/// deselected vehicles stay listed and can be re-selected.
pub fn sidebar_listing<'a, T, I>(entities: I, selection: &SelectionState, query: &str) -> Vec<&'a T>
where
    T: Filterable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let needle = query.trim().to_lowercase();
    entities
        .into_iter()
        .filter(|e| selection.is_group_selected(e.partner_id()))
        .filter(|e| needle.is_empty() || e.name().to_lowercase().contains(&needle))
        .collect()
}
