//! Status Sampling
//!
//! A cumulative-probability table over vehicle statuses. Keeping the table
//! explicit means any uniform draw in `[0, 1)` maps to a status, whatever
//! random source produced it.

use rand::Rng;

use fleet_events::VehicleStatus;

use crate::config::StatusWeights;
use crate::error::FleetError;

/// Cumulative status distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusTable {
    /// (upper bound, status), bounds increasing, last bound is 1.0
    entries: Vec<(f64, VehicleStatus)>,
}

impl Default for StatusTable {
    fn default() -> Self {
        Self {
            entries: vec![
                (0.7, VehicleStatus::Active),
                (0.8, VehicleStatus::Inactive),
                (1.0, VehicleStatus::Maintenance),
            ],
        }
    }
}

impl StatusTable {
    /// Builds the table from relative weights.
    pub fn from_weights(weights: &StatusWeights) -> Result<Self, FleetError> {
        let raw = [
            (weights.active, VehicleStatus::Active),
            (weights.inactive, VehicleStatus::Inactive),
            (weights.maintenance, VehicleStatus::Maintenance),
        ];
        if raw.iter().any(|(w, _)| !w.is_finite() || *w < 0.0) {
            return Err(FleetError::InvalidStatusWeights);
        }
        let total: f64 = raw.iter().map(|(w, _)| w).sum();
        if total <= 0.0 {
            return Err(FleetError::InvalidStatusWeights);
        }

        let mut cumulative = 0.0;
        let mut entries: Vec<(f64, VehicleStatus)> = raw
            .iter()
            .filter(|(w, _)| *w > 0.0)
            .map(|&(w, status)| {
                cumulative += w / total;
                (cumulative, status)
            })
            .collect();
        if let Some(last) = entries.last_mut() {
            last.0 = 1.0;
        }
        Ok(Self { entries })
    }

    /// Maps a uniform value in `[0, 1)` to a status.
    pub fn pick(&self, r: f64) -> VehicleStatus {
        self.entries
            .iter()
            .find(|(bound, _)| r < *bound)
            .or_else(|| self.entries.last())
            .map(|&(_, status)| status)
            .unwrap_or(VehicleStatus::Active)
    }

    /// Draws a status from the table.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> VehicleStatus {
        self.pick(rng.gen::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_table_bounds() {
        let table = StatusTable::default();

        assert_eq!(table.pick(0.0), VehicleStatus::Active);
        assert_eq!(table.pick(0.69), VehicleStatus::Active);
        assert_eq!(table.pick(0.7), VehicleStatus::Inactive);
        assert_eq!(table.pick(0.79), VehicleStatus::Inactive);
        assert_eq!(table.pick(0.8), VehicleStatus::Maintenance);
        assert_eq!(table.pick(0.999), VehicleStatus::Maintenance);
    }

    #[test]
    fn test_from_default_weights_matches_default_table() {
        let table = StatusTable::from_weights(&StatusWeights::default()).unwrap();

        for r in [0.0, 0.5, 0.69, 0.71, 0.79, 0.81, 0.99] {
            assert_eq!(table.pick(r), StatusTable::default().pick(r), "r = {}", r);
        }
    }

    #[test]
    fn test_zero_weight_status_never_drawn() {
        let weights = StatusWeights {
            active: 1.0,
            inactive: 0.0,
            maintenance: 1.0,
        };
        let table = StatusTable::from_weights(&weights).unwrap();
        let mut rng = SmallRng::seed_from_u64(8);

        for _ in 0..1000 {
            assert_ne!(table.sample(&mut rng), VehicleStatus::Inactive);
        }
    }

    #[test]
    fn test_invalid_weights() {
        let zero = StatusWeights {
            active: 0.0,
            inactive: 0.0,
            maintenance: 0.0,
        };
        let negative = StatusWeights {
            active: 1.0,
            inactive: -0.5,
            maintenance: 0.0,
        };

        assert!(matches!(StatusTable::from_weights(&zero), Err(FleetError::InvalidStatusWeights)));
        assert!(matches!(
            StatusTable::from_weights(&negative),
            Err(FleetError::InvalidStatusWeights)
        ));
    }

    #[test]
    fn test_distribution_roughly_matches_weights() {
        let table = StatusTable::default();
        let mut rng = SmallRng::seed_from_u64(2024);
        let draws = 10_000;

        let active = (0..draws)
            .filter(|_| table.sample(&mut rng) == VehicleStatus::Active)
            .count();

        let share = active as f64 / draws as f64;
        assert!((share - 0.7).abs() < 0.03, "active share {}", share);
    }
}
