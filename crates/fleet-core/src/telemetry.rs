//! Cosmetic Telemetry
//!
//! Speed, fuel and tyre pressure readings. None of this is real data; it is
//! regenerated for every snapshot so the dashboard panels have something to
//! show.

use rand::Rng;

use fleet_events::{TelemetrySnapshot, TireReading, VehicleSnapshot};

/// PSI per kPa.
pub const KPA_TO_PSI: f32 = 0.145038;

/// Tyres on a haul truck: two front, eight rear.
pub const TIRE_COUNT: u8 = 10;

/// Normal tyre pressure band in kPa.
pub const NORMAL_PRESSURE_KPA: (f32, f32) = (620.0, 830.0);

/// Tyre temperature above which a warning is raised.
pub const MAX_TIRE_TEMPERATURE_C: f32 = 70.0;

pub fn kpa_to_psi(kpa: f32) -> f32 {
    kpa * KPA_TO_PSI
}

/// Draws a fresh telemetry reading for a vehicle.
///
/// Only active vehicles that still have path left report a speed.
pub fn generate_telemetry<R: Rng + ?Sized>(vehicle: &VehicleSnapshot, rng: &mut R) -> TelemetrySnapshot {
    let moving = vehicle.status.is_moving() && !vehicle.at_path_end();
    let speed_kph = if moving { rng.gen_range(15.0..45.0) } else { 0.0 };
    let fuel_percent = rng.gen_range(10.0..100.0);

    let tires = (1..=TIRE_COUNT)
        .map(|tire_no| {
            let pressure_kpa: f32 = rng.gen_range(560.0..860.0);
            let temperature_c: f32 = rng.gen_range(35.0..75.0);
            TireReading {
                tire_no,
                pressure_kpa,
                pressure_psi: kpa_to_psi(pressure_kpa),
                temperature_c,
                warning: tire_warning(pressure_kpa, temperature_c),
            }
        })
        .collect();

    TelemetrySnapshot {
        serial_number: format!("SN-{:06}", vehicle.id.0),
        sim_number: format!("0812-{:04}-{:04}", vehicle.id.0 / 10_000, vehicle.id.0 % 10_000),
        speed_kph,
        fuel_percent,
        tires,
    }
}

fn tire_warning(pressure_kpa: f32, temperature_c: f32) -> bool {
    let (low, high) = NORMAL_PRESSURE_KPA;
    pressure_kpa < low || pressure_kpa > high || temperature_c > MAX_TIRE_TEMPERATURE_C
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_events::{GeoPoint, PartnerId, VehicleId, VehicleStatus};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn snapshot(status: VehicleStatus, cursor: usize) -> VehicleSnapshot {
        VehicleSnapshot {
            id: VehicleId(42),
            display_name: "Partner 4 - Truck 3".to_string(),
            group_id: PartnerId(4),
            status,
            position: GeoPoint::new(115.6, -3.6),
            cursor,
            path_length: 10,
            telemetry: None,
        }
    }

    #[test]
    fn test_kpa_conversion() {
        assert!((kpa_to_psi(700.0) - 101.5266).abs() < 1e-3);
    }

    #[test]
    fn test_only_moving_vehicles_report_speed() {
        let mut rng = SmallRng::seed_from_u64(5);

        let moving = generate_telemetry(&snapshot(VehicleStatus::Active, 3), &mut rng);
        assert!(moving.speed_kph >= 15.0 && moving.speed_kph < 45.0);

        let parked = generate_telemetry(&snapshot(VehicleStatus::Active, 9), &mut rng);
        assert_eq!(parked.speed_kph, 0.0);

        let broken = generate_telemetry(&snapshot(VehicleStatus::Maintenance, 0), &mut rng);
        assert_eq!(broken.speed_kph, 0.0);
    }

    #[test]
    fn test_tire_readings() {
        let mut rng = SmallRng::seed_from_u64(11);
        let telemetry = generate_telemetry(&snapshot(VehicleStatus::Inactive, 0), &mut rng);

        assert_eq!(telemetry.tires.len(), TIRE_COUNT as usize);
        assert_eq!(telemetry.serial_number, "SN-000042");
        assert_eq!(telemetry.sim_number, "0812-0000-0042");
        for tire in &telemetry.tires {
            assert!((tire.pressure_psi - kpa_to_psi(tire.pressure_kpa)).abs() < 1e-4);
            assert_eq!(tire.warning, tire_warning(tire.pressure_kpa, tire.temperature_c));
        }
        assert_eq!(
            telemetry.has_tire_warning(),
            telemetry.tires.iter().any(|t| t.warning)
        );
    }

    #[test]
    fn test_warning_thresholds() {
        assert!(!tire_warning(700.0, 50.0));
        assert!(tire_warning(600.0, 50.0));
        assert!(tire_warning(850.0, 50.0));
        assert!(tire_warning(700.0, 72.0));
    }
}
