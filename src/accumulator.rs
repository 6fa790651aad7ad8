use crate::error::{LcaError, Result};
use crate::guards;
use crate::vehicle::Vehicle;

/// Cumulative CO2 (kg) for one vehicle over one ownership phase.
///
/// `distances` are km sample points along the phase, not necessarily starting
/// at 0. `debt0` is what earlier phases already emitted. The embodied cost is
/// charged once, at `distances[0]`; operating cost accrues on the distance
/// driven within the phase:
///
/// `c[i] = debt0 + embodied + cost * consumption * usage * (d[i] - d[0])`
///
/// Empty or decreasing distance sequences are rejected before anything is
/// computed, as are vehicles whose totals overflow to infinity. No check is
/// made that the consumption cost matches the vehicle's energy carrier.
pub fn co2_analysis(vehicle: &Vehicle, distances: &[f64], debt0: f64) -> Result<Vec<f64>> {
    co2_analysis_with_usage(vehicle, vehicle.usage(), distances, debt0)
}

/// [`co2_analysis`] with an explicit usage fraction in place of the vehicle's own.
pub fn co2_analysis_with_usage(
    vehicle: &Vehicle,
    usage: f64,
    distances: &[f64],
    debt0: f64,
) -> Result<Vec<f64>> {
    let usage = guards::fraction("usage", usage)?;
    let debt0 = guards::finite("debt0", debt0)?;
    guards::distances(distances)?;

    let start = distances[0];
    let span = distances[distances.len() - 1] - start;
    let embodied = checked(vehicle, "embodied CO2", vehicle.embodied_co2_kg())?;
    let per_km = checked(
        vehicle,
        "operating CO2 per km",
        vehicle.operating_co2_per_km_at(usage),
    )?;
    checked(vehicle, "operating CO2", per_km * span)?;
    let base = checked(vehicle, "cumulative CO2", debt0 + embodied)?;
    // Distances never decrease, so the last sample bounds every other one.
    checked(vehicle, "cumulative CO2", base + per_km * span)?;

    Ok(distances.iter().map(|d| base + per_km * (d - start)).collect())
}

fn checked(vehicle: &Vehicle, quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LcaError::NonFiniteCo2 {
            vehicle: vehicle.name().to_string(),
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{ConsumptionCost, VehicleParams};

    fn small_petrol_car() -> Vehicle {
        Vehicle::new(VehicleParams {
            name: "small petrol car".to_string(),
            weight: 1500.0,
            battery_capacity: 0.0,
            consumption_per_km: 0.05,
            usage: 1.0,
            co2_build_cost_per_kg: 8.0,
            co2_battery_build_cost_per_kwh: 77.0,
            co2_cost_per_consumption: ConsumptionCost::fuel(3.0),
            vehicle_life_km: 300_000.0,
        })
        .unwrap()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{a} != {e}");
        }
    }

    #[test]
    fn test_petrol_car_over_full_life() {
        let c = co2_analysis(&small_petrol_car(), &[0.0, 150_000.0, 300_000.0], 0.0).unwrap();
        assert_close(&c, &[12_000.0, 34_500.0, 57_000.0]);
    }

    #[test]
    fn test_single_point_is_debt_plus_embodied() {
        let mut p = small_petrol_car().params();
        p.battery_capacity = 50.0;
        let car = Vehicle::new(p).unwrap();
        let c = co2_analysis(&car, &[42_000.0], 1_000.0).unwrap();
        assert_close(&c, &[1_000.0 + 1500.0 * 8.0 + 50.0 * 77.0]);
    }

    #[test]
    fn test_operating_cost_relative_to_phase_start() {
        let c = co2_analysis(&small_petrol_car(), &[100_000.0, 110_000.0], 500.0).unwrap();
        assert_close(&c, &[12_500.0, 12_500.0 + 3.0 * 0.05 * 10_000.0]);
    }

    #[test]
    fn test_usage_scales_operating_cost_only() {
        let car = small_petrol_car();
        let c = co2_analysis_with_usage(&car, 0.5, &[0.0, 100_000.0], 0.0).unwrap();
        assert_close(&c, &[12_000.0, 12_000.0 + 0.5 * 15_000.0]);

        let half = car.with_usage(0.5).unwrap();
        assert_close(&co2_analysis(&half, &[0.0, 100_000.0], 0.0).unwrap(), &c);
    }

    #[test]
    fn test_rejects_bad_phase_input() {
        let car = small_petrol_car();
        assert!(matches!(
            co2_analysis(&car, &[], 0.0),
            Err(LcaError::EmptyDistances)
        ));
        assert!(matches!(
            co2_analysis(&car, &[0.0, 10.0, 9.0], 0.0),
            Err(LcaError::NonMonotonicDistances { index: 2 })
        ));
        assert!(co2_analysis(&car, &[0.0], f64::NAN).is_err());
        assert!(co2_analysis_with_usage(&car, 2.0, &[0.0], 0.0).is_err());
    }

    #[test]
    fn test_rejects_totals_that_overflow() {
        let mut p = small_petrol_car().params();
        p.weight = 1e300;
        p.co2_build_cost_per_kg = 1e10;
        let heavy = Vehicle::new(p).unwrap();
        assert!(matches!(
            co2_analysis(&heavy, &[0.0], 0.0),
            Err(LcaError::NonFiniteCo2 { quantity: "embodied CO2", .. })
        ));

        let mut p = small_petrol_car().params();
        p.consumption_per_km = 1e200;
        p.co2_cost_per_consumption = ConsumptionCost::fuel(1e200);
        let thirsty = Vehicle::new(p).unwrap();
        assert!(matches!(
            co2_analysis(&thirsty, &[0.0, 1.0], 0.0),
            Err(LcaError::NonFiniteCo2 { quantity: "operating CO2 per km", .. })
        ));

        let mut p = small_petrol_car().params();
        p.consumption_per_km = 1e150;
        p.co2_cost_per_consumption = ConsumptionCost::fuel(1e150);
        let guzzler = Vehicle::new(p).unwrap();
        match co2_analysis(&guzzler, &[0.0, 1e10], 0.0) {
            Err(LcaError::NonFiniteCo2 { vehicle, quantity }) => {
                assert_eq!(vehicle, "small petrol car");
                assert_eq!(quantity, "operating CO2");
            }
            other => panic!("expected NonFiniteCo2, got {other:?}"),
        }

        let mut p = small_petrol_car().params();
        p.weight = 1e300;
        p.co2_build_cost_per_kg = 1.0;
        let massive = Vehicle::new(p).unwrap();
        assert!(co2_analysis(&massive, &[0.0], 0.0).is_ok());
        assert!(matches!(
            co2_analysis(&massive, &[0.0], f64::MAX),
            Err(LcaError::NonFiniteCo2 { quantity: "cumulative CO2", .. })
        ));
    }
}
