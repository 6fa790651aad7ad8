//! Projection from one vehicle's trajectory to a whole fleet.
//!
//! Naive on purpose: a sold car carries no CO2 credit, so a second-hand
//! purchase starts at zero embodied cost and nothing is amortized.

use serde::{Deserialize, Serialize};

use crate::error::{LcaError, Result};
use crate::guards;
use crate::scenario::Trajectory;

/// Distance an average vehicle still has to drive before it is scrapped,
/// assuming constant yearly mileage.
pub fn remaining_distance_km(
    life_km: f64,
    average_age_years: f64,
    scrap_age_years: f64,
) -> Result<f64> {
    guards::non_negative("life_km", life_km)?;
    guards::non_negative("average_age_years", average_age_years)?;
    guards::finite("scrap_age_years", scrap_age_years)?;
    if scrap_age_years <= 0.0 {
        return Err(LcaError::InvalidFleet("scrap age must be positive"));
    }
    if average_age_years > scrap_age_years {
        return Err(LcaError::InvalidFleet("average age exceeds scrap age"));
    }
    Ok((scrap_age_years - average_age_years) / scrap_age_years * life_km)
}

/// Remaining emissions of an existing, mostly petrol, fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetBaseline {
    pub remaining_distance_km: f64,
    /// Liters per km.
    pub fuel_consumption_per_km: f64,
    /// kg CO2 per liter.
    pub kg_co2_per_unit: f64,
    pub vehicle_count: f64,
}

impl Default for FleetBaseline {
    /// World car fleet: 1.475 billion cars, 10 of 18 years used up,
    /// 0.07 l/km of petrol.
    fn default() -> Self {
        Self {
            remaining_distance_km: 133_333.0,
            fuel_consumption_per_km: 0.07,
            kg_co2_per_unit: 3.0,
            vehicle_count: 1.475e9,
        }
    }
}

impl FleetBaseline {
    pub fn validate(&self) -> Result<()> {
        guards::non_negative("remaining_distance_km", self.remaining_distance_km)?;
        guards::non_negative("fuel_consumption_per_km", self.fuel_consumption_per_km)?;
        guards::non_negative("kg_co2_per_unit", self.kg_co2_per_unit)?;
        guards::non_negative("vehicle_count", self.vehicle_count)?;
        Ok(())
    }

    /// Remaining fleet emissions in gigatonnes CO2.
    pub fn remaining_co2_gt(&self) -> f64 {
        self.remaining_distance_km
            * self.fuel_consumption_per_km
            * self.kg_co2_per_unit
            * self.vehicle_count
            / 1e12
    }
}

/// Terminal total of `candidate` relative to `reference`.
pub fn terminal_ratio(candidate: &Trajectory, reference: &Trajectory) -> Result<f64> {
    let reference = reference.terminal_co2_kg();
    if reference == 0.0 {
        return Err(LcaError::ZeroReference);
    }
    Ok(candidate.terminal_co2_kg() / reference)
}

/// Scale a fleet baseline by a scenario ratio.
pub fn project(baseline: f64, ratio: f64) -> f64 {
    baseline * ratio
}

/// Ratio expressed as percent change, 1.25 -> 25.
pub fn percent_change(ratio: f64) -> f64 {
    (ratio - 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Phase, Scenario};
    use crate::vehicle::{ConsumptionCost, Vehicle, VehicleParams};

    fn trajectory(weight: f64) -> Trajectory {
        let v = Vehicle::new(VehicleParams {
            name: "v".to_string(),
            weight,
            battery_capacity: 0.0,
            consumption_per_km: 0.0,
            usage: 1.0,
            co2_build_cost_per_kg: 1.0,
            co2_battery_build_cost_per_kwh: 0.0,
            co2_cost_per_consumption: ConsumptionCost::fuel(0.0),
            vehicle_life_km: 0.0,
        })
        .unwrap();
        Scenario::new("s", vec![Phase::new(v, vec![0.0]).unwrap()])
            .evaluate()
            .unwrap()
    }

    #[test]
    fn test_remaining_distance() {
        let d = remaining_distance_km(300_000.0, 10.0, 18.0).unwrap();
        assert!((d - 133_333.333).abs() < 1e-2);
        assert_eq!(remaining_distance_km(300_000.0, 18.0, 18.0).unwrap(), 0.0);
        assert!(remaining_distance_km(300_000.0, 20.0, 18.0).is_err());
        assert!(remaining_distance_km(300_000.0, 10.0, 0.0).is_err());
        assert!(remaining_distance_km(300_000.0, -1.0, 18.0).is_err());
    }

    #[test]
    fn test_world_fleet_baseline() {
        let gt = FleetBaseline::default().remaining_co2_gt();
        // 133333 * 0.07 * 3 * 1.475e9 / 1e12
        assert!((gt - 41.2998).abs() < 1e-3);
        assert!(FleetBaseline::default().validate().is_ok());

        let bad = FleetBaseline {
            vehicle_count: -1.0,
            ..FleetBaseline::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_ratio_projection() {
        let ratio = terminal_ratio(&trajectory(150.0), &trajectory(100.0)).unwrap();
        assert!((ratio - 1.5).abs() < 1e-12);
        assert!((percent_change(ratio) - 50.0).abs() < 1e-9);
        assert!((project(40.0, ratio) - 60.0).abs() < 1e-9);

        assert!(matches!(
            terminal_ratio(&trajectory(150.0), &trajectory(0.0)),
            Err(LcaError::ZeroReference)
        ));
    }
}
