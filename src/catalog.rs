//! Reference emission factors, vehicles and ownership scenarios.
//!
//! Factors follow the Volvo Cars EX30/EX90 life-cycle reports: 8 kg CO2 per kg
//! of vehicle, 77 kg CO2 per kWh of battery (mean of 56 and 98), 0.45 kg CO2
//! per kWh of world-mix electricity and 3 kg CO2 per liter of petrol
//! (extraction, production and combustion).

use serde::{Deserialize, Serialize};

use crate::distance::linspace;
use crate::error::{LcaError, Result};
use crate::guards;
use crate::scenario::{Phase, Scenario};
use crate::vehicle::{blend, ConsumptionCost, Vehicle, VehicleParams};

pub const SMALL_PETROL_CAR: &str = "Small petrol car";
pub const LARGE_EV: &str = "Large EV";
pub const SMALL_EV: &str = "Small EV";
pub const BICYCLE: &str = "Bicycle";
pub const E_BIKE: &str = "E-bike";

pub const KEEP_PETROL_CAR: &str = "Keep small petrol car";
pub const BUY_LARGE_EV: &str = "Buy large EV";
pub const BUY_SMALL_EV: &str = "Buy small EV";
pub const BUY_LARGE_EV_AND_BICYCLE: &str = "Buy large EV and bicycle";
pub const BUY_SMALL_EV_AND_BICYCLE: &str = "Buy small EV and bicycle";
pub const BUY_E_BIKE: &str = "Buy e-bike";
pub const NEVER_OWN_A_CAR: &str = "Never own a car";

/// Shared emission factors applied to every reference vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactors {
    /// kg CO2 per kg of vehicle mass.
    pub vehicle_manufacturing_kg_per_kg: f64,
    /// kg CO2 per kWh of battery capacity.
    pub battery_manufacturing_kg_per_kwh: f64,
    /// kg CO2 per kWh of grid electricity.
    pub electricity_kg_per_kwh: f64,
    /// kg CO2 per liter of petrol.
    pub petrol_kg_per_liter: f64,
    pub vehicle_life_km: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            vehicle_manufacturing_kg_per_kg: 8.0,
            battery_manufacturing_kg_per_kwh: 77.0,
            electricity_kg_per_kwh: 0.45,
            petrol_kg_per_liter: 3.0,
            vehicle_life_km: 300_000.0,
        }
    }
}

impl EmissionFactors {
    fn vehicle(
        &self,
        name: &str,
        weight: f64,
        battery_capacity: f64,
        consumption_per_km: f64,
        cost: ConsumptionCost,
    ) -> Result<Vehicle> {
        Vehicle::new(VehicleParams {
            name: name.to_string(),
            weight,
            battery_capacity,
            consumption_per_km,
            usage: 1.0,
            co2_build_cost_per_kg: self.vehicle_manufacturing_kg_per_kg,
            co2_battery_build_cost_per_kwh: self.battery_manufacturing_kg_per_kwh,
            co2_cost_per_consumption: cost,
            vehicle_life_km: self.vehicle_life_km,
        })
    }
}

/// The five reference vehicles.
///
/// | vehicle          | weight kg | battery kWh | consumption       |
/// |------------------|-----------|-------------|-------------------|
/// | small petrol car | 1500      | -           | 0.05 l/km         |
/// | large EV         | 2200      | 125         | 0.25 kWh/km       |
/// | small EV         | 1500      | 50          | 0.15 kWh/km       |
/// | bicycle          | 10        | -           | -                 |
/// | e-bike           | 15        | 0.5         | 0.005 kWh/km      |
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceFleet {
    vehicles: Vec<Vehicle>,
}

impl ReferenceFleet {
    pub fn new(factors: &EmissionFactors) -> Result<Self> {
        let petrol = ConsumptionCost::fuel(factors.petrol_kg_per_liter);
        let grid = ConsumptionCost::electricity(factors.electricity_kg_per_kwh);
        Ok(Self {
            vehicles: vec![
                factors.vehicle(SMALL_PETROL_CAR, 1500.0, 0.0, 0.05, petrol)?,
                factors.vehicle(LARGE_EV, 2200.0, 125.0, 0.25, grid)?,
                factors.vehicle(SMALL_EV, 1500.0, 50.0, 0.15, grid)?,
                factors.vehicle(BICYCLE, 10.0, 0.0, 0.0, grid)?,
                factors.vehicle(E_BIKE, 15.0, 0.5, 0.005, grid)?,
            ],
        })
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn lookup(&self, name: &str) -> Result<&Vehicle> {
        self.vehicles
            .iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| LcaError::UnknownVehicle(name.to_string()))
    }
}

/// Where the switch happens and how the comparison is sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSettings {
    /// Kilometers driven with the petrol car before switching.
    pub switch_km: f64,
    /// Share of travel done by bicycle in the blended scenarios.
    pub bike_fraction: f64,
    pub samples_per_phase: usize,
    pub samples_single_phase: usize,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            switch_km: 166_667.0,
            bike_fraction: 0.1,
            samples_per_phase: 100,
            samples_single_phase: 200,
        }
    }
}

impl ScenarioSettings {
    pub fn validate(&self, vehicle_life_km: f64) -> Result<()> {
        guards::non_negative("switch_km", self.switch_km)?;
        if self.switch_km > vehicle_life_km {
            return Err(LcaError::InvalidParameter {
                field: "switch_km",
                value: self.switch_km,
            });
        }
        guards::fraction("bike_fraction", self.bike_fraction)?;
        // Both ends of a phase's range must be sampled, or its operating cost vanishes.
        for (field, samples) in [
            ("samples_per_phase", self.samples_per_phase),
            ("samples_single_phase", self.samples_single_phase),
        ] {
            if samples < 2 {
                return Err(LcaError::InvalidParameter {
                    field,
                    value: samples as f64,
                });
            }
        }
        Ok(())
    }
}

/// Each reference vehicle on its own over the whole vehicle life, one
/// scenario per vehicle named after it.
pub fn single_vehicle_scenarios(
    factors: &EmissionFactors,
    settings: &ScenarioSettings,
) -> Result<Vec<Scenario>> {
    settings.validate(factors.vehicle_life_km)?;
    let fleet = ReferenceFleet::new(factors)?;
    let whole_life = linspace(0.0, factors.vehicle_life_km, settings.samples_single_phase)?;

    fleet
        .vehicles()
        .iter()
        .map(|v| -> Result<Scenario> {
            Ok(Scenario::new(
                v.name(),
                vec![Phase::new(v.clone(), whole_life.clone())?],
            ))
        })
        .collect()
}

/// Someone who has driven a small petrol car for `switch_km` changes habits.
/// Returns the seven comparisons, the "keep the petrol car" baseline first.
pub fn reference_scenarios(
    factors: &EmissionFactors,
    settings: &ScenarioSettings,
) -> Result<Vec<Scenario>> {
    settings.validate(factors.vehicle_life_km)?;
    let fleet = ReferenceFleet::new(factors)?;
    let life = factors.vehicle_life_km;

    let whole_life = linspace(0.0, life, settings.samples_single_phase)?;
    let to_switch = linspace(0.0, settings.switch_km, settings.samples_per_phase)?;
    let from_switch = linspace(settings.switch_km, life, settings.samples_per_phase)?;

    let petrol = fleet.lookup(SMALL_PETROL_CAR)?;
    let large_ev = fleet.lookup(LARGE_EV)?;
    let small_ev = fleet.lookup(SMALL_EV)?;
    let bicycle = fleet.lookup(BICYCLE)?;
    let e_bike = fleet.lookup(E_BIKE)?;

    let large_ev_and_bicycle = blend(
        "Large EV and bicycle",
        large_ev,
        bicycle,
        settings.bike_fraction,
    )?;
    let small_ev_and_bicycle = blend(
        "Small EV and bicycle",
        small_ev,
        bicycle,
        settings.bike_fraction,
    )?;

    let switch_to = |name: &str, next: &Vehicle| -> Result<Scenario> {
        Ok(Scenario::new(name, vec![])
            .then(Phase::new(petrol.clone(), to_switch.clone())?)
            .then(Phase::new(next.clone(), from_switch.clone())?))
    };

    Ok(vec![
        Scenario::new(
            KEEP_PETROL_CAR,
            vec![Phase::new(petrol.clone(), whole_life.clone())?],
        ),
        switch_to(BUY_LARGE_EV, large_ev)?,
        switch_to(BUY_SMALL_EV, small_ev)?,
        switch_to(BUY_LARGE_EV_AND_BICYCLE, &large_ev_and_bicycle)?,
        switch_to(BUY_SMALL_EV_AND_BICYCLE, &small_ev_and_bicycle)?,
        switch_to(BUY_E_BIKE, e_bike)?,
        Scenario::new(
            NEVER_OWN_A_CAR,
            vec![Phase::new(bicycle.clone(), whole_life)?],
        ),
    ])
}
