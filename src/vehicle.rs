use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{LcaError, Result};
use crate::guards;

/// Energy carrier a consumption figure is expressed in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyBasis {
    /// Liters of fuel.
    Fuel,
    /// Kilowatt-hours of electricity.
    Electricity,
}

/// Operating CO2 per unit of consumption, tagged with the unit it applies to.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionCost {
    pub basis: EnergyBasis,
    pub kg_co2_per_unit: f64,
}

impl ConsumptionCost {
    /// kg CO2 per liter of fuel.
    pub fn fuel(kg_co2_per_liter: f64) -> Self {
        Self {
            basis: EnergyBasis::Fuel,
            kg_co2_per_unit: kg_co2_per_liter,
        }
    }

    /// kg CO2 per kWh of electricity.
    pub fn electricity(kg_co2_per_kwh: f64) -> Self {
        Self {
            basis: EnergyBasis::Electricity,
            kg_co2_per_unit: kg_co2_per_kwh,
        }
    }
}

fn full_usage() -> f64 {
    1.0
}

/// Constructor inputs for a [`Vehicle`]. Values are checked by [`Vehicle::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleParams {
    pub name: String,
    /// kg, battery excluded.
    pub weight: f64,
    /// kWh, 0 for vehicles without a traction battery.
    pub battery_capacity: f64,
    /// liters/km or kWh/km, matching `co2_cost_per_consumption.basis`.
    pub consumption_per_km: f64,
    #[serde(default = "full_usage")]
    pub usage: f64,
    pub co2_build_cost_per_kg: f64,
    pub co2_battery_build_cost_per_kwh: f64,
    pub co2_cost_per_consumption: ConsumptionCost,
    pub vehicle_life_km: f64,
}

/// Immutable record of a vehicle's physical and emission parameters.
///
/// Only read access is exposed; a vehicle with different parameters is a new
/// instance (see [`Vehicle::with_usage`] and [`blend`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VehicleParams", into = "VehicleParams")]
pub struct Vehicle {
    name: String,
    weight: f64,
    battery_capacity: f64,
    consumption_per_km: f64,
    usage: f64,
    co2_build_cost_per_kg: f64,
    co2_battery_build_cost_per_kwh: f64,
    co2_cost_per_consumption: ConsumptionCost,
    vehicle_life_km: f64,
}

impl Vehicle {
    pub fn new(params: VehicleParams) -> Result<Self> {
        Ok(Self {
            weight: guards::non_negative("weight", params.weight)?,
            battery_capacity: guards::non_negative("battery_capacity", params.battery_capacity)?,
            consumption_per_km: guards::non_negative(
                "consumption_per_km",
                params.consumption_per_km,
            )?,
            usage: guards::fraction("usage", params.usage)?,
            co2_build_cost_per_kg: guards::non_negative(
                "co2_build_cost_per_kg",
                params.co2_build_cost_per_kg,
            )?,
            co2_battery_build_cost_per_kwh: guards::non_negative(
                "co2_battery_build_cost_per_kwh",
                params.co2_battery_build_cost_per_kwh,
            )?,
            co2_cost_per_consumption: ConsumptionCost {
                basis: params.co2_cost_per_consumption.basis,
                kg_co2_per_unit: guards::non_negative(
                    "co2_cost_per_consumption",
                    params.co2_cost_per_consumption.kg_co2_per_unit,
                )?,
            },
            vehicle_life_km: guards::non_negative("vehicle_life_km", params.vehicle_life_km)?,
            name: params.name,
        })
    }

    /// Same vehicle with a different share of total travel.
    pub fn with_usage(&self, usage: f64) -> Result<Self> {
        let mut params = self.params();
        params.usage = usage;
        Self::new(params)
    }

    /// Constructor inputs that reproduce this vehicle.
    pub fn params(&self) -> VehicleParams {
        VehicleParams {
            name: self.name.clone(),
            weight: self.weight,
            battery_capacity: self.battery_capacity,
            consumption_per_km: self.consumption_per_km,
            usage: self.usage,
            co2_build_cost_per_kg: self.co2_build_cost_per_kg,
            co2_battery_build_cost_per_kwh: self.co2_battery_build_cost_per_kwh,
            co2_cost_per_consumption: self.co2_cost_per_consumption,
            vehicle_life_km: self.vehicle_life_km,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn battery_capacity(&self) -> f64 {
        self.battery_capacity
    }

    pub fn consumption_per_km(&self) -> f64 {
        self.consumption_per_km
    }

    pub fn usage(&self) -> f64 {
        self.usage
    }

    pub fn co2_build_cost_per_kg(&self) -> f64 {
        self.co2_build_cost_per_kg
    }

    pub fn co2_battery_build_cost_per_kwh(&self) -> f64 {
        self.co2_battery_build_cost_per_kwh
    }

    pub fn co2_cost_per_consumption(&self) -> ConsumptionCost {
        self.co2_cost_per_consumption
    }

    pub fn vehicle_life_km(&self) -> f64 {
        self.vehicle_life_km
    }

    /// One-time manufacturing emissions, body plus battery (kg CO2).
    pub fn embodied_co2_kg(&self) -> f64 {
        self.weight * self.co2_build_cost_per_kg
            + self.battery_capacity * self.co2_battery_build_cost_per_kwh
    }

    /// Operating emissions per kilometer at the vehicle's own usage share.
    pub fn operating_co2_per_km(&self) -> f64 {
        self.operating_co2_per_km_at(self.usage)
    }

    pub(crate) fn operating_co2_per_km_at(&self, usage: f64) -> f64 {
        self.co2_cost_per_consumption.kg_co2_per_unit * self.consumption_per_km * usage
    }
}

impl TryFrom<VehicleParams> for Vehicle {
    type Error = LcaError;

    fn try_from(params: VehicleParams) -> Result<Self> {
        Self::new(params)
    }
}

impl From<Vehicle> for VehicleParams {
    fn from(vehicle: Vehicle) -> Self {
        vehicle.params()
    }
}

/// Combine two simultaneously owned vehicles, B taking `split` of the travel.
///
/// Weights and batteries add up, consumption is the split-weighted mean.
/// Build costs and life come from `a`. A leg with zero consumption (a plain
/// bicycle) has no energy basis of its own; otherwise both bases must agree.
pub fn blend(name: impl Into<String>, a: &Vehicle, b: &Vehicle, split: f64) -> Result<Vehicle> {
    let split = guards::fraction("split", split)?;
    let (ca, cb) = (a.co2_cost_per_consumption, b.co2_cost_per_consumption);

    let cost = if b.consumption_per_km == 0.0 {
        ca
    } else if a.consumption_per_km == 0.0 {
        cb
    } else if ca.basis != cb.basis {
        return Err(LcaError::BasisMismatch {
            left: ca.basis,
            right: cb.basis,
        });
    } else {
        // Same basis, possibly different intensities: keep the blended
        // per-km emissions equal to the split-weighted per-km emissions.
        let consumption = blended_consumption(a, b, split);
        let emitted = ca.kg_co2_per_unit * a.consumption_per_km * (1.0 - split)
            + cb.kg_co2_per_unit * b.consumption_per_km * split;
        ConsumptionCost {
            basis: ca.basis,
            kg_co2_per_unit: if consumption > 0.0 {
                emitted / consumption
            } else {
                ca.kg_co2_per_unit
            },
        }
    };

    combine(name.into(), a, b, split, cost)
}

/// Like [`blend`], but the caller states the blended consumption cost,
/// reconciling legs that run on different energy carriers.
pub fn blend_reconciled(
    name: impl Into<String>,
    a: &Vehicle,
    b: &Vehicle,
    split: f64,
    cost: ConsumptionCost,
) -> Result<Vehicle> {
    let split = guards::fraction("split", split)?;
    let name = name.into();
    if a.co2_cost_per_consumption.basis != b.co2_cost_per_consumption.basis {
        warn!(
            vehicle = %name,
            basis = ?cost.basis,
            "blending vehicles on different energy bases with a caller-supplied cost"
        );
    }
    combine(name, a, b, split, cost)
}

fn blended_consumption(a: &Vehicle, b: &Vehicle, split: f64) -> f64 {
    a.consumption_per_km * (1.0 - split) + b.consumption_per_km * split
}

fn combine(
    name: String,
    a: &Vehicle,
    b: &Vehicle,
    split: f64,
    cost: ConsumptionCost,
) -> Result<Vehicle> {
    Vehicle::new(VehicleParams {
        name,
        weight: a.weight + b.weight,
        battery_capacity: a.battery_capacity + b.battery_capacity,
        consumption_per_km: blended_consumption(a, b, split),
        usage: 1.0,
        co2_build_cost_per_kg: a.co2_build_cost_per_kg,
        co2_battery_build_cost_per_kwh: a.co2_battery_build_cost_per_kwh,
        co2_cost_per_consumption: cost,
        vehicle_life_km: a.vehicle_life_km,
    })
}
