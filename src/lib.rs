#![forbid(unsafe_code)]

//! CO2 life-cycle accounting for personal vehicles.
//!
//! A [`Vehicle`] carries embodied (manufacturing) and operating emission
//! parameters. [`co2_analysis`] turns one vehicle and a distance range into a
//! cumulative CO2 curve, and a [`Scenario`] chains several ownership phases,
//! carrying each phase's total into the next as debt.

pub mod accumulator;
pub mod catalog;
pub mod config;
pub mod distance;
pub mod error;
pub mod fleet;
pub mod guards;
pub mod report;
pub mod scenario;
pub mod vehicle;

pub use accumulator::{co2_analysis, co2_analysis_with_usage};
pub use catalog::{
    reference_scenarios, single_vehicle_scenarios, EmissionFactors, ReferenceFleet,
    ScenarioSettings,
};
pub use config::AnalysisConfig;
pub use distance::linspace;
pub use error::{LcaError, Result};
pub use fleet::{percent_change, project, remaining_distance_km, terminal_ratio, FleetBaseline};
pub use scenario::{evaluate_all, Phase, Scenario, ScenarioResult, Trajectory, TrajectoryPoint};
pub use vehicle::{blend, blend_reconciled, ConsumptionCost, EnergyBasis, Vehicle, VehicleParams};
