use serde::Serialize;
use tracing::debug;

use crate::accumulator::co2_analysis_with_usage;
use crate::error::{LcaError, Result};
use crate::guards;
use crate::vehicle::Vehicle;

/// One contiguous distance interval driven with a single (possibly blended) vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    vehicle: Vehicle,
    distances: Vec<f64>,
    usage: f64,
}

impl Phase {
    /// Distances must be non-empty and non-decreasing. Usage defaults to the vehicle's.
    pub fn new(vehicle: Vehicle, distances: Vec<f64>) -> Result<Self> {
        guards::distances(&distances)?;
        let usage = vehicle.usage();
        Ok(Self {
            vehicle,
            distances,
            usage,
        })
    }

    /// Override the share of travel this phase's vehicle covers.
    pub fn with_usage(self, usage: f64) -> Result<Self> {
        Ok(Self {
            usage: guards::fraction("usage", usage)?,
            ..self
        })
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn usage(&self) -> f64 {
        self.usage
    }
}

/// (distance, cumulative CO2) sample.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub distance_km: f64,
    pub co2_kg: f64,
}

/// Continuous emissions trajectory over every phase of a scenario, in phase order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn distances(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.distance_km).collect()
    }

    pub fn co2(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.co2_kg).collect()
    }

    /// Cumulative CO2 at the last sample; 0 for an empty trajectory.
    pub fn terminal_co2_kg(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.co2_kg)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Ordered ownership phases. Evaluation recomputes the carried debt every time.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    name: String,
    phases: Vec<Phase>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, phases: Vec<Phase>) -> Self {
        Self {
            name: name.into(),
            phases,
        }
    }

    /// Append a phase, returning the extended scenario.
    pub fn then(mut self, phase: Phase) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Evaluate from zero initial debt.
    pub fn evaluate(&self) -> Result<Trajectory> {
        self.evaluate_with_debt(0.0)
    }

    /// Evaluate phases in order, threading each phase's final total into the next.
    pub fn evaluate_with_debt(&self, debt0: f64) -> Result<Trajectory> {
        if self.phases.is_empty() {
            return Err(LcaError::EmptyScenario(self.name.clone()));
        }

        let total: usize = self.phases.iter().map(|p| p.distances.len()).sum();
        let mut points = Vec::with_capacity(total);
        let mut debt = debt0;

        for (index, phase) in self.phases.iter().enumerate() {
            debug!(
                scenario = %self.name,
                phase = index,
                vehicle = phase.vehicle.name(),
                debt,
                "evaluating phase"
            );
            let co2 =
                co2_analysis_with_usage(&phase.vehicle, phase.usage, &phase.distances, debt)?;
            points.extend(
                phase
                    .distances
                    .iter()
                    .zip(&co2)
                    .map(|(&distance_km, &co2_kg)| TrajectoryPoint {
                        distance_km,
                        co2_kg,
                    }),
            );
            // Phase distances are never empty, so there is always a last value.
            if let Some(&last) = co2.last() {
                debt = last;
            }
        }

        Ok(Trajectory { points })
    }
}

/// A scenario's name together with its evaluated trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub trajectory: Trajectory,
}

/// Evaluate independent scenarios, preserving input order.
pub fn evaluate_all(scenarios: &[Scenario]) -> Result<Vec<ScenarioResult>> {
    scenarios
        .iter()
        .map(|s| -> Result<ScenarioResult> {
            Ok(ScenarioResult {
                name: s.name.clone(),
                trajectory: s.evaluate()?,
            })
        })
        .collect()
}
