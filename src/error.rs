use thiserror::Error;

use crate::vehicle::EnergyBasis;

/// Errors for vehicle construction, phase inputs and scenario evaluation.
#[derive(Debug, Error)]
pub enum LcaError {
    #[error("invalid parameter {field}: {value} (must be finite and non-negative)")]
    InvalidParameter { field: &'static str, value: f64 },
    #[error("{field} must be within [0, 1], got {value}")]
    FractionOutOfRange { field: &'static str, value: f64 },
    #[error("distance sequence must contain at least one point")]
    EmptyDistances,
    #[error("distance sequence decreases or is not finite at index {index}")]
    NonMonotonicDistances { index: usize },
    #[error("{quantity} of vehicle {vehicle:?} is not finite")]
    NonFiniteCo2 {
        vehicle: String,
        quantity: &'static str,
    },
    #[error("scenario {0:?} has no phases")]
    EmptyScenario(String),
    #[error("cannot blend consumption costs on different bases ({left:?} vs {right:?})")]
    BasisMismatch {
        left: EnergyBasis,
        right: EnergyBasis,
    },
    #[error("reference scenario has a zero terminal total")]
    ZeroReference,
    #[error("unknown vehicle: {0}")]
    UnknownVehicle(String),
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
    #[error("invalid fleet parameters: {0}")]
    InvalidFleet(&'static str),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LcaError>;
