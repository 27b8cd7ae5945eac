use crate::core::formulas::volumetrics::MetricError;
use crate::core::models::gradation::AggregateId;
use crate::core::models::materials::{GravityConstant, MAX_PLAUSIBLE_SPECIFIC_GRAVITY};
use std::fmt;

/// A non-fatal finding reported alongside a successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// A material constant lies outside `(0, 3.2)`.
    SuspectSpecificGravity {
        constant: GravityConstant,
        value: f64,
    },
    /// A specimen produced a finite Gmb outside `(0, 3.2)`.
    ImplausibleBulkGravity { index: usize, gmb: f64 },
    /// A specimen's metrics could not be derived; it is excluded downstream.
    InvalidSpecimen { index: usize, error: MetricError },
    /// The mix proportions do not sum to 1.0 within tolerance.
    MixProportionImbalance { sum: f64, tolerance: f64 },
    /// A single proportion lies outside `[0, 1]`.
    ProportionOutOfRange { aggregate: AggregateId, value: f64 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::SuspectSpecificGravity { constant, value } => write!(
                f,
                "{} = {} is outside the plausible range (0, {}) for the {}",
                constant,
                value,
                MAX_PLAUSIBLE_SPECIFIC_GRAVITY,
                constant.description()
            ),
            Warning::ImplausibleBulkGravity { index, gmb } => write!(
                f,
                "Specimen {}: Gmb = {} is physically implausible; check the weights",
                index + 1,
                gmb
            ),
            Warning::InvalidSpecimen { index, error } => {
                write!(f, "Specimen {} excluded: {}", index + 1, error)
            }
            Warning::MixProportionImbalance { sum, tolerance } => write!(
                f,
                "Mix proportions sum to {} instead of 1.0 (tolerance {}); the blend is not renormalised",
                sum, tolerance
            ),
            Warning::ProportionOutOfRange { aggregate, value } => write!(
                f,
                "Proportion of {} is {}, outside [0, 1]",
                aggregate, value
            ),
        }
    }
}
