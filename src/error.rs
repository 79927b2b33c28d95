//! Errors returned before optimization begins.

use num_traits::Float;
use thiserror::Error;

use crate::types::{
    InvalidBacktrackingRateError, InvalidCurvatureParameterError, InvalidMaxIterationsError,
    InvalidStepSizeError, InvalidSufficientDecreaseParameterError, InvalidToleranceError,
};

/// Error returned when a problem or configuration is invalid.
///
/// Every precondition is checked
/// before the objective function is first evaluated,
/// so an error never leaves partial results behind.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ValidationError<A: Float> {
    /// Initial point and bounds have different lengths.
    #[error("initial point has length {point}, but bounds have lengths {lower} and {upper}")]
    LengthMismatch {
        /// Length of initial point.
        point: usize,
        /// Length of lower bounds.
        lower: usize,
        /// Length of upper bounds.
        upper: usize,
    },
    /// A component of the initial point is outside its bounds.
    #[error("initial point component {index} ({value}) is outside bounds [{lower}, {upper}]")]
    OutOfBounds {
        /// Index of offending component.
        index: usize,
        /// Value of offending component.
        value: A,
        /// Lower bound of offending component.
        lower: A,
        /// Upper bound of offending component.
        upper: A,
    },
    /// Minimum step-size is not below initial step-size.
    #[error("minimum step-size ({min}) must be below initial step-size ({initial})")]
    MinStepSizeTooLarge {
        /// Minimum step-size.
        min: A,
        /// Initial step-size.
        initial: A,
    },
    /// Curvature parameter is below sufficient decrease parameter.
    #[error("curvature parameter ({c_2}) must not be below sufficient decrease parameter ({c_1})")]
    CurvatureBelowSufficientDecrease {
        /// Sufficient decrease parameter.
        c_1: A,
        /// Curvature parameter.
        c_2: A,
    },
    /// Maximum iterations is invalid.
    #[error("invalid maximum iterations: {0}")]
    MaxIterations(InvalidMaxIterationsError),
    /// Tolerance is invalid.
    #[error("invalid tolerance: {0}")]
    Tolerance(InvalidToleranceError<A>),
    /// Sufficient decrease parameter is invalid.
    #[error("invalid sufficient decrease parameter: {0}")]
    SufficientDecreaseParameter(InvalidSufficientDecreaseParameterError<A>),
    /// Curvature parameter is invalid.
    #[error("invalid curvature parameter: {0}")]
    CurvatureParameter(InvalidCurvatureParameterError<A>),
    /// Backtracking rate is invalid.
    #[error("invalid backtracking rate: {0}")]
    BacktrackingRate(InvalidBacktrackingRateError<A>),
    /// A step-size is invalid.
    #[error("invalid step-size: {0}")]
    StepSize(InvalidStepSizeError<A>),
}

macro_rules! from_invalid {
    ( $variant:ident, $error:ident ) => {
        impl<A: Float> From<$error<A>> for ValidationError<A> {
            fn from(e: $error<A>) -> Self {
                Self::$variant(e)
            }
        }
    };
}

from_invalid!(Tolerance, InvalidToleranceError);
from_invalid!(
    SufficientDecreaseParameter,
    InvalidSufficientDecreaseParameterError
);
from_invalid!(CurvatureParameter, InvalidCurvatureParameterError);
from_invalid!(BacktrackingRate, InvalidBacktrackingRateError);
from_invalid!(StepSize, InvalidStepSizeError);

impl<A: Float> From<InvalidMaxIterationsError> for ValidationError<A> {
    fn from(e: InvalidMaxIterationsError) -> Self {
        Self::MaxIterations(e)
    }
}
