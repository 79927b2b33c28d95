//! Step-directions for projected descent.

pub mod conjugate_gradient;
mod steepest_descent;

pub use self::steepest_descent::steepest_descent;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Directions at this cosine with derivatives or above
/// are not clear descent directions.
pub(crate) const MAX_DESCENT_COSINE: f64 = -0.001;

/// Options for step-direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum StepDirection {
    /// Steepest descent,
    /// every iteration.
    #[default]
    Steepest,
    /// Projected conjugate-gradient
    /// when the free set is unchanged,
    /// falling back to steepest descent otherwise.
    ConjugateGradient,
}
