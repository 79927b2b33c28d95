//! Bounded parameter types.
//!
//! Each type can only hold a value in its documented range,
//! so a configuration built from them
//! is valid parameter-by-parameter.
//! Relationships between parameters
//! are checked by [`crate::Config::validate`].

use std::ops::Mul;

use derive_more::Display;
use derive_num_bounded::{
    derive_float_bounds, derive_into_inner, derive_new_from_bounded_float,
    derive_new_from_lower_bounded, derive_new_from_lower_bounded_float,
};
use num_traits::{bounds::LowerBounded, AsPrimitive};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// `#[serde(try_from = "A")]` would validate on deserialization,
// but `TryFrom<A>` cannot be implemented generically
// without conflicting with the blanket implementation in `core`.

/// Maximum number of iterations,
/// at least one.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MaxIterations(usize);

derive_new_from_lower_bounded!(MaxIterations(usize));
derive_into_inner!(MaxIterations(usize));

impl Default for MaxIterations {
    fn default() -> Self {
        Self(100)
    }
}

impl LowerBounded for MaxIterations {
    fn min_value() -> Self {
        Self(1)
    }
}

/// Relative tolerance on the norm of free derivatives,
/// in `(0, 1)`.
///
/// A point is near a minima
/// when `||\vec{dx}_free|| <= tolerance (1 + |fx|)`.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tolerance<A>(A);

derive_float_bounds!(Tolerance<A>, above 0.0, below 1.0);
derive_new_from_bounded_float!(Tolerance<A>);
derive_into_inner!(Tolerance<A>);

impl<A> Default for Tolerance<A>
where
    A: 'static + Copy,
    f64: AsPrimitive<A>,
{
    fn default() -> Self {
        Self(0.000001.as_())
    }
}

/// The sufficient decrease parameter,
/// `c_1`,
/// in `(0, 0.5)`.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SufficientDecreaseParameter<A>(A);

derive_float_bounds!(SufficientDecreaseParameter<A>, above 0.0, below 0.5);
derive_new_from_bounded_float!(SufficientDecreaseParameter<A>);
derive_into_inner!(SufficientDecreaseParameter<A>);

impl<A> Default for SufficientDecreaseParameter<A>
where
    A: 'static + Copy,
    f64: AsPrimitive<A>,
{
    fn default() -> Self {
        Self(0.1.as_())
    }
}

impl<A> Mul<A> for SufficientDecreaseParameter<A>
where
    A: Mul<Output = A>,
{
    type Output = A;

    fn mul(self, rhs: A) -> Self::Output {
        self.0 * rhs
    }
}

/// The curvature parameter,
/// `c_2`,
/// in `(0, 1)`.
///
/// It must also be at least the sufficient decrease parameter.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CurvatureParameter<A>(A);

derive_float_bounds!(CurvatureParameter<A>, above 0.0, below 1.0);
derive_new_from_bounded_float!(CurvatureParameter<A>);
derive_into_inner!(CurvatureParameter<A>);

impl<A> Default for CurvatureParameter<A>
where
    A: 'static + Copy,
    f64: AsPrimitive<A>,
{
    fn default() -> Self {
        Self(0.95.as_())
    }
}

impl<A> Mul<A> for CurvatureParameter<A>
where
    A: Mul<Output = A>,
{
    type Output = A;

    fn mul(self, rhs: A) -> Self::Output {
        self.0 * rhs
    }
}

/// Rate to decrease step-size while line-searching,
/// in `(0, 1)`.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BacktrackingRate<A>(A);

derive_float_bounds!(BacktrackingRate<A>, above 0.0, below 1.0);
derive_new_from_bounded_float!(BacktrackingRate<A>);
derive_into_inner!(BacktrackingRate<A>);

impl<A> Default for BacktrackingRate<A>
where
    A: 'static + Copy,
    f64: AsPrimitive<A>,
{
    fn default() -> Self {
        Self(0.5.as_())
    }
}

impl<A> Mul<StepSize<A>> for BacktrackingRate<A>
where
    A: Mul<Output = A>,
{
    type Output = StepSize<A>;

    fn mul(self, rhs: StepSize<A>) -> Self::Output {
        StepSize(self.0 * rhs.0)
    }
}

/// Multiplier for each component of a step-direction,
/// greater than zero.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StepSize<A>(pub(crate) A);

derive_float_bounds!(StepSize<A>, above 0.0);
derive_new_from_lower_bounded_float!(StepSize<A>);
derive_into_inner!(StepSize<A>);

impl<A> Mul<A> for StepSize<A>
where
    A: Mul<Output = A>,
{
    type Output = A;

    fn mul(self, rhs: A) -> Self::Output {
        self.0 * rhs
    }
}
