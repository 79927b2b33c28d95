//! First-order stationarity for box constraints.
//!
//! A point is stationary when
//! free derivatives are small,
//! derivatives of components pinned at their lower bound are non-negative,
//! and derivatives of components pinned at their upper bound are non-positive.
//! Pinned components with such derivatives
//! could only descend by leaving the box.

use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{projection::ActiveSet, types::Tolerance};

/// Quantities deciding stationarity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stationarity<A> {
    /// Norm of derivatives of free components.
    pub free_norm: A,
    /// Smallest derivative of components pinned at their lower bound.
    pub lower_min: Option<A>,
    /// Largest derivative of components pinned at their upper bound.
    pub upper_max: Option<A>,
    /// Whether every derivative at a lower bound is non-negative.
    pub lower_ok: bool,
    /// Whether every derivative at an upper bound is non-positive.
    pub upper_ok: bool,
}

impl<A> Stationarity<A>
where
    A: Float,
{
    /// Return stationarity quantities of `derivatives`.
    pub fn new(derivatives: &[A], active: &ActiveSet, free: &[usize]) -> Self {
        let mut lower = active.lower().iter().map(|i| derivatives[*i]);
        let mut upper = active.upper().iter().map(|i| derivatives[*i]);
        Self {
            free_norm: free
                .iter()
                .fold(A::zero(), |acc, i| acc + derivatives[*i].powi(2))
                .sqrt(),
            lower_min: lower.clone().reduce(A::min),
            upper_max: upper.clone().reduce(A::max),
            lower_ok: lower.all(|x| x >= A::zero()),
            upper_ok: upper.all(|x| x <= A::zero()),
        }
    }

    /// Tolerance on `free_norm` at objective value `value`.
    pub fn target(value: A, tolerance: Tolerance<A>) -> A {
        tolerance.into_inner() * (A::one() + value.abs())
    }

    /// Return whether these quantities are stationary
    /// at objective value `value`.
    pub fn is_stationary(&self, value: A, tolerance: Tolerance<A>) -> bool {
        self.free_norm <= Self::target(value, tolerance) && self.lower_ok && self.upper_ok
    }
}
