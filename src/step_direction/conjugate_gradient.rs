//! Projected conjugate-gradient step-direction.
//!
//! Conjugate directions are only meaningful
//! while the set of free components is unchanged,
//! so [`ConjugateGradient`] tracks how many conjugate directions
//! have been used in a row
//! and restarts with steepest descent
//! whenever the free set changes
//! or a conjugate direction is rejected.
//!
//! The Hestenes-Stiefel update is used,
//! with a correction for components
//! pinned by projection in the previous step.

use num_traits::{AsPrimitive, Float};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::vector::{cosine, dot};

use super::MAX_DESCENT_COSINE;

/// Conjugate-gradient bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConjugateGradient {
    counter: usize,
    used: bool,
}

impl ConjugateGradient {
    /// Number of conjugate directions accepted in a row.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Return whether the last direction chosen was conjugate.
    pub fn used(&self) -> bool {
        self.used
    }

    /// Return whether a conjugate direction may be tried
    /// on 1-based `iteration`
    /// for points of length `len`.
    pub fn is_allowed(&self, iteration: usize, len: usize, free_unchanged: bool) -> bool {
        iteration > 1 && self.counter <= len && free_unchanged
    }

    /// Record an accepted conjugate direction.
    pub fn accept(&mut self) {
        self.counter += 1;
        self.used = true;
    }

    /// Record a steepest descent direction.
    pub fn reset(&mut self) {
        self.counter = 0;
        self.used = false;
    }
}

/// Return a conjugate direction,
/// or `None` if it would not be a clear descent direction.
///
/// - `derivatives`: derivatives at the current point
/// - `last_derivatives`: derivatives at the previous point
/// - `last_direction`: direction of the previous step
/// - `effective_step_sizes`: `(i, \alpha_i)` for components
///   pinned by the previous step
pub fn conjugate_direction<A>(
    derivatives: &[A],
    last_derivatives: &[A],
    last_direction: &[A],
    effective_step_sizes: &[(usize, A)],
) -> Option<Vec<A>>
where
    A: 'static + Float,
    f64: AsPrimitive<A>,
{
    let mut y = derivatives
        .iter()
        .zip(last_derivatives)
        .map(|(x, last)| *x - *last)
        .collect::<Vec<_>>();
    for (i, step_size) in effective_step_sizes {
        y[*i] = y[*i] + *step_size * last_direction[*i].powi(2);
    }

    let beta = dot(&y, derivatives) / dot(&y, last_direction);
    if !(beta.is_finite() && beta > A::zero()) {
        return None;
    }

    let direction = derivatives
        .iter()
        .zip(last_direction)
        .map(|(x, last)| beta * *last - *x)
        .collect::<Vec<_>>();

    // NaN must also reject.
    if cosine(&direction, derivatives) < MAX_DESCENT_COSINE.as_() {
        Some(direction)
    } else {
        None
    }
}
