//! Projection of steps onto box constraints.
//!
//! A step `\vec{x} + \alpha \vec{d}` is clamped component-wise
//! to the nearest bound in the direction of travel.
//! Clamped components form the active set.
//! Each activated component also records an effective step-size,
//! `\alpha - violation / d_i`,
//! used to correct conjugate-gradient updates.

use derive_getters::{Dissolve, Getters};
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Bounds;

/// Indices of components pinned at a bound.
///
/// Indices are ascending on each side,
/// and no index is on both sides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Getters)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActiveSet {
    /// Components pinned at their lower bound.
    lower: Vec<usize>,
    /// Components pinned at their upper bound.
    upper: Vec<usize>,
}

impl ActiveSet {
    /// Number of pinned components.
    pub fn len(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    /// Return whether no component is pinned.
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty() && self.upper.is_empty()
    }

    /// Return whether component `i` is pinned.
    pub fn contains(&self, i: usize) -> bool {
        self.lower.binary_search(&i).is_ok() || self.upper.binary_search(&i).is_ok()
    }

    /// Ascending indices of components in `0..len` not pinned.
    pub fn free_indices(&self, len: usize) -> Vec<usize> {
        (0..len).filter(|i| !self.contains(*i)).collect()
    }
}

/// A step projected onto bounds.
#[derive(Clone, Debug, PartialEq, Getters, Dissolve)]
#[dissolve(rename = "into_parts")]
pub struct Projection<A> {
    /// Feasible point after projection.
    point: Vec<A>,
    /// Components pinned by projection.
    active: ActiveSet,
    /// `(i, \alpha_i)` for each pinned component,
    /// where `\alpha_i` is the step-size
    /// that would have reached the bound.
    effective_step_sizes: Vec<(usize, A)>,
}

/// Project a step of `step_size` along `direction` from `point`
/// onto `bounds`.
///
/// A component moving toward a bound it reaches or crosses
/// is set exactly to that bound.
/// Components not moving are never pinned.
pub fn project<A>(step_size: A, point: &[A], direction: &[A], bounds: &Bounds<A>) -> Projection<A>
where
    A: Float,
{
    let mut active = ActiveSet::default();
    let mut effective_step_sizes = Vec::new();
    let point = point
        .iter()
        .zip(direction)
        .zip(bounds.lower().iter().zip(bounds.upper()))
        .enumerate()
        .map(|(i, ((&x, &d), (&lower, &upper)))| {
            let x_at_step = x + step_size * d;
            if d < A::zero() {
                let violation = lower - x_at_step;
                if violation >= A::zero() {
                    active.lower.push(i);
                    effective_step_sizes.push((i, step_size - violation / d));
                    return lower;
                }
            } else if d > A::zero() {
                let violation = x_at_step - upper;
                if violation >= A::zero() {
                    active.upper.push(i);
                    effective_step_sizes.push((i, step_size - violation / d));
                    return upper;
                }
            }
            x_at_step
        })
        .collect();
    Projection {
        point,
        active,
        effective_step_sizes,
    }
}
