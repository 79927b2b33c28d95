//! Box constraints.

use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Lower and upper bounds for each component of a point.
///
/// Bounds may be infinite.
/// Empty bounds are expanded to infinite bounds
/// of the length of the initial point
/// when optimization begins,
/// so `Bounds::default()` leaves a problem unconstrained.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds<A> {
    lower: Vec<A>,
    upper: Vec<A>,
}

impl<A> Default for Bounds<A> {
    fn default() -> Self {
        Self {
            lower: Vec::new(),
            upper: Vec::new(),
        }
    }
}

impl<A> Bounds<A>
where
    A: Float,
{
    /// Return bounds from lower and upper components.
    ///
    /// Either may be empty.
    pub fn new(lower: Vec<A>, upper: Vec<A>) -> Self {
        Self { lower, upper }
    }

    /// Return infinite bounds for `len` components.
    pub fn unbounded(len: usize) -> Self {
        Self {
            lower: vec![A::neg_infinity(); len],
            upper: vec![A::infinity(); len],
        }
    }

    /// Lower bound of each component.
    pub fn lower(&self) -> &[A] {
        &self.lower
    }

    /// Upper bound of each component.
    pub fn upper(&self) -> &[A] {
        &self.upper
    }

    /// Return whether any bound is finite.
    pub fn is_constrained(&self) -> bool {
        self.lower
            .iter()
            .chain(self.upper.iter())
            .any(|x| x.is_finite())
    }

    /// Return whether `point` satisfies every bound.
    pub fn contains(&self, point: &[A]) -> bool {
        point.len() == self.lower.len()
            && point.len() == self.upper.len()
            && point
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(x, (lo, hi))| lo <= x && x <= hi)
    }

    /// Expand empty sides to infinite bounds of length `len`.
    pub(crate) fn expanded(mut self, len: usize) -> Self {
        if self.lower.is_empty() {
            self.lower = vec![A::neg_infinity(); len];
        }
        if self.upper.is_empty() {
            self.upper = vec![A::infinity(); len];
        }
        self
    }

    /// Check `point` has the length of these bounds
    /// and satisfies them.
    pub(crate) fn validate(&self, point: &[A]) -> Result<(), ValidationError<A>> {
        if point.len() != self.lower.len() || point.len() != self.upper.len() {
            return Err(ValidationError::LengthMismatch {
                point: point.len(),
                lower: self.lower.len(),
                upper: self.upper.len(),
            });
        }
        match point
            .iter()
            .zip(self.lower.iter().zip(&self.upper))
            .position(|(x, (lo, hi))| !(lo <= x && x <= hi))
        {
            Some(index) => Err(ValidationError::OutOfBounds {
                index,
                value: point[index],
                lower: self.lower[index],
                upper: self.upper[index],
            }),
            None => Ok(()),
        }
    }
}
