//! Results of optimization.

use derive_more::AddAssign;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why optimization is or is not running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    /// More iterations remain.
    Running,
    /// The point satisfies first-order stationarity.
    Converged,
    /// Maximum iterations reached without convergence.
    Exhausted,
    /// A line-search found no acceptable step
    /// and the point is not stationary.
    LineSearchFailed,
}

impl Status {
    /// Return whether optimization has stopped.
    pub fn is_done(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Return whether optimization converged.
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged)
    }
}

/// Number of objective function calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, AddAssign)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Evaluations {
    /// Calls to the objective function.
    pub values: usize,
    /// Calls to the derivative function.
    pub derivatives: usize,
}

/// Per-iteration records,
/// one entry per iteration executed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct History<A> {
    /// Objective value at the start of each iteration.
    pub values: Vec<A>,
    /// Norm of free derivatives after each iteration.
    pub gradient_norms: Vec<A>,
    /// Step-size accepted each iteration,
    /// or the last step-size tried if line-search failed.
    pub step_sizes: Vec<A>,
}

impl<A> Default for History<A> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            gradient_norms: Vec::new(),
            step_sizes: Vec::new(),
        }
    }
}

impl<A> History<A> {
    /// Number of iterations recorded.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return whether no iteration was recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn push(&mut self, value: A, gradient_norm: A, step_size: A) {
        self.values.push(value);
        self.gradient_norms.push(gradient_norm);
        self.step_sizes.push(step_size);
    }
}

/// Final result of optimization.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution<A> {
    /// Best point found.
    pub point: Vec<A>,
    /// Objective value of the initial point.
    pub initial_value: A,
    /// Objective value of `point`.
    pub value: A,
    /// Whether `point` satisfies first-order stationarity.
    pub converged: bool,
    /// Why optimization stopped.
    pub status: Status,
    /// Number of iterations executed.
    pub iterations: usize,
    /// See [`History`].
    pub history: History<A>,
    /// See [`Evaluations`].
    pub evaluations: Evaluations,
}
