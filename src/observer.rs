//! Per-iteration observation.

use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// State of optimization after an iteration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot<A> {
    /// 1-based iteration just executed.
    pub iteration: usize,
    /// Whether the iteration stepped along a conjugate direction.
    pub conjugate_gradient_used: bool,
    /// Norm of free derivatives.
    pub gradient_norm: A,
    /// Norm of free derivatives needed to converge.
    pub target_tolerance: A,
    /// Step-size of the iteration.
    pub step_size: A,
    /// Objective value after the iteration.
    pub value: A,
    /// Number of components pinned at their lower bound.
    pub num_active_lower: usize,
    /// Number of components pinned at their upper bound.
    pub num_active_upper: usize,
    /// Smallest derivative at a lower bound.
    pub lower_min_derivative: Option<A>,
    /// Largest derivative at an upper bound.
    pub upper_max_derivative: Option<A>,
    /// Whether every derivative at a lower bound is non-negative.
    pub lower_ok: bool,
    /// Whether every derivative at an upper bound is non-positive.
    pub upper_ok: bool,
}

/// Observes optimization after every iteration.
pub trait Observer<A> {
    /// Observe a snapshot of the iteration just executed.
    fn observe(&mut self, snapshot: &Snapshot<A>);
}

/// Blanket implementation for observer closures.
impl<A, F> Observer<A> for F
where
    F: FnMut(&Snapshot<A>),
{
    fn observe(&mut self, snapshot: &Snapshot<A>) {
        self(snapshot)
    }
}

/// A no-op observer.
impl<A> Observer<A> for () {
    fn observe(&mut self, _snapshot: &Snapshot<A>) {}
}

impl<A> Snapshot<A>
where
    A: Float,
{
    /// Log this snapshot at `info` level.
    pub fn log(&self) {
        let f = |x: A| x.to_f64().unwrap_or(f64::NAN);
        let bound = |x: Option<A>| x.map_or_else(|| "-".to_owned(), |x| format!("{:e}", f(x)));
        log::info!(
            "iteration {}{}: value = {:e}, free gradient norm = {:e} (target {:e}), step-size = {:e}, active lower = {} ({}, min derivative {}), active upper = {} ({}, max derivative {})",
            self.iteration,
            if self.conjugate_gradient_used { " (cg)" } else { "" },
            f(self.value),
            f(self.gradient_norm),
            f(self.target_tolerance),
            f(self.step_size),
            self.num_active_lower,
            if self.lower_ok { "ok" } else { "violated" },
            bound(self.lower_min_derivative),
            self.num_active_upper,
            if self.upper_ok { "ok" } else { "violated" },
            bound(self.upper_max_derivative),
        );
    }
}
