//! Projected descent optimization-loop.
//!
//! Each iteration chooses a step-direction,
//! line-searches along it within bounds,
//! and checks first-order stationarity.
//! Optimization stops when the point is stationary,
//! when a line-search fails,
//! or when iterations run out.
//!
//! # Examples
//!
//! ```
//! use optimal_box::{prelude::*, Bounds, Config, Optimizer};
//!
//! let mut optimizer = Optimizer::new(
//!     |x: &[f64]| -> f64 { x.iter().map(|x| x.powi(2)).sum() },
//!     |x: &[f64]| -> Vec<f64> { x.iter().map(|x| 2.0 * x).collect() },
//!     &[5.0, 5.0],
//!     Bounds::new(vec![1.0, -10.0], vec![10.0, 10.0]),
//!     Config {
//!         verbose: false,
//!         ..Config::default()
//!     },
//!     (),
//! )
//! .unwrap();
//! while let Some(optimizer) = optimizer.next() {
//!     println!("{:?}", optimizer.state().point());
//! }
//! assert!(optimizer.status().is_converged());
//! ```

use std::mem;

use derive_getters::Getters;
use num_traits::{AsPrimitive, Float};
use streaming_iterator::StreamingIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    convergence::Stationarity,
    line_search::search,
    observer::{Observer, Snapshot},
    projection::ActiveSet,
    step_direction::{
        conjugate_gradient::{conjugate_direction, ConjugateGradient},
        steepest_descent, StepDirection,
    },
    Bounds, Config, Evaluations, History, Solution, Status, ValidationError,
};

/// Iterations before stationarity alone can stop optimization.
const MIN_ITERATIONS_TO_CONVERGE: usize = 3;

/// A running projected descent optimizer.
#[derive(Clone, Debug, Getters)]
pub struct Optimizer<A, F, FD, O> {
    /// Optimizer configuration.
    config: Config<A>,

    /// Bounds of the problem,
    /// expanded to the length of the initial point.
    bounds: Bounds<A>,

    #[getter(skip)]
    constrained: bool,

    /// Objective function to minimize.
    #[getter(skip)]
    obj_func: F,

    /// Function returning partial derivatives
    /// of objective function to minimize.
    #[getter(skip)]
    obj_func_d: FD,

    #[getter(skip)]
    observer: O,

    /// Objective value of the initial point.
    initial_value: A,

    /// State of optimizer.
    state: State<A>,

    /// Records of iterations executed.
    history: History<A>,

    /// Whether optimization is running.
    status: Status,

    /// Objective function calls so far.
    evaluations: Evaluations,
}

/// Projected descent state.
#[derive(Clone, Debug, PartialEq, Getters)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State<A> {
    /// Current point.
    point: Vec<A>,
    /// Objective value of current point.
    value: A,
    /// Derivatives at current point.
    derivatives: Vec<A>,
    /// Derivatives at previous point.
    last_derivatives: Vec<A>,
    /// Unit direction of previous step.
    last_direction: Vec<A>,
    /// Components pinned by previous step.
    active: ActiveSet,
    /// Effective step-sizes of components pinned by previous step.
    effective_step_sizes: Vec<(usize, A)>,
    /// Components not pinned by previous step.
    free: Vec<usize>,
    /// Components not pinned by the step before previous.
    last_free: Vec<usize>,
    /// See [`ConjugateGradient`].
    conjugate_gradient: ConjugateGradient,
    /// Iterations executed.
    iteration: usize,
}

impl<A, F, FD, O> Optimizer<A, F, FD, O>
where
    A: 'static + Float,
    f64: AsPrimitive<A>,
    F: Fn(&[A]) -> A,
    FD: Fn(&[A]) -> Vec<A>,
    O: Observer<A>,
{
    /// Return a new optimizer
    /// starting from `initial_point`
    /// if the problem and configuration are valid.
    ///
    /// `initial_point` is copied,
    /// and evaluated only after validation.
    pub fn new(
        obj_func: F,
        obj_func_d: FD,
        initial_point: &[A],
        bounds: Bounds<A>,
        config: Config<A>,
        observer: O,
    ) -> Result<Self, ValidationError<A>> {
        config.validate()?;
        let bounds = bounds.expanded(initial_point.len());
        bounds.validate(initial_point)?;

        let point = initial_point.to_vec();
        let value = obj_func(&point);
        let derivatives = obj_func_d(&point);
        let len = point.len();
        Ok(Self {
            constrained: bounds.is_constrained(),
            state: State {
                point,
                value,
                last_derivatives: derivatives.clone(),
                derivatives,
                last_direction: vec![A::zero(); len],
                active: ActiveSet::default(),
                effective_step_sizes: Vec::new(),
                free: (0..len).collect(),
                last_free: (0..len).collect(),
                conjugate_gradient: ConjugateGradient::default(),
                iteration: 0,
            },
            history: History::default(),
            status: Status::Running,
            evaluations: Evaluations {
                values: 1,
                derivatives: 1,
            },
            initial_value: value,
            config,
            bounds,
            obj_func,
            obj_func_d,
            observer,
        })
    }

    /// Run until optimization stops
    /// and return the solution.
    pub fn run(mut self) -> Solution<A> {
        while !self.status.is_done() {
            self.step();
        }
        self.into_solution()
    }

    fn step(&mut self) {
        if self.status.is_done() {
            return;
        }

        let state = &mut self.state;
        state.iteration += 1;
        let value = state.value;

        let direction = choose_direction(self.config.direction, state);
        let searched = search(
            &self.config,
            &self.obj_func,
            &self.obj_func_d,
            &self.bounds,
            self.constrained,
            &state.point,
            state.value,
            &state.derivatives,
            direction,
        );
        self.evaluations += searched.evaluations;

        let len = state.point.len();
        state.last_derivatives = mem::replace(&mut state.derivatives, searched.derivatives);
        state.last_direction = searched.direction;
        state.last_free = mem::replace(&mut state.free, searched.active.free_indices(len));
        state.active = searched.active;
        state.effective_step_sizes = searched.effective_step_sizes;
        state.point = searched.point;
        state.value = searched.value;

        let stationarity = Stationarity::new(&state.derivatives, &state.active, &state.free);
        self.history
            .push(value, stationarity.free_norm, searched.step_size);

        let snapshot = Snapshot {
            iteration: state.iteration,
            conjugate_gradient_used: state.conjugate_gradient.used(),
            gradient_norm: stationarity.free_norm,
            target_tolerance: Stationarity::target(state.value, self.config.tolerance),
            step_size: searched.step_size,
            value: state.value,
            num_active_lower: state.active.lower().len(),
            num_active_upper: state.active.upper().len(),
            lower_min_derivative: stationarity.lower_min,
            upper_max_derivative: stationarity.upper_max,
            lower_ok: stationarity.lower_ok,
            upper_ok: stationarity.upper_ok,
        };
        if self.config.verbose {
            snapshot.log();
        }
        self.observer.observe(&snapshot);

        let is_stationary = stationarity.is_stationary(state.value, self.config.tolerance);
        self.status = if state.iteration >= MIN_ITERATIONS_TO_CONVERGE && is_stationary {
            Status::Converged
        } else if !searched.success {
            // A failed line-search leaves the point unchanged,
            // so it may already be stationary.
            if is_stationary {
                Status::Converged
            } else {
                Status::LineSearchFailed
            }
        } else if state.iteration >= self.config.max_iterations.into_inner() {
            Status::Exhausted
        } else {
            Status::Running
        };

        if self.status == Status::LineSearchFailed {
            log::warn!(
                "line-search failed on iteration {} at a non-stationary point",
                state.iteration
            );
        }
        if self.config.verbose && self.status.is_done() {
            log::info!(
                "stopped after {} iterations: {:?}",
                state.iteration,
                self.status
            );
        }
    }
}

impl<A, F, FD, O> Optimizer<A, F, FD, O> {
    /// Return the solution so far.
    pub fn into_solution(self) -> Solution<A> {
        Solution {
            point: self.state.point,
            initial_value: self.initial_value,
            value: self.state.value,
            converged: self.status.is_converged(),
            status: self.status,
            iterations: self.state.iteration,
            history: self.history,
            evaluations: self.evaluations,
        }
    }
}

impl<A, F, FD, O> StreamingIterator for Optimizer<A, F, FD, O>
where
    A: 'static + Float,
    f64: AsPrimitive<A>,
    F: Fn(&[A]) -> A,
    FD: Fn(&[A]) -> Vec<A>,
    O: Observer<A>,
{
    type Item = Self;

    fn advance(&mut self) {
        self.step()
    }

    fn get(&self) -> Option<&Self::Item> {
        if self.status.is_done() {
            None
        } else {
            Some(self)
        }
    }
}

fn choose_direction<A>(direction: StepDirection, state: &mut State<A>) -> Vec<A>
where
    A: 'static + Float,
    f64: AsPrimitive<A>,
{
    if direction == StepDirection::ConjugateGradient
        && state.conjugate_gradient.is_allowed(
            state.iteration,
            state.point.len(),
            state.free == state.last_free,
        )
    {
        if let Some(direction) = conjugate_direction(
            &state.derivatives,
            &state.last_derivatives,
            &state.last_direction,
            &state.effective_step_sizes,
        ) {
            state.conjugate_gradient.accept();
            return direction;
        }
        log::debug!(
            "rejected conjugate direction on iteration {}",
            state.iteration
        );
    }
    state.conjugate_gradient.reset();
    steepest_descent(&state.derivatives)
}

#[cfg(test)]
mod tests {
    use crate::ConfigBuilder;

    use super::*;

    fn obj_func(point: &[f64]) -> f64 {
        (point[0] - 3.0).powi(2) + (point[1] - 5.0).powi(2)
    }

    fn obj_func_d(point: &[f64]) -> Vec<f64> {
        vec![2.0 * (point[0] - 3.0), 2.0 * (point[1] - 5.0)]
    }

    fn quiet() -> ConfigBuilder<f64> {
        let mut builder = ConfigBuilder::default();
        builder.verbose(false);
        builder
    }

    fn sphere<A>(initial_point: &[A]) -> Solution<A>
    where
        A: 'static + Float + std::fmt::Debug,
        f64: AsPrimitive<A>,
    {
        let two = A::one() + A::one();
        Optimizer::new(
            |x: &[A]| -> A { x.iter().fold(A::zero(), |acc, x| acc + x.powi(2)) },
            move |x: &[A]| -> Vec<A> { x.iter().map(|x| two * *x).collect() },
            initial_point,
            Bounds::default(),
            Config {
                verbose: false,
                ..Config::default()
            },
            (),
        )
        .unwrap()
        .run()
    }

    #[test]
    fn optimizer_should_run_for_any_float_type() {
        let solution = sphere(&[1.0_f64, -2.0]);
        assert!(solution.converged);
        assert_eq!(solution.history.len(), solution.iterations);

        let solution = sphere(&[1.0_f32, -2.0]);
        assert!(solution.value < solution.initial_value);
        assert_eq!(solution.history.len(), solution.iterations);
    }

    #[test]
    fn new_should_reject_before_evaluating() {
        let result = Optimizer::new(
            |_: &[f64]| -> f64 { panic!("evaluated") },
            |_: &[f64]| -> Vec<f64> { panic!("evaluated") },
            &[11.0, 0.0],
            Bounds::new(vec![0.0, 0.0], vec![10.0, 10.0]),
            quiet().build().unwrap(),
            (),
        );
        assert!(matches!(
            result,
            Err(ValidationError::OutOfBounds { index: 0, .. })
        ));
    }

    #[test]
    fn new_should_reject_invalid_direct_configs() {
        let mut config = quiet().build().unwrap();
        config.min_step_size = config.initial_step_size;
        assert!(matches!(
            Optimizer::new(obj_func, obj_func_d, &[0.0, 0.0], Bounds::default(), config, ()),
            Err(ValidationError::MinStepSizeTooLarge { .. })
        ));
    }

    #[test]
    fn free_set_changes_should_restart_with_steepest_descent() {
        // The first step pins the first component at its upper bound,
        // changing the free set.
        let mut used = Vec::new();
        let mut optimizer = Optimizer::new(
            obj_func,
            obj_func_d,
            &[0.5, 0.5],
            Bounds::new(vec![0.0, 0.0], vec![2.0, 10.0]),
            quiet()
                .direction(StepDirection::ConjugateGradient)
                .build()
                .unwrap(),
            |x: &Snapshot<f64>| used.push(x.conjugate_gradient_used),
        )
        .unwrap();

        optimizer.advance();
        assert_eq!(optimizer.state().point()[0], 2.0);
        assert_eq!(optimizer.state().free(), &vec![1]);
        assert_eq!(optimizer.state().last_free(), &vec![0, 1]);

        optimizer.advance();
        assert_eq!(optimizer.state().conjugate_gradient().counter(), 0);
        assert!(!optimizer.state().conjugate_gradient().used());
        drop(optimizer);
        assert_eq!(used, vec![false, false]);
    }

    #[test]
    fn history_should_have_one_entry_per_iteration() {
        let solution = Optimizer::new(
            obj_func,
            obj_func_d,
            &[0.0, 0.0],
            Bounds::default(),
            quiet().build().unwrap(),
            (),
        )
        .unwrap()
        .run();
        assert!(solution.converged);
        assert!(solution.iterations >= MIN_ITERATIONS_TO_CONVERGE);
        assert!(solution.iterations < 100);
        assert_eq!(solution.history.len(), solution.iterations);
        assert_eq!(solution.history.gradient_norms.len(), solution.iterations);
        assert_eq!(solution.history.step_sizes.len(), solution.iterations);
        assert_eq!(solution.history.values[0], solution.initial_value);
        assert_eq!(solution.initial_value, 34.0);
    }

    #[test]
    fn exhausting_iterations_should_not_converge() {
        let solution = Optimizer::new(
            obj_func,
            obj_func_d,
            &[0.0, 0.0],
            Bounds::default(),
            quiet()
                .max_iterations(crate::MaxIterations::new(1).unwrap())
                .build()
                .unwrap(),
            (),
        )
        .unwrap()
        .run();
        assert_eq!(solution.status, Status::Exhausted);
        assert!(!solution.converged);
        assert_eq!(solution.iterations, 1);
        assert_eq!(solution.history.len(), 1);
    }

    #[test]
    fn failed_line_search_should_stop_without_moving() {
        // Derivatives of a linear function never change,
        // so the curvature condition never holds.
        let solution = Optimizer::new(
            |x: &[f64]| x[0],
            |_: &[f64]| vec![1.0],
            &[0.5],
            Bounds::new(vec![0.0], vec![1.0]),
            quiet().build().unwrap(),
            (),
        )
        .unwrap()
        .run();
        assert_eq!(solution.status, Status::LineSearchFailed);
        assert!(!solution.converged);
        assert_eq!(solution.point, vec![0.5]);
        assert_eq!(solution.value, 0.5);
        assert_eq!(solution.history.len(), 1);
    }

    #[test]
    fn failed_line_search_at_a_stationary_bound_should_converge() {
        // The first step reaches the lower bound,
        // where no feasible descent remains.
        let solution = Optimizer::new(
            |x: &[f64]| x[0],
            |_: &[f64]| vec![1.0],
            &[0.5],
            Bounds::new(vec![0.0], vec![1.0]),
            quiet().strong_wolfe(false).build().unwrap(),
            (),
        )
        .unwrap()
        .run();
        assert_eq!(solution.status, Status::Converged);
        assert!(solution.converged);
        assert_eq!(solution.point, vec![0.0]);
        assert_eq!(solution.iterations, 2);
        assert_eq!(solution.history.len(), 2);
    }

    #[test]
    fn streaming_should_stop_when_done() {
        let mut optimizer = Optimizer::new(
            obj_func,
            obj_func_d,
            &[0.0, 0.0],
            Bounds::default(),
            quiet().build().unwrap(),
            (),
        )
        .unwrap();
        let mut count = 0;
        while optimizer.next().is_some() {
            count += 1;
        }
        assert!(optimizer.status().is_done());
        assert_eq!(count + 1, *optimizer.state().iteration());
    }
}
