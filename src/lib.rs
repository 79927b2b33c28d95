#![allow(clippy::needless_doctest_main)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

//! Bound-constrained gradient optimization.
//!
//! Minimize a differentiable objective function
//! over points confined to a box,
//! `lower <= x <= upper`,
//! by projected steepest descent,
//! optionally accelerated by projected conjugate-gradient.
//!
//! Each iteration line-searches along a step-direction,
//! projecting every trial step onto the box,
//! until the projected step satisfies sufficient decrease
//! and,
//! by default,
//! the curvature condition.
//! Optimization converges
//! when the point satisfies first-order stationarity for box constraints:
//! free derivatives are small,
//! and derivatives of components pinned at a bound
//! point out of the box.
//!
//! Only local first-order stationarity is established.
//!
//! # Examples
//!
//! ```
//! use optimal_box::{solve, Bounds, Config};
//!
//! fn main() {
//!     let solution = solve(
//!         obj_func,
//!         obj_func_d,
//!         &[0.0, 0.0],
//!         Bounds::new(vec![-10.0, -10.0], vec![2.0, 10.0]),
//!         &Config::default(),
//!     )
//!     .unwrap();
//!     println!("{:?}", solution.point);
//!     assert!(solution.converged);
//! }
//!
//! fn obj_func(point: &[f64]) -> f64 {
//!     (point[0] - 3.0).powi(2) + (point[1] - 5.0).powi(2)
//! }
//!
//! fn obj_func_d(point: &[f64]) -> Vec<f64> {
//!     vec![2.0 * (point[0] - 3.0), 2.0 * (point[1] - 5.0)]
//! }
//! ```
//!
//! For introspection of each iteration,
//! see [`solve_observed`]
//! and [`Optimizer`].

mod bounds;
mod config;
pub mod convergence;
mod error;
pub mod line_search;
mod observer;
mod optimizer;
pub mod projection;
mod solution;
pub mod step_direction;
mod types;
mod vector;

use num_traits::{AsPrimitive, Float};

pub use self::{
    bounds::Bounds,
    config::{Config, ConfigBuilder},
    error::ValidationError,
    observer::{Observer, Snapshot},
    optimizer::{Optimizer, State},
    solution::{Evaluations, History, Solution, Status},
    step_direction::StepDirection,
    types::*,
};

/// Traits needed to step through an [`Optimizer`].
pub mod prelude {
    pub use streaming_iterator::StreamingIterator;
}

/// Minimize `obj_func` within `bounds`
/// starting from `initial_point`.
///
/// - `obj_func`: objective function to minimize
/// - `obj_func_d`: function returning partial derivatives
///   of objective function to minimize
/// - `initial_point`: feasible starting point,
///   copied before use
/// - `bounds`: lower and upper bounds,
///   either side empty for no bounds on that side
///
/// Failing to converge is not an error,
/// see [`Solution::status`].
pub fn solve<A, F, FD>(
    obj_func: F,
    obj_func_d: FD,
    initial_point: &[A],
    bounds: Bounds<A>,
    config: &Config<A>,
) -> Result<Solution<A>, ValidationError<A>>
where
    A: 'static + Float,
    f64: AsPrimitive<A>,
    F: Fn(&[A]) -> A,
    FD: Fn(&[A]) -> Vec<A>,
{
    solve_observed(obj_func, obj_func_d, initial_point, bounds, config, ())
}

/// Minimize `obj_func` within `bounds`
/// starting from `initial_point`,
/// passing a [`Snapshot`] of every iteration to `observer`.
///
/// See [`solve`].
pub fn solve_observed<A, F, FD, O>(
    obj_func: F,
    obj_func_d: FD,
    initial_point: &[A],
    bounds: Bounds<A>,
    config: &Config<A>,
    observer: O,
) -> Result<Solution<A>, ValidationError<A>>
where
    A: 'static + Float,
    f64: AsPrimitive<A>,
    F: Fn(&[A]) -> A,
    FD: Fn(&[A]) -> Vec<A>,
    O: Observer<A>,
{
    Ok(Optimizer::new(
        obj_func,
        obj_func_d,
        initial_point,
        bounds,
        config.clone(),
        observer,
    )?
    .run())
}

#[cfg(test)]
mod tests {
    use std::ops::RangeInclusive;

    use approx::assert_abs_diff_eq;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    use super::*;

    #[test]
    fn steepest_descent_should_converge_on_quadratic() {
        for seed in 0..10 {
            let solution = run(
                seed,
                StepDirection::Steepest,
                100,
                &[-10.0..=10.0, -10.0..=10.0],
                Bounds::default(),
                quadratic,
                quadratic_d,
            );
            assert_converged_to(&solution, &[3.0, 5.0]);
        }
    }

    #[test]
    fn conjugate_gradient_should_converge_on_quadratic() {
        for seed in 0..10 {
            let solution = run(
                seed,
                StepDirection::ConjugateGradient,
                100,
                &[-10.0..=10.0, -10.0..=10.0],
                Bounds::default(),
                quadratic,
                quadratic_d,
            );
            assert_converged_to(&solution, &[3.0, 5.0]);
        }
    }

    #[test]
    fn steepest_descent_should_converge_to_bound_on_quadratic() {
        // Minimum of the first component is above its upper bound.
        for seed in 0..10 {
            let bounds = Bounds::new(vec![0.0, 0.0], vec![2.0, 10.0]);
            let solution = run(
                seed,
                StepDirection::Steepest,
                100,
                &[0.0..=2.0, 0.0..=2.0],
                bounds.clone(),
                quadratic,
                quadratic_d,
            );
            assert!(bounds.contains(&solution.point));
            assert_converged_to(&solution, &[2.0, 5.0]);
        }
    }

    #[test]
    fn steepest_descent_should_converge_on_booth() {
        for seed in 0..10 {
            let solution = run(
                seed,
                StepDirection::Steepest,
                100,
                &[-10.0..=10.0, -10.0..=10.0],
                Bounds::new(vec![-10.0; 2], vec![10.0; 2]),
                booth,
                booth_d,
            );
            assert_converged_to(&solution, &[1.0, 3.0]);
        }
    }

    #[test]
    fn conjugate_gradient_should_converge_on_booth() {
        for seed in 0..10 {
            let solution = run(
                seed,
                StepDirection::ConjugateGradient,
                100,
                &[-10.0..=10.0, -10.0..=10.0],
                Bounds::new(vec![-10.0; 2], vec![10.0; 2]),
                booth,
                booth_d,
            );
            assert_converged_to(&solution, &[1.0, 3.0]);
        }
    }

    #[test]
    fn steepest_descent_should_converge_to_bound_on_booth() {
        // With the first component at its lower bound of 2,
        // Booth is minimized at `(2, 2.2)`.
        for seed in 0..10 {
            let bounds = Bounds::new(vec![2.0, -10.0], vec![10.0, 10.0]);
            let solution = run(
                seed,
                StepDirection::Steepest,
                100,
                &[2.0..=5.0, 2.0..=5.0],
                bounds.clone(),
                booth,
                booth_d,
            );
            assert!(bounds.contains(&solution.point));
            assert_converged_to(&solution, &[2.0, 2.2]);
        }
    }

    #[test]
    fn steepest_descent_should_converge_on_beale() {
        for seed in 0..10 {
            let solution = run(
                seed,
                StepDirection::Steepest,
                2000,
                &[2.0..=4.0, 0.0..=1.0],
                Bounds::new(vec![-4.5; 2], vec![4.5; 2]),
                beale,
                beale_d,
            );
            assert_converged_to(&solution, &[3.0, 0.5]);
        }
    }

    #[test]
    fn conjugate_gradient_should_converge_on_beale() {
        // With the curvature condition,
        // a few starts stop where backtracking from the initial step-size
        // skips every step satisfying both conditions.
        let config = ConfigBuilder::default()
            .direction(StepDirection::ConjugateGradient)
            .strong_wolfe(false)
            .verbose(false)
            .build()
            .unwrap();
        for seed in 0..10 {
            let solution = run_with(
                seed,
                &config,
                &[2.0..=4.0, 0.0..=1.0],
                Bounds::new(vec![-4.5; 2], vec![4.5; 2]),
                beale,
                beale_d,
            );
            assert_converged_to(&solution, &[3.0, 0.5]);
        }
    }

    #[test]
    fn solve_should_not_modify_initial_point() {
        let initial_point = vec![0.0, 0.0];
        let solution = solve(
            quadratic,
            quadratic_d,
            &initial_point,
            Bounds::default(),
            &quiet(StepDirection::Steepest, 100),
        )
        .unwrap();
        assert_eq!(initial_point, vec![0.0, 0.0]);
        assert_ne!(solution.point, initial_point);
    }

    #[test]
    fn solve_observed_should_observe_every_iteration() {
        let mut snapshots = Vec::new();
        let solution = solve_observed(
            booth,
            booth_d,
            &[0.0, 0.0],
            Bounds::default(),
            &quiet(StepDirection::ConjugateGradient, 100),
            |x: &Snapshot<f64>| snapshots.push(x.clone()),
        )
        .unwrap();
        assert_eq!(snapshots.len(), solution.iterations);
        assert_eq!(
            snapshots.iter().map(|x| x.iteration).collect::<Vec<_>>(),
            (1..=solution.iterations).collect::<Vec<_>>()
        );
        assert_eq!(
            snapshots.iter().map(|x| x.value).collect::<Vec<_>>()[..solution.iterations - 1],
            solution.history.values[1..]
        );
        assert_eq!(
            snapshots.last().map(|x| x.gradient_norm),
            solution.history.gradient_norms.last().copied()
        );
    }

    #[test]
    fn solve_should_reject_infeasible_points() {
        assert_eq!(
            solve(
                quadratic,
                quadratic_d,
                &[0.0, 11.0],
                Bounds::new(vec![0.0; 2], vec![10.0; 2]),
                &quiet(StepDirection::Steepest, 100),
            ),
            Err(ValidationError::OutOfBounds {
                index: 1,
                value: 11.0,
                lower: 0.0,
                upper: 10.0
            })
        );
    }

    #[test]
    fn solve_should_reject_mismatched_bounds() {
        assert_eq!(
            solve(
                quadratic,
                quadratic_d,
                &[0.0, 0.0],
                Bounds::new(vec![0.0; 3], vec![]),
                &quiet(StepDirection::Steepest, 100),
            ),
            Err(ValidationError::LengthMismatch {
                point: 2,
                lower: 3,
                upper: 2
            })
        );
    }

    fn assert_converged_to(solution: &Solution<f64>, minimum: &[f64]) {
        assert!(solution.converged, "{:?}", solution.status);
        assert_eq!(solution.history.len(), solution.iterations);
        assert!(solution.value <= solution.initial_value);
        for (x, y) in solution.point.iter().zip(minimum) {
            assert_abs_diff_eq!(x, y, epsilon = 0.001);
        }
    }

    fn quiet(direction: StepDirection, max_iterations: usize) -> Config<f64> {
        ConfigBuilder::default()
            .direction(direction)
            .max_iterations(MaxIterations::new(max_iterations).unwrap())
            .verbose(false)
            .build()
            .unwrap()
    }

    fn run<F, FD>(
        seed: u64,
        direction: StepDirection,
        max_iterations: usize,
        initial_bounds: &[RangeInclusive<f64>],
        bounds: Bounds<f64>,
        obj_func: F,
        obj_func_d: FD,
    ) -> Solution<f64>
    where
        F: Fn(&[f64]) -> f64,
        FD: Fn(&[f64]) -> Vec<f64>,
    {
        run_with(
            seed,
            &quiet(direction, max_iterations),
            initial_bounds,
            bounds,
            obj_func,
            obj_func_d,
        )
    }

    fn run_with<F, FD>(
        seed: u64,
        config: &Config<f64>,
        initial_bounds: &[RangeInclusive<f64>],
        bounds: Bounds<f64>,
        obj_func: F,
        obj_func_d: FD,
    ) -> Solution<f64>
    where
        F: Fn(&[f64]) -> f64,
        FD: Fn(&[f64]) -> Vec<f64>,
    {
        let mut rng = SmallRng::seed_from_u64(seed);
        let initial_point = initial_bounds
            .iter()
            .map(|range| rng.gen_range(range.clone()))
            .collect::<Vec<_>>();
        solve(obj_func, obj_func_d, &initial_point, bounds, config).unwrap()
    }

    fn quadratic(point: &[f64]) -> f64 {
        (point[0] - 3.0).powi(2) + (point[1] - 5.0).powi(2)
    }
    fn quadratic_d(point: &[f64]) -> Vec<f64> {
        vec![2.0 * (point[0] - 3.0), 2.0 * (point[1] - 5.0)]
    }

    fn booth(point: &[f64]) -> f64 {
        let (x, y) = (point[0], point[1]);
        (x + 2.0 * y - 7.0).powi(2) + (2.0 * x + y - 5.0).powi(2)
    }
    fn booth_d(point: &[f64]) -> Vec<f64> {
        let (x, y) = (point[0], point[1]);
        let a = x + 2.0 * y - 7.0;
        let b = 2.0 * x + y - 5.0;
        vec![2.0 * a + 4.0 * b, 4.0 * a + 2.0 * b]
    }

    fn beale(point: &[f64]) -> f64 {
        let (x, y) = (point[0], point[1]);
        (1.5 - x + x * y).powi(2)
            + (2.25 - x + x * y.powi(2)).powi(2)
            + (2.625 - x + x * y.powi(3)).powi(2)
    }
    fn beale_d(point: &[f64]) -> Vec<f64> {
        let (x, y) = (point[0], point[1]);
        let a = 1.5 - x + x * y;
        let b = 2.25 - x + x * y.powi(2);
        let c = 2.625 - x + x * y.powi(3);
        vec![
            2.0 * a * (y - 1.0) + 2.0 * b * (y.powi(2) - 1.0) + 2.0 * c * (y.powi(3) - 1.0),
            2.0 * a * x + 4.0 * b * x * y + 6.0 * c * x * y.powi(2),
        ]
    }
}
