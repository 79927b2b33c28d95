//! Projected backtracking line-search.
//!
//! Each trial step is projected onto bounds
//! before testing it,
//! so the step actually taken,
//! `\vec{s} = proj(\vec{x} + \alpha \vec{d}) - \vec{x}`,
//! replaces `\alpha \vec{d}` in the sufficient decrease condition,
//! `f(\vec{x} + \vec{s}) <= f(\vec{x}) + c_1 \vec{dx} . \vec{s}`,
//! and the curvature condition,
//! `\vec{dx_new} . \vec{s} >= c_2 \vec{dx} . \vec{s}`.
//!
//! Step-size starts at the configured initial step-size
//! every search
//! and shrinks by the backtracking rate
//! until both conditions hold
//! or it falls to the minimum step-size.

use num_traits::{AsPrimitive, Float};

use crate::{
    projection::{project, ActiveSet},
    step_direction::{steepest_descent, MAX_DESCENT_COSINE},
    vector::{cosine, dot, normalized, sub},
    Bounds, Config, Evaluations,
};

/// Result of a line-search.
#[derive(Clone, Debug, PartialEq)]
pub struct Searched<A> {
    /// Accepted point,
    /// or the starting point if search failed.
    pub point: Vec<A>,
    /// Objective value of `point`.
    pub value: A,
    /// Derivatives at `point`.
    pub derivatives: Vec<A>,
    /// Components pinned by the last projection tried.
    pub active: ActiveSet,
    /// Effective step-sizes of pinned components.
    pub effective_step_sizes: Vec<(usize, A)>,
    /// Direction searched along,
    /// normalized,
    /// or steepest descent if reset.
    pub direction: Vec<A>,
    /// Last step-size tried.
    pub step_size: A,
    /// Whether a step was accepted.
    pub success: bool,
    /// Calls made during search.
    pub evaluations: Evaluations,
}

/// Search along `direction` from `point`
/// for a feasible step satisfying sufficient decrease,
/// and curvature if configured.
///
/// When `constrained`,
/// a projected step no longer clearly descending
/// resets the direction to steepest descent,
/// `-\vec{dx}`,
/// without normalizing it.
///
/// On failure,
/// the starting point,
/// value,
/// and derivatives are returned unchanged.
#[allow(clippy::too_many_arguments)]
pub fn search<A, F, FD>(
    config: &Config<A>,
    obj_func: F,
    obj_func_d: FD,
    bounds: &Bounds<A>,
    constrained: bool,
    point: &[A],
    value: A,
    derivatives: &[A],
    direction: Vec<A>,
) -> Searched<A>
where
    A: 'static + Float,
    f64: AsPrimitive<A>,
    F: Fn(&[A]) -> A,
    FD: Fn(&[A]) -> Vec<A>,
{
    let mut direction = normalized(direction);
    let mut step_size = config.initial_step_size;
    let mut evaluations = Evaluations::default();
    loop {
        let mut projection = project(step_size.into_inner(), point, &direction, bounds);
        let mut step = sub(projection.point(), point);
        if constrained && cosine(derivatives, &step) >= MAX_DESCENT_COSINE.as_() {
            direction = steepest_descent(derivatives);
            projection = project(step_size.into_inner(), point, &direction, bounds);
            step = sub(projection.point(), point);
        }

        let slope = dot(derivatives, &step);
        if slope < A::zero() {
            let value_at_step = obj_func(projection.point());
            evaluations.values += 1;
            if value_at_step <= value + config.c_1 * slope {
                let derivatives_at_step = obj_func_d(projection.point());
                evaluations.derivatives += 1;
                if !config.strong_wolfe
                    || dot(&derivatives_at_step, &step) >= config.c_2 * slope
                {
                    let (point, active, effective_step_sizes) = projection.into_parts();
                    return Searched {
                        point,
                        value: value_at_step,
                        derivatives: derivatives_at_step,
                        active,
                        effective_step_sizes,
                        direction,
                        step_size: step_size.into_inner(),
                        success: true,
                        evaluations,
                    };
                }
            }
        }

        let next_step_size = config.backtracking_rate * step_size;
        if next_step_size <= config.min_step_size {
            log::debug!(
                "line-search found no acceptable step-size above {}",
                config.min_step_size.into_inner().to_f64().unwrap_or(f64::NAN)
            );
            let (_, active, effective_step_sizes) = projection.into_parts();
            return Searched {
                point: point.to_vec(),
                value,
                derivatives: derivatives.to_vec(),
                active,
                effective_step_sizes,
                direction,
                step_size: step_size.into_inner(),
                success: false,
                evaluations,
            };
        }
        step_size = next_step_size;
    }
}
