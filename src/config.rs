//! Optimizer configuration.
//!
//! # Examples
//!
//! ```
//! use optimal_box::{ConfigBuilder, StepDirection, StepSize, Tolerance};
//!
//! let config = ConfigBuilder::default()
//!     .tolerance(Tolerance::new(1e-8).unwrap())
//!     .initial_step_size(StepSize::new(1.0).unwrap())
//!     .direction(StepDirection::ConjugateGradient)
//!     .verbose(false)
//!     .build()
//!     .unwrap();
//! assert!(!config.verbose);
//! ```

use derive_builder::Builder;
use num_traits::{AsPrimitive, Float};

use crate::{
    types::{
        BacktrackingRate, CurvatureParameter, MaxIterations, StepSize,
        SufficientDecreaseParameter, Tolerance,
    },
    StepDirection, ValidationError,
};

/// Projected descent configuration.
///
/// Fields are public for convenience,
/// so relationships between them
/// are checked again when optimization begins.
#[derive(Clone, Debug, PartialEq, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[builder(build_fn(skip))]
pub struct Config<A> {
    /// See [`MaxIterations`].
    #[builder(default)]
    pub max_iterations: MaxIterations,
    /// See [`Tolerance`].
    #[builder(default)]
    pub tolerance: Tolerance<A>,
    /// Log a snapshot of every iteration at `info` level.
    #[builder(default = "true")]
    pub verbose: bool,
    /// See [`SufficientDecreaseParameter`].
    #[builder(default)]
    pub c_1: SufficientDecreaseParameter<A>,
    /// See [`BacktrackingRate`].
    #[builder(default)]
    pub backtracking_rate: BacktrackingRate<A>,
    /// Step-size to begin each line-search.
    pub initial_step_size: StepSize<A>,
    /// Line-search fails
    /// when step-size shrinks to this or below.
    /// Must be below `initial_step_size`.
    pub min_step_size: StepSize<A>,
    /// See [`CurvatureParameter`].
    #[builder(default)]
    pub c_2: CurvatureParameter<A>,
    /// Also require the curvature condition
    /// `\vec{dx_new} . \vec{s} >= c_2 \vec{dx} . \vec{s}`
    /// to accept a step.
    #[builder(default = "true")]
    pub strong_wolfe: bool,
    /// See [`StepDirection`].
    #[builder(default)]
    pub direction: StepDirection,
}

impl<A> Default for Config<A>
where
    A: 'static + Copy,
    f64: AsPrimitive<A>,
{
    fn default() -> Self {
        Self {
            max_iterations: MaxIterations::default(),
            tolerance: Tolerance::default(),
            verbose: true,
            c_1: SufficientDecreaseParameter::default(),
            backtracking_rate: BacktrackingRate::default(),
            initial_step_size: StepSize(10.0.as_()),
            min_step_size: StepSize(1e-12.as_()),
            c_2: CurvatureParameter::default(),
            strong_wolfe: true,
            direction: StepDirection::default(),
        }
    }
}

impl<A> Config<A>
where
    A: Float,
{
    /// Check relationships between parameters.
    pub fn validate(&self) -> Result<(), ValidationError<A>> {
        if self.min_step_size >= self.initial_step_size {
            return Err(ValidationError::MinStepSizeTooLarge {
                min: self.min_step_size.into_inner(),
                initial: self.initial_step_size.into_inner(),
            });
        }
        if self.c_2.into_inner() < self.c_1.into_inner() {
            return Err(ValidationError::CurvatureBelowSufficientDecrease {
                c_1: self.c_1.into_inner(),
                c_2: self.c_2.into_inner(),
            });
        }
        Ok(())
    }
}

impl<A> ConfigBuilder<A> {
    /// Build a new [`Config`],
    /// filling unset parameters with defaults.
    pub fn build(&self) -> Result<Config<A>, ValidationError<A>>
    where
        A: 'static + Float,
        f64: AsPrimitive<A>,
    {
        let default = Config::default();
        let config = Config {
            max_iterations: self.max_iterations.unwrap_or(default.max_iterations),
            tolerance: self.tolerance.unwrap_or(default.tolerance),
            verbose: self.verbose.unwrap_or(default.verbose),
            c_1: self.c_1.unwrap_or(default.c_1),
            backtracking_rate: self.backtracking_rate.unwrap_or(default.backtracking_rate),
            initial_step_size: self.initial_step_size.unwrap_or(default.initial_step_size),
            min_step_size: self.min_step_size.unwrap_or(default.min_step_size),
            c_2: self.c_2.unwrap_or(default.c_2),
            strong_wolfe: self.strong_wolfe.unwrap_or(default.strong_wolfe),
            direction: self.direction.unwrap_or(default.direction),
        };
        config.validate()?;
        Ok(config)
    }
}
