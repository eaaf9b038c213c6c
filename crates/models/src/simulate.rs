//! Integration of a [`Compartmental`] model into a [`Trajectory`].
//!
//! [`euler`] runs the fixed-step forward difference scheme and [`adaptive`]
//! runs the Dormand–Prince solver. Both report solver events to an observer
//! instead of printing, so a caller decides whether and how progress is shown
//! (see `outbreak_observers::ProgressLogger`).

use std::fmt;

use outbreak_core::{Observer, TimeGrid};
use outbreak_solvers::transient::{Action, Event, Status, dopri, euler};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CompartmentProblem, Compartmental, Input, ModelState, Rates, Trajectory};

/// Event type both integrations report.
pub type StepEvent = Event<Input, Rates>;

/// Number of compartments in a [`ModelState`].
const COMPARTMENTS: usize = 4;

/// Integration strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Explicit forward Euler with the grid spacing as step.
    Euler,

    /// Adaptive Dormand–Prince 5(4), reported at the grid points.
    Adaptive,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Euler => "Euler",
            Self::Adaptive => "ODE",
        })
    }
}

/// The outcome of one integration.
#[derive(Debug, Clone)]
pub struct Run {
    /// One state per grid point reached.
    pub trajectory: Trajectory,

    /// Whether an observer stopped the run before the end of the grid.
    pub stopped_early: bool,

    /// Number of model calls made.
    pub evaluations: usize,
}

/// Errors that can occur while simulating.
#[derive(Debug, Error)]
pub enum SimulateError {
    #[error("euler integration failed: {0}")]
    Euler(#[from] euler::Error),

    #[error("adaptive integration failed: {0}")]
    Adaptive(#[from] dopri::Error),
}

/// Integrates `model` from `initial` over `grid` with forward Euler.
///
/// Produces `grid.len()` states unless the observer stops the run.
///
/// # Errors
///
/// Returns an error if the solver fails; the compartmental model itself
/// cannot fail.
pub fn euler<Obs>(
    model: &Compartmental,
    initial: ModelState,
    grid: &TimeGrid,
    observer: Obs,
) -> Result<Run, SimulateError>
where
    Obs: Observer<StepEvent, Action>,
{
    log::debug!("integrating {} with forward Euler, dt={}", model.kind(), grid.step());
    let input = Input::new(grid.start(), initial);
    let solution = euler::solve(model, &CompartmentProblem, input, grid, observer)?;

    let stopped_early = solution.status == Status::StoppedByObserver;
    let evaluations = solution.history.len();
    Ok(Run {
        trajectory: Trajectory::from_history(model.kind(), solution.times, solution.history),
        stopped_early,
        evaluations,
    })
}

/// Integrates `model` from `initial` with adaptive steps, reporting at
/// every point of `grid`.
///
/// # Errors
///
/// Returns an error if the solver fails, for example when the integrator
/// exhausts its step budget.
pub fn adaptive<Obs>(
    model: &Compartmental,
    initial: ModelState,
    grid: &TimeGrid,
    config: &dopri::Config,
    observer: Obs,
) -> Result<Run, SimulateError>
where
    Obs: Observer<StepEvent, Action>,
{
    log::debug!("integrating {} adaptively over {} points", model.kind(), grid.len());
    let input = Input::new(grid.start(), initial);
    let solution = dopri::solve::<COMPARTMENTS, _, _, _>(
        model,
        &CompartmentProblem,
        input,
        grid,
        config,
        observer,
    )?;

    let stopped_early = solution.status == Status::StoppedByObserver;
    let evaluations = solution.evaluations;
    log::debug!(
        "{}: {} accepted and {} rejected steps",
        model.kind(),
        solution.accepted_steps,
        solution.rejected_steps
    );
    Ok(Run {
        trajectory: Trajectory::from_history(model.kind(), solution.times, solution.history),
        stopped_early,
        evaluations,
    })
}

/// Integrates with the given `method`.
///
/// `config` is only used by [`Method::Adaptive`].
///
/// # Errors
///
/// See [`euler()`] and [`adaptive`].
pub fn run<Obs>(
    method: Method,
    model: &Compartmental,
    initial: ModelState,
    grid: &TimeGrid,
    config: &dopri::Config,
    observer: Obs,
) -> Result<Run, SimulateError>
where
    Obs: Observer<StepEvent, Action>,
{
    match method {
        Method::Euler => euler(model, initial, grid, observer),
        Method::Adaptive => adaptive(model, initial, grid, config, observer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{ModelKind, ModelParams};

    fn seir() -> Compartmental {
        Compartmental::new(
            ModelKind::Seir,
            ModelParams::new(0.2, 0.0004, 0.035, 0.0).unwrap(),
        )
    }

    fn initial() -> ModelState {
        ModelState::new([997.0, 3.0, 0.0, 0.0])
    }

    #[test]
    fn first_euler_step_matches_the_update_rule() {
        let grid = TimeGrid::span(0.0, 1.0, 1.0).unwrap();
        let run = euler(&seir(), initial(), &grid, ()).unwrap();

        let [s, e, i, r] = run.trajectory.states()[1].values();
        assert_relative_eq!(s, 997.0 - 0.0004 * 997.0 * 0.0);
        assert_relative_eq!(e, 3.0 - 0.2 * 3.0);
        assert_relative_eq!(i, 0.2 * 3.0);
        assert_relative_eq!(r, 0.0);
        assert_eq!(run.evaluations, 2);
        assert!(!run.stopped_early);
    }

    #[test]
    fn run_dispatches_on_method() {
        let grid = TimeGrid::span(0.0, 10.0, 1.0).unwrap();
        let config = dopri::Config::default();

        let by_euler = run(Method::Euler, &seir(), initial(), &grid, &config, ()).unwrap();
        let direct = euler(&seir(), initial(), &grid, ()).unwrap();
        assert_eq!(by_euler.trajectory, direct.trajectory);

        let by_adaptive = run(Method::Adaptive, &seir(), initial(), &grid, &config, ()).unwrap();
        assert_eq!(by_adaptive.trajectory.len(), grid.len());
        assert!(by_adaptive.evaluations > grid.len());
    }

    #[test]
    fn observer_stop_is_reported() {
        let grid = TimeGrid::span(0.0, 10.0, 1.0).unwrap();
        let run = euler(&seir(), initial(), &grid, |event: &StepEvent| {
            (event.step == 3).then_some(Action::StopEarly)
        })
        .unwrap();

        assert!(run.stopped_early);
        assert_eq!(run.trajectory.len(), 4);
    }

    #[test]
    fn method_names() {
        assert_eq!(Method::Euler.to_string(), "Euler");
        assert_eq!(Method::Adaptive.to_string(), "ODE");
    }
}
