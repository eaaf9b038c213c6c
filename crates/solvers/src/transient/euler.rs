//! Forward Euler solver for ODE problems.
//!
//! Steps a model across a [`TimeGrid`] with the explicit, first-order update
//!
//! ```text
//! state_{n+1} = state_n + derivative_n * dt
//! ```
//!
//! using only the values of the previous step. There is no step size control,
//! so accuracy degrades for large `dt` or stiff parameter regimes.
//!
//! # Example
//!
//! ```ignore
//! use outbreak_solvers::transient::euler;
//!
//! let solution = euler::solve_unobserved(&model, &problem, initial, &grid)?;
//!
//! for (t, snapshot) in solution.times.iter().zip(&solution.history) {
//!     println!("t={t}: {:?}", snapshot.output);
//! }
//! ```

mod error;
mod solution;

pub use error::Error;
pub use solution::Solution;

pub use super::{Action, Event, Status};

use outbreak_core::{Model, Observer, OdeProblem, Snapshot, StepIntegrable, TimeGrid};

/// Integrates an ODE problem over `grid` using forward Euler.
///
/// # Algorithm
///
/// 1. Call the model with the initial input to get the initial snapshot.
/// 2. For each of the `grid.len() - 1` steps:
///    - Extract the state from the current input.
///    - Compute the derivative from the current input and output.
///    - Step the state forward: `state + derivative * dt`.
///    - Build the next input from the initial one, offset by the elapsed
///      grid time, then finalize it against the current snapshot.
///    - Call the model to get the next output.
///    - Emit an [`Event`] to the observer and stop if it asks to.
/// 3. Return the solution with the full history.
///
/// The observer sees step 0 (the initial snapshot) and every step after it.
///
/// Building from the initial input keeps the input time on the grid instead
/// of accumulating `dt` once per step.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    grid: &TimeGrid,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let dt = grid.step();
    let steps = grid.steps();
    let start = grid.start();
    log::debug!("euler: {steps} steps of dt={dt} from t={start}");

    let initial_output = model.call(&initial).map_err(Error::model(0))?;
    let base = initial.clone();
    let initial_snapshot = Snapshot::new(initial, initial_output);

    let mut solution = Solution {
        status: Status::Complete,
        times: Vec::with_capacity(grid.len()),
        history: Vec::with_capacity(grid.len()),
        steps: 0,
    };
    solution.times.push(grid.start());
    solution.history.push(initial_snapshot.clone());

    let event = Event {
        step: 0,
        time: grid.start(),
        snapshot: initial_snapshot.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        solution.status = Status::StoppedByObserver;
        return Ok(solution);
    }

    let mut current = initial_snapshot;

    for step in 1..=steps {
        let state = problem.state(&current.input).map_err(Error::problem(step))?;
        let derivative = problem
            .derivative(&current.input, &current.output)
            .map_err(Error::problem(step))?;

        let next_state = state.step(derivative, dt);
        let time = grid.at(step);

        let next_input = problem
            .build_input(&base, &next_state, &(time - start))
            .map_err(Error::problem(step))?;
        let next_input = problem
            .finalize_step(next_input, &current.input, &current.output, &dt)
            .map_err(Error::problem(step))?;

        let next_output = model.call(&next_input).map_err(Error::model(step))?;
        let next_snapshot = Snapshot::new(next_input, next_output);

        solution.times.push(time);
        solution.history.push(next_snapshot.clone());
        solution.steps = step;

        let event = Event {
            step,
            time,
            snapshot: next_snapshot.clone(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            log::debug!("euler: observer stopped the run at step {step}");
            solution.status = Status::StoppedByObserver;
            return Ok(solution);
        }

        current = next_snapshot;
    }

    Ok(solution)
}

/// Integrates an ODE problem using forward Euler without observation.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    grid: &TimeGrid,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
{
    solve(model, problem, initial, grid, ())
}
