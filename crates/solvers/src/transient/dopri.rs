//! Adaptive Dormand–Prince 5(4) integration through [`ode_solvers::Dopri5`].
//!
//! The problem state is copied into an `SVector<f64, N>` and the model is
//! called from the integrator's right-hand side. Dense output at the grid
//! spacing yields the state at every grid point, and the model is called once
//! more at each point so the solution holds full snapshots.
//!
//! # Observer Events
//!
//! One [`Event`] per grid point, starting with the initial state at index 0.
//! Events are emitted after the integrator has finished; returning
//! [`Action::StopEarly`] truncates the history at that point.

mod config;
mod error;
mod solution;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use solution::Solution;

pub use super::{Action, Event, Status};

use std::{cell::RefCell, rc::Rc};

use ode_solvers::{Dopri5, SVector, System};
use outbreak_core::{Components, DerivativeOf, Model, Observer, OdeProblem, Snapshot, TimeGrid};

/// Fraction of the grid spacing within which a dense output matches a grid time.
const TIME_MATCH: f64 = 1e-6;

/// Integrates an ODE problem over `grid` with adaptive step size control.
///
/// `N` is the number of state components.
///
/// # Errors
///
/// Returns an error if the model or problem fails, if the integrator gives up
/// (step budget, step size underflow, stiffness), or if the dense output
/// misses a grid point.
pub fn solve<const N: usize, M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    grid: &TimeGrid,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    P::State: Components + From<[f64; N]>,
    DerivativeOf<P::State, f64>: Components,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let start = grid.start();
    log::debug!(
        "dopri: {} grid points from t={start}, rtol={}, atol={}",
        grid.len(),
        config.rtol(),
        config.atol()
    );

    let initial_output = model.call(&initial).map_err(Error::model(start))?;
    let initial = Snapshot::new(initial, initial_output);

    let mut solution = Solution {
        status: Status::Complete,
        times: Vec::with_capacity(grid.len()),
        history: Vec::with_capacity(grid.len()),
        accepted_steps: 0,
        rejected_steps: 0,
        evaluations: 1,
    };

    if record(&mut solution, &mut observer, 0, start, &initial) || grid.len() == 1 {
        return Ok(solution);
    }

    let mut dense = integrate::<N, _, _>(model, problem, &initial.input, grid, config, &mut solution)?
        .into_iter();
    let tolerance = TIME_MATCH * grid.step();
    let mut previous = initial.clone();

    for index in 1..grid.len() {
        let time = grid.at(index);
        let y = loop {
            match dense.next() {
                Some((x, y)) if (x - time).abs() <= tolerance => break y,
                Some((x, _)) if x < time => {}
                _ => return Err(Error::MissingOutput { time }),
            }
        };

        let state = <P::State as From<[f64; N]>>::from(y.into());
        let input = problem
            .build_input(&initial.input, &state, &(time - start))
            .map_err(Error::problem(time))?;
        let input = problem
            .finalize_step(input, &previous.input, &previous.output, &grid.step())
            .map_err(Error::problem(time))?;
        let output = model.call(&input).map_err(Error::model(time))?;
        solution.evaluations += 1;

        let snapshot = Snapshot::new(input, output);
        if record(&mut solution, &mut observer, index, time, &snapshot) {
            log::debug!("dopri: observer stopped the run at grid index {index}");
            return Ok(solution);
        }
        previous = snapshot;
    }

    log::debug!(
        "dopri: finished with {} accepted, {} rejected steps, {} model calls",
        solution.accepted_steps,
        solution.rejected_steps,
        solution.evaluations
    );
    Ok(solution)
}

/// Integrates adaptively without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<const N: usize, M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    grid: &TimeGrid,
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    P::State: Components + From<[f64; N]>,
    DerivativeOf<P::State, f64>: Components,
{
    solve::<N, _, _, _>(model, problem, initial, grid, config, ())
}

/// Runs the integrator across the whole grid and returns its dense output.
///
/// Step statistics and model calls are added to `solution`.
fn integrate<const N: usize, M, P>(
    model: &M,
    problem: &P,
    base: &M::Input,
    grid: &TimeGrid,
    config: &Config,
    solution: &mut Solution<M::Input, M::Output>,
) -> Result<Vec<(f64, SVector<f64, N>)>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    P::State: Components + From<[f64; N]>,
    DerivativeOf<P::State, f64>: Components,
{
    let start = grid.start();
    let state = problem.state(base).map_err(Error::problem(start))?;
    let y0 = SVector::<f64, N>::from_iterator(state.components());

    let failure = Rc::new(RefCell::new(None));
    let system = GridSystem {
        model,
        problem,
        base,
        start,
        failure: Rc::clone(&failure),
    };

    // Half a spacing past the last point, so rounding in the dense output
    // cannot drop it.
    let end = grid.end() + 0.5 * grid.step();
    let mut stepper = Dopri5::new(
        system,
        start,
        end,
        grid.step(),
        y0,
        config.rtol(),
        config.atol(),
    );
    let result = stepper.integrate();

    if let Some(error) = failure.borrow_mut().take() {
        return Err(error);
    }
    let stats = result?;

    solution.accepted_steps = stats.accepted_steps as usize;
    solution.rejected_steps = stats.rejected_steps as usize;
    solution.evaluations += stats.num_eval as usize;

    Ok(stepper
        .x_out()
        .iter()
        .copied()
        .zip(stepper.y_out().iter().copied())
        .collect())
}

/// Appends a grid point to the solution and notifies the observer.
///
/// Returns `true` if the observer asked to stop.
fn record<I, O, Obs>(
    solution: &mut Solution<I, O>,
    observer: &mut Obs,
    step: usize,
    time: f64,
    current: &Snapshot<I, O>,
) -> bool
where
    I: Clone,
    O: Clone,
    Obs: Observer<Event<I, O>, Action>,
{
    solution.times.push(time);
    solution.history.push(current.clone());

    let event = Event {
        step,
        time,
        snapshot: current.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        solution.status = Status::StoppedByObserver;
        return true;
    }
    false
}

/// Exposes a model and problem to the integrator as a right-hand side.
///
/// Inputs are rebuilt from `base`, offset by the time since `start`. The first
/// model or problem failure is kept in `failure` and stops the integration.
struct GridSystem<'a, M: Model, P> {
    model: &'a M,
    problem: &'a P,
    base: &'a M::Input,
    start: f64,
    failure: Rc<RefCell<Option<Error>>>,
}

impl<M, P> GridSystem<'_, M, P>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
{
    fn rates<const N: usize>(&self, x: f64, y: &SVector<f64, N>) -> Result<SVector<f64, N>, Error>
    where
        P::State: From<[f64; N]>,
        DerivativeOf<P::State, f64>: Components,
    {
        let state = <P::State as From<[f64; N]>>::from((*y).into());
        let input = self
            .problem
            .build_input(self.base, &state, &(x - self.start))
            .map_err(Error::problem(x))?;
        let output = self.model.call(&input).map_err(Error::model(x))?;
        let derivative = self
            .problem
            .derivative(&input, &output)
            .map_err(Error::problem(x))?;
        Ok(SVector::from_iterator(derivative.components()))
    }
}

impl<M, P, const N: usize> System<f64, SVector<f64, N>> for GridSystem<'_, M, P>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    P::State: From<[f64; N]>,
    DerivativeOf<P::State, f64>: Components,
{
    fn system(&self, x: f64, y: &SVector<f64, N>, dy: &mut SVector<f64, N>) {
        match self.rates(x, y) {
            Ok(rates) => *dy = rates,
            Err(error) => {
                self.failure.borrow_mut().get_or_insert(error);
                *dy = SVector::from_element(f64::NAN);
            }
        }
    }

    fn solout(&mut self, _x: f64, _y: &SVector<f64, N>, _dy: &SVector<f64, N>) -> bool {
        self.failure.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use outbreak_core::StepIntegrable;

    // --- Test fixtures ---

    /// Two compartments, A draining into B at `rate`.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Pair([f64; 2]);

    impl Components for Pair {
        fn components(&self) -> impl Iterator<Item = f64> {
            self.0.into_iter()
        }
    }

    impl From<[f64; 2]> for Pair {
        fn from(values: [f64; 2]) -> Self {
            Pair(values)
        }
    }

    impl StepIntegrable<f64> for Pair {
        type Derivative = Pair;

        fn step(&self, derivative: Pair, dt: f64) -> Self {
            Pair([self.0[0] + derivative.0[0] * dt, self.0[1] + derivative.0[1] * dt])
        }
    }

    #[derive(Debug, Clone)]
    struct Input {
        pair: Pair,
        time: f64,
    }

    /// Fails for any input later than `fails_after`.
    struct Transfer {
        rate: f64,
        fails_after: f64,
    }

    impl Transfer {
        fn new(rate: f64) -> Self {
            Self {
                rate,
                fails_after: f64::INFINITY,
            }
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("transfer failed at t={0}")]
    struct TransferFailed(f64);

    impl Model for Transfer {
        type Input = Input;
        type Output = Pair;
        type Error = TransferFailed;

        fn call(&self, input: &Input) -> Result<Pair, TransferFailed> {
            if input.time > self.fails_after {
                return Err(TransferFailed(input.time));
            }
            let flow = self.rate * input.pair.0[0];
            Ok(Pair([-flow, flow]))
        }
    }

    struct TransferProblem;

    impl OdeProblem for TransferProblem {
        type Input = Input;
        type Output = Pair;
        type Delta = f64;
        type State = Pair;
        type Error = Infallible;

        fn state(&self, input: &Input) -> Result<Pair, Infallible> {
            Ok(input.pair)
        }

        fn derivative(&self, _input: &Input, output: &Pair) -> Result<Pair, Infallible> {
            Ok(*output)
        }

        fn build_input(&self, base: &Input, state: &Pair, dt: &f64) -> Result<Input, Infallible> {
            Ok(Input {
                pair: *state,
                time: base.time + dt,
            })
        }
    }

    fn initial() -> Input {
        Input {
            pair: Pair([1.0, 0.0]),
            time: 0.0,
        }
    }

    fn run(model: &Transfer, grid: &TimeGrid) -> Result<Solution<Input, Pair>, Error> {
        solve_unobserved::<2, _, _>(model, &TransferProblem, initial(), grid, &Config::default())
    }

    // --- Tests ---

    #[test]
    fn matches_exponential_decay() {
        let grid = TimeGrid::span(0.0, 5.0, 0.5).unwrap();
        let solution = run(&Transfer::new(1.0), &grid).unwrap();

        assert_eq!(solution.status, Status::Complete);
        for (t, snapshot) in solution.times.iter().zip(&solution.history) {
            let expected = (-t).exp();
            assert_relative_eq!(snapshot.input.pair.0[0], expected, epsilon = 1e-6);
            assert_relative_eq!(snapshot.input.pair.0[1], 1.0 - expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn reports_every_grid_point() {
        let grid = TimeGrid::span(0.0, 10.0, 1.0).unwrap();
        let mut seen = Vec::new();
        let solution = solve::<2, _, _, _>(
            &Transfer::new(0.3),
            &TransferProblem,
            initial(),
            &grid,
            &Config::default(),
            |event: &Event<Input, Pair>| {
                seen.push(event.step);
                None
            },
        )
        .unwrap();

        assert_eq!(solution.times, grid.to_vec());
        assert_eq!(solution.history.len(), grid.len());
        assert_eq!(seen, (0..grid.len()).collect::<Vec<_>>());
        for (t, snapshot) in solution.times.iter().zip(&solution.history) {
            assert_relative_eq!(snapshot.input.time, *t, epsilon = 1e-9);
        }
        assert!(solution.accepted_steps > 0);
        assert!(solution.evaluations > grid.len());
    }

    #[test]
    fn fine_grid_keeps_the_last_point() {
        let grid = TimeGrid::span(0.0, 50.0, 0.01).unwrap();
        let solution = run(&Transfer::new(0.1), &grid).unwrap();

        assert_eq!(solution.history.len(), 5001);
        let last = solution.history.last().unwrap();
        assert_relative_eq!(last.input.time, 50.0, epsilon = 1e-9);
        assert_relative_eq!(last.input.pair.0[0], (-5.0_f64).exp(), epsilon = 1e-6);
    }

    #[test]
    fn conserves_the_total() {
        let grid = TimeGrid::span(0.0, 20.0, 1.0).unwrap();
        let solution = run(&Transfer::new(0.7), &grid).unwrap();

        for snapshot in &solution.history {
            assert_relative_eq!(snapshot.input.pair.total(), 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn model_failure_is_returned() {
        let grid = TimeGrid::span(0.0, 10.0, 1.0).unwrap();
        let model = Transfer {
            rate: 1.0,
            fails_after: 2.5,
        };

        let error = run(&model, &grid).unwrap_err();
        assert!(matches!(error, Error::Model { time, .. } if time > 2.5));
    }

    #[test]
    fn observer_can_stop_early() {
        let grid = TimeGrid::span(0.0, 10.0, 1.0).unwrap();
        let solution = solve::<2, _, _, _>(
            &Transfer::new(1.0),
            &TransferProblem,
            initial(),
            &grid,
            &Config::default(),
            |event: &Event<Input, Pair>| (event.step == 2).then_some(Action::StopEarly),
        )
        .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.history.len(), 3);
        assert_eq!(solution.times, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn single_point_grid_takes_no_steps() {
        let grid = TimeGrid::span(0.0, 0.0, 1.0).unwrap();
        let solution = run(&Transfer::new(1.0), &grid).unwrap();

        assert_eq!(solution.history.len(), 1);
        assert_eq!(solution.accepted_steps, 0);
        assert_eq!(solution.evaluations, 1);
        assert_eq!(solution.history[0].input.pair, Pair([1.0, 0.0]));
    }
}
