//! Capability traits for cross-solver observers.
//!
//! - [`StateEvent`] — events that expose the step, time, and model input
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use outbreak_core::{Components, Observer};
//! use outbreak_observers::traits::{CanStopEarly, StateEvent};
//!
//! /// Stops once the total population drops below a floor.
//! struct Floor(f64);
//!
//! impl<E: StateEvent, A: CanStopEarly> Observer<E, A> for Floor {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.input().total() < self.0).then(A::stop_early)
//!     }
//! }
//! ```

use outbreak_core::Components;
use outbreak_solvers::transient::{Action, Event};

/// A solver event carrying a model input whose components can be inspected.
pub trait StateEvent {
    /// The model input type.
    type Input: Components;

    /// Returns the grid index of the event, 0 for the initial state.
    fn step(&self) -> usize;

    /// Returns the grid time of the event.
    fn time(&self) -> f64;

    /// Returns the model input at this event.
    fn input(&self) -> &Self::Input;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl<I: Components, O> StateEvent for Event<I, O> {
    type Input = I;

    fn step(&self) -> usize {
        self.step
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn input(&self) -> &I {
        &self.snapshot.input
    }
}

impl CanStopEarly for Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
