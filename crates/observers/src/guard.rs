use outbreak_core::{Components, Observer};

use crate::traits::{CanStopEarly, StateEvent};

/// Where a [`NonNegativeGuard`] tripped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Violation {
    /// Grid index of the offending event.
    pub step: usize,

    /// Grid time of the offending event.
    pub time: f64,

    /// Index of the first offending component.
    pub component: usize,

    /// The offending value, negative or not finite.
    pub value: f64,
}

/// Stops a run as soon as any compartment is negative or not finite.
///
/// The solvers leave populations unconstrained. Installing this guard turns a
/// blow-up (for example from an oversized Euler step) into an early stop with
/// the history up to the offending point, and records where it happened.
#[derive(Debug, Clone, Default)]
pub struct NonNegativeGuard {
    violation: Option<Violation>,
}

impl NonNegativeGuard {
    /// Creates a guard that has not tripped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first violation seen, if any.
    #[must_use]
    pub fn violation(&self) -> Option<Violation> {
        self.violation
    }

    fn check<E: StateEvent>(&mut self, event: &E) -> bool {
        let offending = event
            .input()
            .components()
            .enumerate()
            .find(|&(_, value)| !value.is_finite() || value < 0.0);

        if let Some((component, value)) = offending {
            log::warn!(
                "compartment {component} reached {value} at t={} (step {})",
                event.time(),
                event.step()
            );
            self.violation.get_or_insert(Violation {
                step: event.step(),
                time: event.time(),
                component,
                value,
            });
            return true;
        }
        false
    }
}

impl<E: StateEvent, A: CanStopEarly> Observer<E, A> for NonNegativeGuard {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.check(event).then(A::stop_early)
    }
}

/// Allows `&mut NonNegativeGuard` to be passed to solvers that take an
/// observer by value, so the violation can be read after the solve completes.
impl<E: StateEvent, A: CanStopEarly> Observer<E, A> for &mut NonNegativeGuard {
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).check(event).then(A::stop_early)
    }
}
