/// Receives solver events and optionally steers the solver.
///
/// Solvers call [`observe`](Observer::observe) once per event. Returning
/// `Some(action)` asks the solver to act (for example, stop early); returning
/// `None` lets it continue.
///
/// Closures of the form `FnMut(&E) -> Option<A>` are observers, and `()` is
/// an observer that never acts. `Option<O>` forwards to `O` when present,
/// which lets callers install an observer conditionally.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, O> Observer<E, A> for Option<O>
where
    O: Observer<E, A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.as_mut().and_then(|observer| observer.observe(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<Obs: Observer<u32, &'static str>>(mut observer: Obs, events: &[u32]) -> Vec<&'static str> {
        events.iter().filter_map(|e| observer.observe(e)).collect()
    }

    #[test]
    fn closure_observer_returns_actions() {
        let actions = drive(|e: &u32| (*e > 2).then_some("stop"), &[1, 2, 3, 4]);
        assert_eq!(actions, vec!["stop", "stop"]);
    }

    #[test]
    fn unit_observer_never_acts() {
        assert!(drive((), &[1, 2, 3]).is_empty());
    }

    #[test]
    fn optional_observer_forwards_when_present() {
        let stop_at_three = |e: &u32| (*e == 3).then_some("stop");
        assert_eq!(drive(Some(stop_at_three), &[1, 3]), vec!["stop"]);
        assert!(drive(None::<fn(&u32) -> Option<&'static str>>, &[1, 3]).is_empty());
    }
}
