//! Run control shared by [`euler`](super::euler) and [`dopri`](super::dopri),
//! so one observer can steer either solver.

/// What an observer can ask a transient solver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop integrating and return the history recorded so far.
    StopEarly,
}

/// How a transient run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the last grid point.
    Complete,

    /// An observer returned [`Action::StopEarly`].
    StoppedByObserver,
}
