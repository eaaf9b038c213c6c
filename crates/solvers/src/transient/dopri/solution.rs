use outbreak_core::Snapshot;

use crate::transient::Status;

/// The result of a Dormand–Prince integration.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,

    /// Grid times, parallel to `history`.
    pub times: Vec<f64>,

    /// One snapshot per grid point reached, starting with the initial state.
    pub history: Vec<Snapshot<I, O>>,

    /// Internal steps that passed the error test.
    pub accepted_steps: usize,

    /// Internal steps that were retried with a smaller step size.
    pub rejected_steps: usize,

    /// Total number of model calls, including one per reported grid point.
    pub evaluations: usize,
}
