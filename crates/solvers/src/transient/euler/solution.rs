use outbreak_core::Snapshot;

use crate::transient::Status;

/// Output of [`solve`](super::solve): the grid points reached and what the
/// model returned at each.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,

    /// Grid times, parallel to `history`.
    pub times: Vec<f64>,

    /// Snapshot at every grid point reached, index 0 being the initial input.
    pub history: Vec<Snapshot<I, O>>,

    /// Forward steps taken, one less than `history.len()`.
    pub steps: usize,
}
