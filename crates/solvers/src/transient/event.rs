use outbreak_core::Snapshot;

/// Reported once per grid point, starting with the initial input at step 0.
///
/// Both solvers emit this type, so an observer written for one works with the
/// other.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    /// Grid index.
    pub step: usize,
    pub time: f64,
    pub snapshot: Snapshot<I, O>,
}
