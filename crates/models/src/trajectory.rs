use outbreak_core::{Components, Snapshot};

use crate::{Input, ModelKind, ModelState, Rates};

/// Relative tolerance for matching a requested time to a grid time.
const TIME_MATCH: f64 = 1e-9;

/// Compartment sizes over time, one state per grid point in time order.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    kind: ModelKind,
    times: Vec<f64>,
    states: Vec<ModelState>,
}

impl Trajectory {
    /// Builds a trajectory from solver output.
    pub(crate) fn from_history(
        kind: ModelKind,
        times: Vec<f64>,
        history: Vec<Snapshot<Input, Rates>>,
    ) -> Self {
        debug_assert_eq!(times.len(), history.len());
        Self {
            kind,
            times,
            states: history.into_iter().map(|s| s.input.state).collect(),
        }
    }

    /// Returns the model kind that produced this trajectory.
    #[must_use]
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Returns the compartment labels in state order.
    #[must_use]
    pub fn labels(&self) -> [&'static str; 4] {
        self.kind.labels()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[must_use]
    pub fn states(&self) -> &[ModelState] {
        &self.states
    }

    /// Returns the last state, if any.
    #[must_use]
    pub fn last(&self) -> Option<&ModelState> {
        self.states.last()
    }

    /// Iterates over `(time, state)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &ModelState)> {
        self.times.iter().copied().zip(&self.states)
    }

    /// Returns the size of one compartment at every point.
    ///
    /// # Panics
    ///
    /// Panics if `compartment` is not below 4.
    #[must_use]
    pub fn compartment(&self, compartment: usize) -> Vec<f64> {
        self.states.iter().map(|s| s[compartment]).collect()
    }

    /// Returns one compartment as `[time, value]` points for plotting.
    ///
    /// # Panics
    ///
    /// Panics if `compartment` is not below 4.
    #[must_use]
    pub fn series(&self, compartment: usize) -> Vec<[f64; 2]> {
        self.iter().map(|(t, s)| [t, s[compartment]]).collect()
    }

    /// Returns the sum over all compartments at every point.
    #[must_use]
    pub fn totals(&self) -> Vec<f64> {
        self.states.iter().map(Components::total).collect()
    }

    /// Returns the state at `time`, if `time` is one of the grid points.
    #[must_use]
    pub fn state_at(&self, time: f64) -> Option<&ModelState> {
        let tolerance = TIME_MATCH * time.abs().max(1.0);
        self.iter()
            .find(|(t, _)| (t - time).abs() <= tolerance)
            .map(|(_, state)| state)
    }

    /// Returns the largest absolute compartment difference from `other`
    /// over the time points both trajectories share.
    ///
    /// Returns `None` if they share no time point.
    #[must_use]
    pub fn max_difference(&self, other: &Trajectory) -> Option<f64> {
        self.iter()
            .filter_map(|(t, state)| {
                other.state_at(t).map(|theirs| {
                    state
                        .components()
                        .zip(theirs.components())
                        .map(|(a, b)| (a - b).abs())
                        .fold(0.0, f64::max)
                })
            })
            .reduce(f64::max)
    }
}
