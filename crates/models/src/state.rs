use std::ops::Index;

use outbreak_core::{Components, StepIntegrable};

/// Sizes of the four compartments of a model, in the order given by
/// [`ModelKind::labels`](crate::ModelKind::labels).
///
/// Values are real-valued counts (or fractions) and are not constrained: the
/// integrators follow the model arithmetic even if it drives a compartment
/// negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelState([f64; 4]);

/// Rate of change of each compartment, in the same order as [`ModelState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates([f64; 4]);

/// Model input: the current time and compartment sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Input {
    pub time: f64,
    pub state: ModelState,
}

impl ModelState {
    /// Creates a state from compartment sizes.
    #[must_use]
    pub fn new(values: [f64; 4]) -> Self {
        Self(values)
    }

    /// Returns the compartment sizes.
    #[must_use]
    pub fn values(&self) -> [f64; 4] {
        self.0
    }
}

impl From<[f64; 4]> for ModelState {
    fn from(values: [f64; 4]) -> Self {
        Self(values)
    }
}

impl Index<usize> for ModelState {
    type Output = f64;

    fn index(&self, compartment: usize) -> &f64 {
        &self.0[compartment]
    }
}

impl Components for ModelState {
    fn components(&self) -> impl Iterator<Item = f64> {
        self.0.into_iter()
    }
}

impl StepIntegrable<f64> for ModelState {
    type Derivative = Rates;

    fn step(&self, derivative: Rates, dt: f64) -> Self {
        Self(std::array::from_fn(|k| self.0[k] + derivative.0[k] * dt))
    }
}

impl Rates {
    /// Creates rates from per-compartment derivatives.
    #[must_use]
    pub fn new(values: [f64; 4]) -> Self {
        Self(values)
    }

    /// Returns the per-compartment derivatives.
    #[must_use]
    pub fn values(&self) -> [f64; 4] {
        self.0
    }
}

impl Index<usize> for Rates {
    type Output = f64;

    fn index(&self, compartment: usize) -> &f64 {
        &self.0[compartment]
    }
}

impl Components for Rates {
    fn components(&self) -> impl Iterator<Item = f64> {
        self.0.into_iter()
    }
}

impl Input {
    /// Creates an input at `time`.
    #[must_use]
    pub fn new(time: f64, state: ModelState) -> Self {
        Self { time, state }
    }
}

impl Components for Input {
    fn components(&self) -> impl Iterator<Item = f64> {
        self.state.components()
    }
}
