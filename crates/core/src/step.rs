/// A state that can be advanced by its derivative over a step `Delta`.
///
/// The forward Euler solver calls [`step`](StepIntegrable::step) with the
/// derivative at the start of the interval. The adaptive solver calls it with
/// a weighted combination of stage derivatives, which is why it also asks the
/// derivative type to support addition and scaling.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

/// Read-only access to the real components of a state or derivative.
///
/// Used for error norms in adaptive stepping and by observers that inspect
/// compartment sizes without knowing the concrete model.
pub trait Components {
    /// Returns the components in a fixed, model-defined order.
    fn components(&self) -> impl Iterator<Item = f64>;

    /// Returns the sum of all components.
    fn total(&self) -> f64 {
        self.components().sum()
    }
}

impl<const N: usize> Components for [f64; N] {
    fn components(&self) -> impl Iterator<Item = f64> {
        self.iter().copied()
    }
}
