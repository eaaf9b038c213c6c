use std::convert::Infallible;

use outbreak_core::{Model, OdeProblem};

use crate::{Input, ModelKind, ModelParams, ModelState, Rates};

/// A compartmental model: a kind together with its rates.
///
/// Calling the model evaluates the kind's derivative function at the input
/// state. The call never fails and ignores the input time, since the rates
/// are constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compartmental {
    kind: ModelKind,
    params: ModelParams,
}

impl Compartmental {
    #[must_use]
    pub fn new(kind: ModelKind, params: ModelParams) -> Self {
        Self { kind, params }
    }

    #[must_use]
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    #[must_use]
    pub fn params(&self) -> &ModelParams {
        &self.params
    }
}

impl Model for Compartmental {
    type Input = Input;
    type Output = Rates;
    type Error = Infallible;

    fn call(&self, input: &Input) -> Result<Rates, Infallible> {
        Ok(self.kind.derivative()(&input.state, &self.params))
    }
}

/// Wires [`Compartmental`] inputs and outputs to the solvers.
///
/// The integrable state is the input's [`ModelState`], its derivative is the
/// model output, and stepping by `dt` advances the input time by `dt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompartmentProblem;

impl OdeProblem for CompartmentProblem {
    type Input = Input;
    type Output = Rates;
    type Delta = f64;
    type State = ModelState;
    type Error = Infallible;

    fn state(&self, input: &Input) -> Result<ModelState, Infallible> {
        Ok(input.state)
    }

    fn derivative(&self, _input: &Input, output: &Rates) -> Result<Rates, Infallible> {
        Ok(*output)
    }

    fn build_input(&self, base: &Input, state: &ModelState, dt: &f64) -> Result<Input, Infallible> {
        Ok(Input::new(base.time + dt, *state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use outbreak_core::StepIntegrable;

    #[test]
    fn call_uses_the_kind_derivative() {
        let params = ModelParams::new(0.2, 0.0004, 0.035, 0.005).unwrap();
        let state = ModelState::new([997.0, 3.0, 0.0, 0.0]);
        let input = Input::new(0.0, state);

        let seir = Compartmental::new(ModelKind::Seir, params);
        assert_eq!(seir.call(&input).unwrap(), crate::seir_derivative(&state, &params));

        let sird = Compartmental::new(ModelKind::Sird, params);
        assert_eq!(sird.call(&input).unwrap(), crate::sird_derivative(&state, &params));
    }

    #[test]
    fn build_input_advances_time() {
        let base = Input::new(2.0, ModelState::new([1.0, 0.0, 0.0, 0.0]));
        let next_state = base.state.step(Rates::new([-1.0, 1.0, 0.0, 0.0]), 0.5);
        let next = CompartmentProblem.build_input(&base, &next_state, &0.5).unwrap();

        assert_eq!(next.time, 2.5);
        assert_eq!(next.state.values(), [0.5, 0.5, 0.0, 0.0]);
    }
}
