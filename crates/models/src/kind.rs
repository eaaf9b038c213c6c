use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ModelParams, ModelState, Rates};

/// Computes the time derivative of a state under given parameters.
///
/// Derivative functions are pure: solvers call them repeatedly, at times of
/// their own choosing, and expect the same answer for the same arguments.
pub type DerivativeFn = fn(&ModelState, &ModelParams) -> Rates;

/// The compartmental models available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Susceptible, Exposed, Infectious, Recovered.
    Seir,

    /// Susceptible, Infectious, Recovered, Dead.
    Sird,
}

impl ModelKind {
    /// Every kind, in declaration order.
    pub const ALL: [ModelKind; 2] = [ModelKind::Seir, ModelKind::Sird];

    /// Returns the compartment labels in state order.
    #[must_use]
    pub fn labels(self) -> [&'static str; 4] {
        match self {
            Self::Seir => ["S", "E", "I", "R"],
            Self::Sird => ["S", "I", "R", "D"],
        }
    }

    /// Returns the short model name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Seir => "SEIR",
            Self::Sird => "SIRD",
        }
    }

    /// Returns the index of the infectious compartment.
    #[must_use]
    pub fn infectious(self) -> usize {
        match self {
            Self::Seir => 2,
            Self::Sird => 1,
        }
    }

    /// Returns the index of the recovered compartment.
    #[must_use]
    pub fn recovered(self) -> usize {
        match self {
            Self::Seir => 3,
            Self::Sird => 2,
        }
    }

    /// Returns the derivative function of this model.
    #[must_use]
    pub fn derivative(self) -> DerivativeFn {
        match self {
            Self::Seir => seir_derivative,
            Self::Sird => sird_derivative,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// SEIR derivative over (S, E, I, R):
///
/// ```text
/// dS = -beta*I*S
/// dE =  beta*I*S - alpha*E
/// dI =  alpha*E - gamma*I
/// dR =  gamma*I
/// ```
#[must_use]
pub fn seir_derivative(state: &ModelState, params: &ModelParams) -> Rates {
    let [s, e, i, _r] = state.values();
    let infection = params.beta() * i * s;
    let onset = params.alpha() * e;
    let recovery = params.gamma() * i;
    Rates::new([-infection, infection - onset, onset - recovery, recovery])
}

/// SIRD derivative over (S, I, R, D):
///
/// ```text
/// dS = -beta*I*S
/// dI =  beta*I*S - gamma*I - mu*I
/// dR =  gamma*I
/// dD =  mu*I
/// ```
#[must_use]
pub fn sird_derivative(state: &ModelState, params: &ModelParams) -> Rates {
    let [s, i, _r, _d] = state.values();
    let infection = params.beta() * i * s;
    let recovery = params.gamma() * i;
    let death = params.mu() * i;
    Rates::new([-infection, infection - recovery - death, recovery, death])
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use outbreak_core::Components;

    fn params() -> ModelParams {
        ModelParams::new(0.2, 0.0004, 0.035, 0.005).unwrap()
    }

    #[test]
    fn seir_matches_hand_computation() {
        let state = ModelState::new([990.0, 5.0, 4.0, 1.0]);
        let rates = seir_derivative(&state, &params());

        assert_relative_eq!(rates[0], -0.0004 * 4.0 * 990.0);
        assert_relative_eq!(rates[1], 0.0004 * 4.0 * 990.0 - 0.2 * 5.0);
        assert_relative_eq!(rates[2], 0.2 * 5.0 - 0.035 * 4.0);
        assert_relative_eq!(rates[3], 0.035 * 4.0);
    }

    #[test]
    fn sird_matches_hand_computation() {
        let state = ModelState::new([990.0, 4.0, 5.0, 1.0]);
        let rates = sird_derivative(&state, &params());

        assert_relative_eq!(rates[0], -0.0004 * 4.0 * 990.0);
        assert_relative_eq!(rates[1], 0.0004 * 4.0 * 990.0 - 0.035 * 4.0 - 0.005 * 4.0);
        assert_relative_eq!(rates[2], 0.035 * 4.0);
        assert_relative_eq!(rates[3], 0.005 * 4.0);
    }

    #[test]
    fn derivatives_sum_to_zero() {
        let state = ModelState::new([700.0, 120.0, 80.0, 100.0]);
        for kind in ModelKind::ALL {
            let rates = kind.derivative()(&state, &params());
            assert_relative_eq!(rates.total(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn function_table_dispatches_by_kind() {
        let state = ModelState::new([900.0, 50.0, 30.0, 20.0]);
        assert_eq!(
            ModelKind::Seir.derivative()(&state, &params()),
            seir_derivative(&state, &params())
        );
        assert_eq!(
            ModelKind::Sird.derivative()(&state, &params()),
            sird_derivative(&state, &params())
        );
    }

    #[test]
    fn labels_and_indices_agree() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.labels()[kind.infectious()], "I");
            assert_eq!(kind.labels()[kind.recovered()], "R");
        }
        assert_eq!(ModelKind::Sird.to_string(), "SIRD");
    }
}
