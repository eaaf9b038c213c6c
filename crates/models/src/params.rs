use thiserror::Error;

/// Rates of a compartmental model, constant over the simulation horizon.
///
/// Each model reads the rates it needs: SEIR uses `alpha`, `beta`, and
/// `gamma`; SIRD uses `beta`, `gamma`, and `mu`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    alpha: f64,
    beta: f64,
    gamma: f64,
    mu: f64,
}

/// Errors that can occur when validating model parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParamsError {
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidRate { name: &'static str, value: f64 },
}

impl ModelParams {
    /// Creates a validated parameter set.
    ///
    /// # Errors
    ///
    /// Returns an error if any rate is negative or not finite.
    pub fn new(alpha: f64, beta: f64, gamma: f64, mu: f64) -> Result<Self, ParamsError> {
        for (name, value) in [("alpha", alpha), ("beta", beta), ("gamma", gamma), ("mu", mu)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::InvalidRate { name, value });
            }
        }
        Ok(Self {
            alpha,
            beta,
            gamma,
            mu,
        })
    }

    /// Incubation rate, the per-day rate at which exposed become infectious.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Transmission rate per susceptible-infectious contact.
    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Recovery rate.
    #[must_use]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Mortality rate of the infectious.
    #[must_use]
    pub fn mu(&self) -> f64 {
        self.mu
    }
}
