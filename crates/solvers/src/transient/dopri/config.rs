use thiserror::Error;

/// Tolerances for the Dormand–Prince solver.
///
/// A step is accepted when every component's local error is within
/// `atol + rtol * |y|`. `atol` must be positive: compartments that start at
/// zero would otherwise get a zero error budget and stall the step size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    rtol: f64,
    atol: f64,
}

/// Errors that can occur when validating a Dormand–Prince solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rtol must be finite and positive")]
    Rtol,

    #[error("atol must be finite and positive")]
    Atol,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rtol: 1e-8,
            atol: 1e-8,
        }
    }
}

impl Config {
    /// Creates a config with the given relative and absolute tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if either tolerance is not finite and positive.
    pub fn new(rtol: f64, atol: f64) -> Result<Self, ConfigError> {
        if !rtol.is_finite() || rtol <= 0.0 {
            return Err(ConfigError::Rtol);
        }
        if !atol.is_finite() || atol <= 0.0 {
            return Err(ConfigError::Atol);
        }
        Ok(Self { rtol, atol })
    }

    #[must_use]
    pub fn rtol(&self) -> f64 {
        self.rtol
    }

    #[must_use]
    pub fn atol(&self) -> f64 {
        self.atol
    }
}
