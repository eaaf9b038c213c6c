//! Scenario files.
//!
//! A scenario is a TOML document; every section and field is optional and
//! falls back to the built-in outbreak of 1000 people with three exposed:
//!
//! ```toml
//! [grid]
//! t_max = 100.0
//! dt = 1.0
//!
//! [initial]
//! values = [997.0, 3.0, 0.0, 0.0]
//!
//! [params]
//! alpha = 0.2
//! beta = 0.0004
//! gamma = 0.035
//! mu = 0.005
//!
//! [solver]
//! rtol = 1e-8
//! atol = 1e-8
//!
//! [[runs]]
//! title = "Euler"
//! model = "seir"
//! method = "euler"
//! progress = true
//! ```
//!
//! Listing `[[runs]]` replaces the default three runs.

use std::{fs, io, path::Path, path::PathBuf};

use outbreak_core::{TimeGrid, TimeGridError};
use outbreak_models::{ModelKind, ModelParams, ModelState, ParamsError, simulate::Method};
use outbreak_solvers::transient::dopri::{self, ConfigError};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading or validating a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid time grid: {0}")]
    Grid(#[from] TimeGridError),

    #[error("invalid parameters: {0}")]
    Params(#[from] ParamsError),

    #[error("invalid solver settings: {0}")]
    Solver(#[from] ConfigError),

    #[error("a scenario needs at least one run")]
    NoRuns,
}

/// Everything the driver needs to run and plot a set of integrations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub grid: GridSection,
    pub initial: InitialSection,
    pub params: ParamsSection,
    pub solver: SolverSection,
    pub runs: Vec<RunSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridSection {
    pub t_max: f64,
    pub dt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitialSection {
    pub values: [f64; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParamsSection {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub mu: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSection {
    pub rtol: f64,
    pub atol: f64,
}

/// One integration to perform and plot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSpec {
    /// Chart title.
    pub title: String,
    pub model: ModelKind,
    pub method: Method,

    /// Log one progress line per step.
    #[serde(default)]
    pub progress: bool,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            grid: GridSection::default(),
            initial: InitialSection::default(),
            params: ParamsSection::default(),
            solver: SolverSection::default(),
            runs: vec![
                RunSpec {
                    title: "Euler".into(),
                    model: ModelKind::Seir,
                    method: Method::Euler,
                    progress: true,
                },
                RunSpec {
                    title: "ODE: SEIR".into(),
                    model: ModelKind::Seir,
                    method: Method::Adaptive,
                    progress: false,
                },
                RunSpec {
                    title: "ODE: SIRD".into(),
                    model: ModelKind::Sird,
                    method: Method::Adaptive,
                    progress: false,
                },
            ],
        }
    }
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            t_max: 100.0,
            dt: 1.0,
        }
    }
}

impl Default for InitialSection {
    fn default() -> Self {
        Self {
            values: [997.0, 3.0, 0.0, 0.0],
        }
    }
}

impl Default for ParamsSection {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            beta: 0.0004,
            gamma: 0.035,
            mu: 0.005,
        }
    }
}

impl Default for SolverSection {
    fn default() -> Self {
        let config = dopri::Config::default();
        Self {
            rtol: config.rtol(),
            atol: config.atol(),
        }
    }
}

impl Scenario {
    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid scenario.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parses a scenario from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML, names an unknown
    /// field, or lists an empty `runs` array.
    pub fn from_toml(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = toml::from_str(text)?;
        if scenario.runs.is_empty() {
            return Err(ScenarioError::NoRuns);
        }
        Ok(scenario)
    }

    /// Builds the output grid `0, dt, .., t_max`.
    ///
    /// # Errors
    ///
    /// Returns an error if `t_max` is negative or `dt` is not positive.
    pub fn time_grid(&self) -> Result<TimeGrid, ScenarioError> {
        Ok(TimeGrid::span(0.0, self.grid.t_max, self.grid.dt)?)
    }

    /// Validates the model rates.
    ///
    /// # Errors
    ///
    /// Returns an error if any rate is negative or not finite.
    pub fn model_params(&self) -> Result<ModelParams, ScenarioError> {
        let ParamsSection {
            alpha,
            beta,
            gamma,
            mu,
        } = self.params;
        Ok(ModelParams::new(alpha, beta, gamma, mu)?)
    }

    /// Builds the adaptive solver configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is not finite and positive.
    pub fn solver_config(&self) -> Result<dopri::Config, ScenarioError> {
        let SolverSection { rtol, atol } = self.solver;
        Ok(dopri::Config::new(rtol, atol)?)
    }

    #[must_use]
    pub fn initial_state(&self) -> ModelState {
        ModelState::new(self.initial.values)
    }
}
