use std::error::Error as StdError;

use ode_solvers::dop_shared::IntegrationError;
use thiserror::Error;

/// Errors that can occur during Dormand–Prince integration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("model error near t={time}: {source}")]
    Model {
        time: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("problem error near t={time}: {source}")]
    Problem {
        time: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error(transparent)]
    Integration(#[from] IntegrationError),

    #[error("integrator produced no output at grid time t={time}")]
    MissingOutput { time: f64 },
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(time: f64) -> impl FnOnce(E) -> Self {
        move |err| Self::Model {
            time,
            source: Box::new(err),
        }
    }

    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(time: f64) -> impl FnOnce(E) -> Self {
        move |err| Self::Problem {
            time,
            source: Box::new(err),
        }
    }
}
