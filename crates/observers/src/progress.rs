use std::fmt::Write;

use outbreak_core::{Components, Observer};

use crate::traits::StateEvent;

/// Logs one line per integration step at `info` level.
///
/// Lines report the whole day and each labeled compartment to two decimals:
///
/// ```text
/// day 1: S=995.80, E=3.00, I=0.00, R=0.00
/// ```
///
/// The initial state (step 0) is not logged. The logger never steers the
/// solver.
#[derive(Debug, Clone)]
pub struct ProgressLogger {
    labels: Vec<String>,
}

impl ProgressLogger {
    /// Creates a logger that names compartments with `labels`, in order.
    #[must_use]
    pub fn new(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|&l| l.to_owned()).collect(),
        }
    }

    /// Formats a progress line for the given time and compartment values.
    ///
    /// Values without a label are not printed.
    #[must_use]
    pub fn line(&self, time: f64, values: impl IntoIterator<Item = f64>) -> String {
        let mut line = format!("day {}:", time.trunc());
        for (i, (label, value)) in self.labels.iter().zip(values).enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            // Writing to a String cannot fail.
            let _ = write!(line, "{sep}{label}={value:.2}");
        }
        line
    }
}

impl<E: StateEvent, A> Observer<E, A> for ProgressLogger {
    fn observe(&mut self, event: &E) -> Option<A> {
        if event.step() > 0 {
            log::info!("{}", self.line(event.time(), event.input().components()));
        }
        None
    }
}
