//! Reusable observers for the Outbreak solvers.
//!
//! Every observer here works with both [`euler`] and [`dopri`] through the
//! capability traits in [`traits`].
//!
//! - [`ProgressLogger`] — one `info` line per step with the current values
//! - [`NonNegativeGuard`] — stops a run when a compartment turns negative or
//!   non-finite
//! - [`Chart`] — collects labeled series for the plotting window
//!
//! # Features
//!
//! - `plot` — Enables [`show_all`] for rendering charts in one egui window.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`euler`]: outbreak_solvers::transient::euler
//! [`dopri`]: outbreak_solvers::transient::dopri

pub mod traits;

mod chart;
mod guard;
mod progress;

#[cfg(feature = "plot")]
mod plot;

pub use chart::{Chart, Trace};
pub use guard::{NonNegativeGuard, Violation};
pub use progress::ProgressLogger;

#[cfg(feature = "plot")]
pub use plot::show_all;
