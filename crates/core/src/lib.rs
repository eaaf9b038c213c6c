//! Core traits and types for the Outbreak workspace.
//!
//! This crate defines the shared abstractions that solvers, observers, and
//! epidemic models build on:
//!
//! - [`Model`] — a callable that maps a typed input to a typed output
//! - [`Snapshot`] — a captured input/output pair from a model call
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`OdeProblem`] — adapts model inputs and outputs to a steppable state
//! - [`StepIntegrable`] and [`Components`] — what a state must support to be
//!   advanced by the fixed-step and adaptive solvers
//! - [`TimeGrid`] — the uniform output grid shared by every integration run

mod model;
mod observer;
mod problem;
mod step;
mod time;

pub use observer::Observer;
pub use problem::OdeProblem;
pub use step::{Components, DerivativeOf, StepIntegrable};
pub use time::{TimeGrid, TimeGridError};
pub use {model::Model, model::Snapshot};
