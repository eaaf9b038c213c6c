//! Numerical solvers for the Outbreak workspace.
//!
//! - [`transient::euler`] — fixed-step forward Euler over a [`TimeGrid`]
//! - [`transient::dopri`] — adaptive Dormand–Prince 5(4) from `ode_solvers`,
//!   reporting at every point of a [`TimeGrid`]
//!
//! Both solvers drive a [`Model`] through an [`OdeProblem`] and report to an
//! [`Observer`], which can stop the run early.
//!
//! [`TimeGrid`]: outbreak_core::TimeGrid
//! [`Model`]: outbreak_core::Model
//! [`OdeProblem`]: outbreak_core::OdeProblem
//! [`Observer`]: outbreak_core::Observer

pub mod transient;
