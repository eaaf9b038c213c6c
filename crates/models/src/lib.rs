//! SEIR and SIRD compartmental models.
//!
//! The two models share one state shape, a 4-tuple of compartment sizes, and
//! differ only in their derivative function, selected through [`ModelKind`]:
//!
//! | kind | compartments | derivative |
//! |------|--------------|------------|
//! | [`ModelKind::Seir`] | S, E, I, R | [`seir_derivative`] |
//! | [`ModelKind::Sird`] | S, I, R, D | [`sird_derivative`] |
//!
//! [`Compartmental`] wraps a kind and its [`ModelParams`] as a
//! [`Model`](outbreak_core::Model), and [`simulate`] integrates it with either
//! solver into a [`Trajectory`].

mod kind;
mod model;
mod params;
mod state;
mod trajectory;

pub mod simulate;

pub use kind::{DerivativeFn, ModelKind, seir_derivative, sird_derivative};
pub use model::{CompartmentProblem, Compartmental};
pub use params::{ModelParams, ParamsError};
pub use state::{Input, ModelState, Rates};
pub use trajectory::Trajectory;
