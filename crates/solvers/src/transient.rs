//! Solvers that integrate ODE problems forward in time.
//!
//! Each solver reports one [`Event`] per grid point, accepts the shared
//! [`Action`] from its observer, and ends with a [`Status`].

mod control;
mod event;

pub mod dopri;
pub mod euler;

pub use control::{Action, Status};
pub use event::Event;
