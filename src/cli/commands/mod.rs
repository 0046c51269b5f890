//! Command execution for release operations.
//!
//! - [`release`] - runs a sequence of pipeline stages and reports each one
//! - [`check`] - validates inputs and prints the planned module order

mod check;
mod release;

pub use check::check;
pub use release::release;
