//! Release pipeline library for modular plugin sources.
//!
//! This library assembles a distributable plugin release:
//! - Concatenates source modules into a single artifact
//! - Runs the external documentation generator
//! - Installs the artifact into a demo project and archives the demo
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod release;

// Re-export commonly used types
pub use error::{CliError, ReleaseError, Result};
