//! Release assembly for modular plugin sources.
//!
//! This module provides the pipeline stages and their configuration:
//! - [`aggregate`] - merges source modules into a single artifact
//! - [`docs`] - runs the external documentation generator
//! - [`package`] - installs the artifact into the demo project and archives it
//! - [`pipeline`] - runs the stages in order
//! - [`settings`] - configuration with defaults, file overlay and validation

pub mod aggregate;
pub mod docs;
pub mod error;
pub mod package;
pub mod pipeline;
pub mod settings;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use aggregate::{AggregateReport, MODULE_SEPARATOR, PlannedModule, SourceModule};
pub use docs::DocsReport;
pub use error::{Error, Result};
pub use package::PackageReport;
pub use pipeline::{Pipeline, Preflight, ReleaseSummary, Stage, StageReport};
pub use settings::{
    ArchiveFormat, BundleSettings, CONFIG_FILE_NAME, ConfigFile, DocSettings, Settings,
    SettingsBuilder, SourceSettings,
};
