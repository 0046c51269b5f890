//! Pipeline orchestration.
//!
//! The [`Pipeline`] runs the three release stages strictly in order:
//! 1. [`Stage::Aggregate`] - concatenate modules into the artifact
//! 2. [`Stage::Docs`] - run the documentation generator
//! 3. [`Stage::Package`] - install the artifact into the demo and archive it
//!
//! A failing stage aborts the run; its error is tagged with the stage so the
//! CLI can report it and pick the exit code.
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA-256 digests and checksum files
//! - [`orchestrator`] - [`Pipeline`] and its reports
//! - [`stage`] - [`Stage`] identifiers
//! - [`tool_detection`] - external tool lookup

pub mod checksum;
mod orchestrator;
mod stage;
pub mod tool_detection;

pub use orchestrator::{Pipeline, Preflight, ReleaseSummary, StageReport};
pub use stage::Stage;
