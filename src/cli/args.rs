//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap. Every option is
//! global so it can follow any subcommand.

use crate::release::{ArchiveFormat, Stage};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Release pipeline for modular plugin sources
#[derive(Parser, Debug)]
#[command(
    name = "plugin_release",
    version,
    about = "Concatenate plugin modules, generate docs, package the demo",
    long_about = "Builds a plugin release in three stages:

  1. aggregate  concatenate src/*.js into the single plugin file
  2. docs       run the documentation generator (jsdoc -c jsdoc-conf.json)
  3. package    copy the plugin into the demo project and archive the demo

Settings come from release.toml in the project root when present.

Usage:
  plugin_release                      run every stage
  plugin_release concat               only rebuild the plugin file
  plugin_release --skip-docs          run without the documentation tool
  plugin_release check                validate inputs, write nothing

Exit codes: 0 success, 1 configuration error, 3 aggregate, 4 docs, 5 package."
)]
pub struct Args {
    /// Stage selection (default: all)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Project root; relative paths in the configuration resolve against it
    #[arg(short = 'C', long, value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Configuration file, relative to the project root (default: <root>/release.toml if it exists)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Skip the documentation stage
    #[arg(long, global = true)]
    pub skip_docs: bool,

    /// Documentation tool time limit in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub doc_timeout: Option<u64>,

    /// Release archive format
    #[arg(long, value_enum, value_name = "FORMAT", global = true)]
    pub format: Option<ArchiveFormat>,

    /// Write a .sha256 file next to the archive
    #[arg(long, global = true)]
    pub checksum_file: bool,

    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Which part of the pipeline to run.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run every stage (default)
    All,
    /// Concatenate modules into the plugin file
    Concat,
    /// Generate documentation
    Docs,
    /// Copy the plugin into the demo project and write the archive
    Demo,
    /// Validate inputs and show the module order without writing anything
    Check,
}

impl Command {
    /// Stages this command runs, empty for [`Command::Check`].
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            Self::All => &Stage::ALL,
            Self::Concat => &[Stage::Aggregate],
            Self::Docs => &[Stage::Docs],
            Self::Demo => &[Stage::Package],
            Self::Check => &[],
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Selected command, [`Command::All`] when none was given.
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::All)
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.doc_timeout == Some(0) {
            return Err("--doc-timeout must be greater than zero".to_string());
        }
        if self.skip_docs && self.command() == Command::Docs {
            return Err("--skip-docs cannot be combined with the docs command".to_string());
        }
        Ok(())
    }

    /// Default log filter for the selected verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);
        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
