//! Command line interface for the release pipeline.
//!
//! This module parses arguments, initialises logging, layers configuration
//! and dispatches to the selected command.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use output::OutputManager;

use crate::{
    error::{CliError, ReleaseError, Result},
    release::{CONFIG_FILE_NAME, ConfigFile, Settings, SettingsBuilder},
};
use std::time::Duration;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    init_logging(&args);
    execute(&args).await
}

/// Runs the command described by already parsed arguments.
pub async fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;
    let runtime_config = RuntimeConfig::from(args);
    let settings = load_settings(args)?;

    match args.command() {
        Command::Check => commands::check(settings, &runtime_config).await,
        command => commands::release(settings, command.stages(), &runtime_config).await,
    }
}

/// Initialises `env_logger`; `RUST_LOG` takes precedence over verbosity flags.
fn init_logging(args: &Args) {
    let env = env_logger::Env::default().default_filter_or(args.log_filter());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

/// Layers defaults, the configuration file and command line overrides.
///
/// An explicitly named configuration file must exist and, like every other
/// relative path, resolves against the root. The implicit
/// `<root>/release.toml` is optional.
pub fn load_settings(args: &Args) -> Result<Settings> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };

    let file = match &args.config {
        Some(path) => ConfigFile::load(&root.join(path)),
        None => ConfigFile::load_optional(&root.join(CONFIG_FILE_NAME)),
    }
    .map_err(ReleaseError::Config)?;

    let mut builder = SettingsBuilder::new().root(&root).apply_file(file);
    if args.skip_docs {
        builder = builder.docs_enabled(false);
    }
    if let Some(secs) = args.doc_timeout {
        builder = builder.doc_timeout(Duration::from_secs(secs));
    }
    if let Some(format) = args.format {
        builder = builder.archive_format(format);
    }
    if args.checksum_file {
        builder = builder.checksum_file(true);
    }

    builder.build().map_err(ReleaseError::Config)
}
