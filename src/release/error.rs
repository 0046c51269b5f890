//! Error types for release stages.
//!
//! Every filesystem failure carries the path it happened on so the CLI can
//! name it. Missing inputs surface as [`Error::NotFound`] rather than a bare
//! IO error.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

/// Result type alias for release stage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the aggregate, docs and package stages.
#[derive(Error, Debug)]
pub enum Error {
    /// A required file or directory does not exist
    #[error("{context}: {} not found", path.display())]
    NotFound {
        /// What was being done when the path turned up missing
        context: String,
        /// Missing path
        path: PathBuf,
    },

    /// Filesystem operation failed on a known path
    #[error("{context} ({}): {source}", path.display())]
    Io {
        /// What was being done
        context: String,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// IO error without path information
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// External tool could not be started
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line that was attempted
        command: String,
        /// Spawn error
        error: io::Error,
    },

    /// External tool exited unsuccessfully
    #[error("`{command}` exited with {}", describe_code(*code))]
    ToolFailure {
        /// Command line that ran
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// External tool exceeded its time budget and was killed
    #[error("`{command}` timed out after {}s and was terminated", timeout.as_secs())]
    ToolTimeout {
        /// Command line that ran
        command: String,
        /// Configured limit
        timeout: Duration,
    },

    /// Configuration file could not be parsed
    #[error("invalid configuration file {}: {source}", path.display())]
    ConfigParse {
        /// Configuration file path
        path: PathBuf,
        /// Parser error
        #[source]
        source: toml::de::Error,
    },

    /// A setting failed validation
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting {
        /// Setting name as written in the configuration file
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// ZIP writer errors
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal errors
    #[error("directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path outside of the expected base directory
    #[error("path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Anything else
    #[error("{0}")]
    GenericError(String),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl Error {
    /// Builds a [`Error::NotFound`] for `path`.
    pub fn not_found(context: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            context: context.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Whether this error reports a missing input.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Attaches filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Io`], or [`Error::NotFound`] when the
    /// path does not exist.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| {
            let path = path.as_ref().to_path_buf();
            if source.kind() == io::ErrorKind::NotFound {
                Error::NotFound {
                    context: context.to_string(),
                    path,
                }
            } else {
                Error::Io {
                    context: context.to_string(),
                    path,
                    source,
                }
            }
        })
    }
}

/// Converts a missing value into [`Error::GenericError`] with a message.
pub trait Context<T> {
    /// Adds a message to the failure case.
    fn context<C: Display>(self, message: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, message: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(message.to_string()))
    }
}

/// Returns early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::release::Error::GenericError(format!($($arg)*)).into())
    };
}
