//! Top-level error types.
//!
//! Stage failures keep the stage they came from so the binary can name it
//! and exit with a stage-specific code.

use crate::release::Stage;
use thiserror::Error;

/// Result type alias for CLI and pipeline operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Exit code for configuration and usage failures.
pub const CONFIG_EXIT_CODE: i32 = 1;

/// Main error type for a release run
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Settings could not be loaded or failed validation
    #[error("configuration error: {0}")]
    Config(#[source] crate::release::Error),

    /// A pipeline stage failed
    #[error("{stage} stage failed: {source}")]
    Stage {
        /// Failing stage
        stage: Stage,
        /// Stage error
        #[source]
        source: crate::release::Error,
    },

    /// IO errors outside of any stage (terminal output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Stage { stage, .. } => stage.exit_code(),
            _ => CONFIG_EXIT_CODE,
        }
    }

    /// Stage that failed, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_errors_carry_stage_exit_codes() {
        let err = ReleaseError::Stage {
            stage: Stage::Package,
            source: crate::release::Error::not_found("locating build artifact", "BulletHell.js"),
        };
        assert_eq!(err.exit_code(), 5);
        assert_eq!(err.stage(), Some(Stage::Package));
        assert_eq!(
            err.to_string(),
            "package stage failed: locating build artifact: BulletHell.js not found"
        );
    }

    #[test]
    fn configuration_errors_exit_with_one() {
        let err = ReleaseError::Cli(CliError::InvalidArguments {
            reason: "bad".into(),
        });
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.stage(), None);
    }
}
