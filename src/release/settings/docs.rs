//! Documentation generator settings.

use std::{path::PathBuf, time::Duration};

/// Default limit for one documentation run (5 minutes).
pub const DEFAULT_DOC_TIMEOUT: Duration = Duration::from_secs(300);

/// How the external documentation generator is invoked.
///
/// The tool runs as `<tool> -c <config>` from the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSettings {
    /// Run the docs stage at all.
    ///
    /// Default: `true`
    pub enabled: bool,

    /// Program name looked up on `PATH`, or a path to the executable.
    ///
    /// Default: `jsdoc`
    pub tool: String,

    /// Generator configuration file, relative to the project root.
    ///
    /// Default: `jsdoc-conf.json`
    pub config: PathBuf,

    /// Upper bound on a single run. The process is killed when it is exceeded.
    ///
    /// Default: 300 seconds
    pub timeout: Duration,
}

impl Default for DocSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tool: "jsdoc".into(),
            config: PathBuf::from("jsdoc-conf.json"),
            timeout: DEFAULT_DOC_TIMEOUT,
        }
    }
}
