//! `release.toml` parsing.
//!
//! Every key is optional; absent keys keep the value already on the
//! [`SettingsBuilder`](super::SettingsBuilder). Unknown keys are rejected so
//! typos do not silently fall back to defaults.
//!
//! ```toml
//! artifact = "BulletHell.js"
//!
//! [sources]
//! dir = "src"
//! head_a = "plugin.js"
//! head_b = "sprite.js"
//! extension = "js"
//!
//! [bundle]
//! demo_dir = "demo"
//! artifact_path = "js/plugins/BulletHell.js"
//! archive = "release"
//! format = "zip"
//! checksum_file = false
//!
//! [docs]
//! enabled = true
//! tool = "jsdoc"
//! config = "jsdoc-conf.json"
//! timeout_secs = 300
//! ```

use super::ArchiveFormat;
use crate::release::error::{Error, ErrorExt, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the project root when none is given.
pub const CONFIG_FILE_NAME: &str = "release.toml";

/// Parsed contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Output path of the concatenated artifact
    pub artifact: Option<PathBuf>,
    /// `[sources]` table
    #[serde(default)]
    pub sources: SourcesTable,
    /// `[bundle]` table
    #[serde(default)]
    pub bundle: BundleTable,
    /// `[docs]` table
    #[serde(default)]
    pub docs: DocsTable,
}

/// `[sources]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesTable {
    pub dir: Option<PathBuf>,
    pub head_a: Option<String>,
    pub head_b: Option<String>,
    pub extension: Option<String>,
}

/// `[bundle]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleTable {
    pub demo_dir: Option<PathBuf>,
    pub artifact_path: Option<PathBuf>,
    pub archive: Option<PathBuf>,
    pub format: Option<ArchiveFormat>,
    pub checksum_file: Option<bool>,
}

/// `[docs]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocsTable {
    pub enabled: Option<bool>,
    pub tool: Option<String>,
    pub config: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Parses configuration from a TOML string.
    pub fn parse(contents: &str, origin: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| Error::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).fs_context("reading configuration", path)?;
        log::debug!("Loaded configuration from {}", path.display());
        Self::parse(&contents, path)
    }

    /// Loads `path` when it exists, otherwise returns an empty configuration.
    pub fn load_optional(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            log::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_tables() {
        let config = ConfigFile::parse(
            r#"
artifact = "dist/Plugin.js"

[sources]
head_b = "core.js"

[bundle]
format = "tar-gz"

[docs]
enabled = false
"#,
            Path::new("release.toml"),
        )
        .unwrap();

        assert_eq!(config.artifact, Some(PathBuf::from("dist/Plugin.js")));
        assert_eq!(config.sources.head_b.as_deref(), Some("core.js"));
        assert_eq!(config.sources.head_a, None);
        assert_eq!(config.bundle.format, Some(ArchiveFormat::TarGz));
        assert_eq!(config.docs.enabled, Some(false));
        assert_eq!(config.docs.timeout_secs, None);
    }

    #[test]
    fn empty_file_is_valid() {
        let config = ConfigFile::parse("", Path::new("release.toml")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ConfigFile::parse("[sources]\nhead_c = \"x.js\"\n", Path::new("release.toml"))
            .unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("release.toml"));
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::load_optional(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn missing_explicit_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigFile::load(&dir.path().join("custom.toml")).unwrap_err();
        assert!(err.is_not_found());
    }
}
