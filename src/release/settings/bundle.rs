//! Demo bundle and release archive settings.

use serde::Deserialize;
use std::{fmt, path::PathBuf};

/// Compression format of the release archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
    /// Deflate-compressed ZIP
    #[default]
    Zip,
    /// Gzip-compressed tarball
    TarGz,
}

impl ArchiveFormat {
    /// File extension appended to the archive base path.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Demo project layout and archive output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSettings {
    /// Root of the demo project, relative to the project root.
    ///
    /// Default: `demo`
    pub demo_dir: PathBuf,

    /// Where the artifact goes inside the demo project. Must be relative.
    ///
    /// Default: `js/plugins/BulletHell.js`
    pub artifact_path: PathBuf,

    /// Archive path without extension, relative to the project root.
    ///
    /// Default: `release`
    pub archive: PathBuf,

    /// Archive compression format.
    ///
    /// Default: [`ArchiveFormat::Zip`]
    pub format: ArchiveFormat,

    /// Write a `sha256sum`-style file next to the archive.
    ///
    /// Default: `false`
    pub checksum_file: bool,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            demo_dir: PathBuf::from("demo"),
            artifact_path: PathBuf::from("js/plugins/BulletHell.js"),
            archive: PathBuf::from("release"),
            format: ArchiveFormat::Zip,
            checksum_file: false,
        }
    }
}
