//! Core Settings struct and path resolution.

use super::{ArchiveFormat, BundleSettings, DocSettings, SourceSettings};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Resolved configuration for one pipeline run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Relative paths
/// from the configuration are resolved against the project root by the
/// accessor methods, so stages never depend on the process working directory.
///
/// # Examples
///
/// ```no_run
/// use plugin_release::release::SettingsBuilder;
///
/// # fn example() -> plugin_release::release::Result<()> {
/// let settings = SettingsBuilder::new().root("/work/bullet-hell").build()?;
/// assert_eq!(
///     settings.archive_path(),
///     std::path::Path::new("/work/bullet-hell/release.zip")
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Project root every relative path hangs off.
    root: PathBuf,

    /// Module discovery.
    sources: SourceSettings,

    /// Concatenated artifact, relative to root.
    artifact: PathBuf,

    /// Demo project and archive.
    bundle: BundleSettings,

    /// Documentation generator.
    docs: DocSettings,
}

impl Settings {
    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        root: PathBuf,
        sources: SourceSettings,
        artifact: PathBuf,
        bundle: BundleSettings,
        docs: DocSettings,
    ) -> Self {
        Self {
            root,
            sources,
            artifact,
            bundle,
            docs,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Returns the project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the raw source settings.
    pub fn sources(&self) -> &SourceSettings {
        &self.sources
    }

    /// Returns the directory holding the modules.
    pub fn source_dir(&self) -> PathBuf {
        self.resolve(&self.sources.dir)
    }

    /// Returns the first head module's file name.
    pub fn head_a(&self) -> &str {
        &self.sources.head_a
    }

    /// Returns the second head module's file name.
    pub fn head_b(&self) -> &str {
        &self.sources.head_b
    }

    /// Returns the module extension without the leading dot.
    pub fn source_extension(&self) -> &str {
        &self.sources.extension
    }

    /// Returns where the concatenated artifact is written.
    pub fn artifact_path(&self) -> PathBuf {
        self.resolve(&self.artifact)
    }

    /// Returns the raw bundle settings.
    pub fn bundle_settings(&self) -> &BundleSettings {
        &self.bundle
    }

    /// Returns the demo project root.
    pub fn demo_dir(&self) -> PathBuf {
        self.resolve(&self.bundle.demo_dir)
    }

    /// Returns where the artifact is copied inside the demo project.
    pub fn demo_artifact_path(&self) -> PathBuf {
        self.demo_dir().join(&self.bundle.artifact_path)
    }

    /// Returns the archive format.
    pub fn archive_format(&self) -> ArchiveFormat {
        self.bundle.format
    }

    /// Returns the full archive path, extension included.
    pub fn archive_path(&self) -> PathBuf {
        let base = self.resolve(&self.bundle.archive);
        let mut name = base.as_os_str().to_os_string();
        name.push(".");
        name.push(self.bundle.format.extension());
        PathBuf::from(name)
    }

    /// Whether a checksum file is written next to the archive.
    pub fn checksum_file(&self) -> bool {
        self.bundle.checksum_file
    }

    /// Returns the raw documentation settings.
    pub fn doc_settings(&self) -> &DocSettings {
        &self.docs
    }

    /// Whether the docs stage runs.
    pub fn docs_enabled(&self) -> bool {
        self.docs.enabled
    }

    /// Returns the documentation tool as configured.
    pub fn doc_tool(&self) -> &str {
        &self.docs.tool
    }

    /// Returns the documentation generator configuration file.
    pub fn doc_config(&self) -> PathBuf {
        self.resolve(&self.docs.config)
    }

    /// Returns the documentation run time limit.
    pub fn doc_timeout(&self) -> Duration {
        self.docs.timeout
    }
}
