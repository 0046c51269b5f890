//! Builder for constructing Settings.

use super::{ArchiveFormat, BundleSettings, ConfigFile, DocSettings, Settings, SourceSettings};
use crate::release::error::{Error, Result};
use std::{
    path::{Component, Path, PathBuf},
    time::Duration,
};

/// Default artifact path, relative to the project root.
const DEFAULT_ARTIFACT: &str = "BulletHell.js";

/// Builder for constructing [`Settings`].
///
/// Values are layered: defaults, then [`apply_file`](Self::apply_file), then
/// individual setters. [`build`](Self::build) validates the result.
///
/// # Examples
///
/// ```no_run
/// use plugin_release::release::{ArchiveFormat, SettingsBuilder};
/// use std::time::Duration;
///
/// # fn example() -> plugin_release::release::Result<()> {
/// let settings = SettingsBuilder::new()
///     .root("/work/bullet-hell")
///     .archive_format(ArchiveFormat::TarGz)
///     .doc_timeout(Duration::from_secs(60))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    root: Option<PathBuf>,
    sources: SourceSettings,
    artifact: Option<PathBuf>,
    bundle: BundleSettings,
    docs: DocSettings,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root.
    ///
    /// Default: the current working directory
    pub fn root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets module discovery settings.
    pub fn sources(mut self, sources: SourceSettings) -> Self {
        self.sources = sources;
        self
    }

    /// Sets the concatenated artifact path.
    ///
    /// Default: `BulletHell.js`
    pub fn artifact_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.artifact = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets demo bundle and archive settings.
    pub fn bundle_settings(mut self, bundle: BundleSettings) -> Self {
        self.bundle = bundle;
        self
    }

    /// Sets documentation generator settings.
    pub fn doc_settings(mut self, docs: DocSettings) -> Self {
        self.docs = docs;
        self
    }

    /// Enables or disables the docs stage.
    pub fn docs_enabled(mut self, enabled: bool) -> Self {
        self.docs.enabled = enabled;
        self
    }

    /// Sets the documentation run time limit.
    pub fn doc_timeout(mut self, timeout: Duration) -> Self {
        self.docs.timeout = timeout;
        self
    }

    /// Sets the archive format.
    pub fn archive_format(mut self, format: ArchiveFormat) -> Self {
        self.bundle.format = format;
        self
    }

    /// Requests a checksum file next to the archive.
    pub fn checksum_file(mut self, enabled: bool) -> Self {
        self.bundle.checksum_file = enabled;
        self
    }

    /// Overlays every key present in a configuration file.
    pub fn apply_file(mut self, file: ConfigFile) -> Self {
        if let Some(artifact) = file.artifact {
            self.artifact = Some(artifact);
        }

        let sources = file.sources;
        if let Some(dir) = sources.dir {
            self.sources.dir = dir;
        }
        if let Some(head_a) = sources.head_a {
            self.sources.head_a = head_a;
        }
        if let Some(head_b) = sources.head_b {
            self.sources.head_b = head_b;
        }
        if let Some(extension) = sources.extension {
            self.sources.extension = extension;
        }

        let bundle = file.bundle;
        if let Some(demo_dir) = bundle.demo_dir {
            self.bundle.demo_dir = demo_dir;
        }
        if let Some(artifact_path) = bundle.artifact_path {
            self.bundle.artifact_path = artifact_path;
        }
        if let Some(archive) = bundle.archive {
            self.bundle.archive = archive;
        }
        if let Some(format) = bundle.format {
            self.bundle.format = format;
        }
        if let Some(checksum_file) = bundle.checksum_file {
            self.bundle.checksum_file = checksum_file;
        }

        let docs = file.docs;
        if let Some(enabled) = docs.enabled {
            self.docs.enabled = enabled;
        }
        if let Some(tool) = docs.tool {
            self.docs.tool = tool;
        }
        if let Some(config) = docs.config {
            self.docs.config = config;
        }
        if let Some(secs) = docs.timeout_secs {
            self.docs.timeout = Duration::from_secs(secs);
        }

        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] when:
    /// - a head name or the extension is empty, or a head name is not a plain file name
    /// - both heads name the same file
    /// - the in-bundle artifact path is absolute or escapes the demo directory
    /// - the documentation timeout is zero
    /// - the archive would be written inside the demo directory it snapshots
    /// - the artifact would be picked up as a module on the next run
    pub fn build(self) -> Result<Settings> {
        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };

        validate_file_name("sources.head_a", &self.sources.head_a)?;
        validate_file_name("sources.head_b", &self.sources.head_b)?;
        if self.sources.head_a == self.sources.head_b {
            return Err(Error::InvalidSetting {
                name: "sources.head_b",
                reason: format!("must differ from head_a ({})", self.sources.head_a),
            });
        }
        let extension = self.sources.extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(Error::InvalidSetting {
                name: "sources.extension",
                reason: "must not be empty".into(),
            });
        }
        let sources = SourceSettings {
            extension: extension.to_string(),
            ..self.sources
        };

        if !is_contained_relative(&self.bundle.artifact_path) {
            return Err(Error::InvalidSetting {
                name: "bundle.artifact_path",
                reason: format!(
                    "{} must be a relative path inside the demo directory",
                    self.bundle.artifact_path.display()
                ),
            });
        }
        if self.docs.timeout.is_zero() {
            return Err(Error::InvalidSetting {
                name: "docs.timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }

        let artifact = self
            .artifact
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT));
        let settings = Settings::new(root, sources, artifact, self.bundle, self.docs);

        let demo_dir = physical_path(&settings.demo_dir());
        if physical_path(&settings.archive_path()).starts_with(&demo_dir) {
            return Err(Error::InvalidSetting {
                name: "bundle.archive",
                reason: format!(
                    "{} lies inside the demo directory it archives",
                    settings.archive_path().display()
                ),
            });
        }

        let artifact = settings.artifact_path();
        let feeds_back = artifact
            .parent()
            .is_some_and(|dir| physical_path(dir) == physical_path(&settings.source_dir()))
            && artifact
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| settings.sources().is_module_name(name));
        if feeds_back {
            return Err(Error::InvalidSetting {
                name: "artifact",
                reason: format!(
                    "{} would be read back as a source module",
                    artifact.display()
                ),
            });
        }

        Ok(settings)
    }
}

/// Removes `.` and `..` components, then resolves symlinks in the longest
/// existing ancestor. Paths that do not exist yet still compare correctly.
fn physical_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normal = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normal.pop();
            }
            other => normal.push(other),
        }
    }

    let mut existing = normal.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(resolved) = existing.canonicalize() {
            return missing.iter().rev().fold(resolved, |acc, name| acc.join(name));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => break,
        }
    }
    normal
}

fn validate_file_name(name: &'static str, value: &str) -> Result<()> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::InvalidSetting {
            name,
            reason: format!("`{value}` is not a plain file name"),
        }),
    }
}

fn is_contained_relative(path: &Path) -> bool {
    let mut components = path.components().peekable();
    components.peek().is_some() && components.all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> SettingsBuilder {
        SettingsBuilder::new().root("/project")
    }

    #[test]
    fn defaults_resolve_against_root() {
        let settings = builder().build().unwrap();
        assert_eq!(settings.source_dir(), Path::new("/project/src"));
        assert_eq!(settings.head_a(), "plugin.js");
        assert_eq!(settings.head_b(), "sprite.js");
        assert_eq!(settings.artifact_path(), Path::new("/project/BulletHell.js"));
        assert_eq!(
            settings.demo_artifact_path(),
            Path::new("/project/demo/js/plugins/BulletHell.js")
        );
        assert_eq!(settings.archive_path(), Path::new("/project/release.zip"));
        assert_eq!(settings.doc_config(), Path::new("/project/jsdoc-conf.json"));
        assert_eq!(settings.doc_tool(), "jsdoc");
        assert_eq!(settings.doc_timeout(), Duration::from_secs(300));
        assert!(settings.docs_enabled());
        assert!(!settings.checksum_file());
    }

    #[test]
    fn tar_gz_archive_gets_double_extension() {
        let settings = builder()
            .archive_format(ArchiveFormat::TarGz)
            .build()
            .unwrap();
        assert_eq!(settings.archive_path(), Path::new("/project/release.tar.gz"));
    }

    #[test]
    fn file_values_override_defaults_and_setters_override_file() {
        let file = ConfigFile::parse(
            "artifact = \"out/Plugin.js\"\n[sources]\nextension = \".mjs\"\n[docs]\ntimeout_secs = 30\n",
            Path::new("release.toml"),
        )
        .unwrap();
        let settings = builder()
            .apply_file(file)
            .doc_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(settings.artifact_path(), Path::new("/project/out/Plugin.js"));
        assert_eq!(settings.source_extension(), "mjs");
        assert_eq!(settings.doc_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn rejects_identical_heads() {
        let err = builder()
            .sources(SourceSettings {
                head_b: "plugin.js".into(),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { name: "sources.head_b", .. }));
    }

    #[test]
    fn rejects_head_paths() {
        let err = builder()
            .sources(SourceSettings {
                head_a: "../plugin.js".into(),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { name: "sources.head_a", .. }));
    }

    #[test]
    fn rejects_escaping_bundle_artifact_path() {
        let err = builder()
            .bundle_settings(BundleSettings {
                artifact_path: PathBuf::from("../BulletHell.js"),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSetting { name: "bundle.artifact_path", .. }
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = builder().doc_timeout(Duration::ZERO).build().unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { name: "docs.timeout_secs", .. }));
    }

    #[test]
    fn rejects_artifact_inside_source_dir() {
        let err = builder()
            .artifact_path("src/BulletHell.js")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { name: "artifact", .. }));

        let err = builder()
            .artifact_path("lib/../src/./Bundle.js")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { name: "artifact", .. }));
    }

    #[test]
    fn artifact_in_source_dir_with_other_extension_is_allowed() {
        let settings = builder().artifact_path("src/BulletHell.txt").build().unwrap();
        assert_eq!(settings.artifact_path(), Path::new("/project/src/BulletHell.txt"));
    }

    #[test]
    fn rejects_archive_reaching_demo_dir_through_parent_components() {
        let err = builder()
            .bundle_settings(BundleSettings {
                archive: PathBuf::from("demo/../demo/release"),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { name: "bundle.archive", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn rejects_archive_inside_demo_dir_through_symlink() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("demo")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("demo"), dir.path().join("shortcut")).unwrap();

        let err = SettingsBuilder::new()
            .root(dir.path())
            .bundle_settings(BundleSettings {
                archive: PathBuf::from("shortcut/release"),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { name: "bundle.archive", .. }));
    }

    #[test]
    fn rejects_archive_inside_demo_dir() {
        let err = builder()
            .bundle_settings(BundleSettings {
                archive: PathBuf::from("demo/release"),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { name: "bundle.archive", .. }));
    }
}
