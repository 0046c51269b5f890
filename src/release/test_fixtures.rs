//! Scratch project layouts for unit tests.

use crate::release::{Settings, SettingsBuilder};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway project root with helpers for laying out modules and a demo tree.
pub(crate) struct Project {
    temp: TempDir,
}

impl Project {
    pub(crate) fn new() -> Self {
        Self {
            temp: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub(crate) fn root(&self) -> &Path {
        self.temp.path()
    }

    pub(crate) fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub(crate) fn write(&self, rel: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    pub(crate) fn read(&self, rel: &str) -> Vec<u8> {
        std::fs::read(self.path(rel)).expect("Failed to read file")
    }

    /// Writes a module into `src/`.
    pub(crate) fn module(&self, name: &str, contents: &str) -> PathBuf {
        self.write(&format!("src/{name}"), contents)
    }

    /// Lays out a small demo project with nested directories.
    pub(crate) fn demo(&self) {
        self.write("demo/index.html", "<html></html>");
        self.write("demo/js/main.js", "main");
        self.write("demo/js/plugins/BulletHell.js", "stale build");
        self.write("demo/js/plugins/bomb_gravity.js", "gravity");
        self.write("demo/data/System.json", "{}");
        std::fs::create_dir_all(self.path("demo/audio/se")).expect("Failed to create directory");
    }

    /// Writes an executable shell script usable as a documentation tool.
    #[cfg(unix)]
    pub(crate) fn script(&self, rel: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.write(rel, format!("#!/bin/sh\n{body}\n"));
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        path
    }

    pub(crate) fn builder(&self) -> SettingsBuilder {
        SettingsBuilder::new().root(self.root())
    }

    pub(crate) fn settings(&self) -> Settings {
        self.builder().build().expect("Failed to build settings")
    }
}
