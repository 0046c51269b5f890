//! Common test utilities for CLI integration tests

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch plugin project laid out like the real one
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a project with the three-module source tree and a demo
    pub fn with_sources() -> Self {
        let project = Self::new();
        project.write_file("src/plugin.js", "A");
        project.write_file("src/sprite.js", "B");
        project.write_file("src/extra.js", "C");
        project.write_file("src/README.md", "not a module");
        project.write_file("demo/index.html", "<html></html>");
        project.write_file("demo/js/plugins/BulletHell.js", "stale");
        project.write_file("demo/js/plugins/teleport.js", "teleport");
        project.write_file("demo/data/Map001.json", "{}");
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write an executable shell script, for standing in as the doc tool
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn write_script(&self, path: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = self.write_file(path, &format!("#!/bin/sh\n{body}\n"));
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        script
    }

    /// Binary under test, rooted at this project
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("plugin_release").expect("binary should build");
        cmd.current_dir(&self.path).env_remove("RUST_LOG");
        cmd
    }
}

/// Lists a ZIP archive as sorted (name, content) pairs, directories excluded
#[allow(dead_code)]
pub fn zip_files(path: &Path) -> Vec<(String, String)> {
    use std::io::Read;

    let file = std::fs::File::open(path).expect("Failed to open archive");
    let mut archive = zip::ZipArchive::new(file).expect("Failed to read archive");
    let mut files = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).expect("Failed to read entry");
        if entry.is_dir() {
            continue;
        }
        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .expect("Failed to read entry content");
        files.push((entry.name().to_string(), content));
    }
    files.sort();
    files
}

/// Lists a tar.gz archive as sorted (name, content) pairs, directories excluded
#[allow(dead_code)]
pub fn tar_gz_files(path: &Path) -> Vec<(String, String)> {
    use std::io::Read;

    let file = std::fs::File::open(path).expect("Failed to open archive");
    let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(file));
    let mut files = Vec::new();
    for entry in archive.entries().expect("Failed to read archive") {
        let mut entry = entry.expect("Failed to read entry");
        if entry.header().entry_type().is_dir() {
            continue;
        }
        let name = entry
            .path()
            .expect("Entry path")
            .to_string_lossy()
            .into_owned();
        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .expect("Failed to read entry content");
        files.push((name, content));
    }
    files.sort();
    files
}
