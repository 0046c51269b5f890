//! File system utilities for release outputs.
//!
//! Outputs are staged in a temporary file next to their destination and
//! renamed into place, so a failed run never leaves a half-written artifact,
//! bundle copy or archive behind.

use crate::{
    bail,
    release::error::{Error, ErrorExt, Result},
};
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// Creates a temporary file in the destination's directory, creating that
/// directory first if needed.
pub fn staging_file(to: &Path) -> Result<NamedTempFile> {
    let dir = to
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).fs_context("creating output directory", dir)?;
    NamedTempFile::new_in(dir).fs_context("creating staging file", dir)
}

/// Flushes a staged file and renames it over `to`.
pub fn commit(staged: NamedTempFile, to: &Path) -> Result<()> {
    staged
        .as_file()
        .sync_all()
        .fs_context("flushing staged output", to)?;
    staged.persist(to).map_err(|e| Error::Io {
        context: "moving staged output into place".into(),
        path: to.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

/// Writes `contents` to `to`, replacing any existing file atomically.
pub async fn write_atomic(to: &Path, contents: Vec<u8>) -> Result<()> {
    let to = to.to_path_buf();
    run_blocking("atomic write", move || {
        let mut staged = staging_file(&to)?;
        staged
            .write_all(&contents)
            .fs_context("writing output", &to)?;
        commit(staged, &to)
    })
    .await
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination and replacing it atomically.
///
/// Fails with [`Error::NotFound`] if the source does not exist, and with a
/// generic error if it is not a file.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let metadata = tokio::fs::metadata(from)
        .await
        .fs_context("locating file to copy", from)?;
    if !metadata.is_file() {
        bail!("{} is not a file", from.display());
    }

    let from: PathBuf = from.to_path_buf();
    let to: PathBuf = to.to_path_buf();
    run_blocking("file copy", move || {
        let staged = staging_file(&to)?;
        std::fs::copy(&from, staged.path()).fs_context("copying file", &from)?;
        commit(staged, &to)
    })
    .await
}

/// Runs blocking filesystem work on the blocking thread pool.
pub async fn run_blocking<T, F>(what: &str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::GenericError(format!("{what} task panicked: {e}")))?
}
