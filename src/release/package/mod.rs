//! Demo bundle packaging.
//!
//! Installs the freshly built artifact into the demo project, then snapshots
//! the whole demo tree into the release archive.
//!
//! # Module Organization
//!
//! - [`archive`] - ZIP and tar.gz writers for the demo tree

pub mod archive;

use crate::{
    bail,
    release::{
        ArchiveFormat, Result, Settings,
        error::ErrorExt,
        pipeline::checksum::{sha256_file, write_checksum_file},
        utils::fs::copy_file,
    },
};
use archive::{ArchiveStats, create_archive};
use std::path::PathBuf;

/// Result of a successful packaging run.
#[derive(Debug, Clone)]
pub struct PackageReport {
    /// Artifact location inside the demo project
    pub bundled_artifact: PathBuf,
    /// Release archive
    pub archive: PathBuf,
    /// Archive format
    pub format: ArchiveFormat,
    /// Archive member counts
    pub stats: ArchiveStats,
    /// Archive size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256 of the archive
    pub checksum: String,
    /// `sha256sum` file, when requested
    pub checksum_file: Option<PathBuf>,
}

/// Copies the artifact into the demo project, overwriting the previous copy.
///
/// # Errors
///
/// [`Error::NotFound`] when the artifact has not been built or the demo
/// directory does not exist.
pub async fn install_artifact(settings: &Settings) -> Result<PathBuf> {
    let artifact = settings.artifact_path();
    tokio::fs::metadata(&artifact)
        .await
        .fs_context("locating build artifact", &artifact)?;

    let demo_dir = settings.demo_dir();
    let is_dir = tokio::fs::metadata(&demo_dir)
        .await
        .fs_context("reading demo directory", &demo_dir)?
        .is_dir();
    if !is_dir {
        bail!("{} is not a directory", demo_dir.display());
    }

    let dest = settings.demo_artifact_path();
    log::info!("Copying {} to {}", artifact.display(), dest.display());
    copy_file(&artifact, &dest).await?;
    Ok(dest)
}

/// Installs the artifact and writes the release archive.
pub async fn package(settings: &Settings) -> Result<PackageReport> {
    let bundled_artifact = install_artifact(settings).await?;

    let archive = settings.archive_path();
    let format = settings.archive_format();
    let stats = create_archive(&settings.demo_dir(), &archive, format).await?;

    let size = tokio::fs::metadata(&archive)
        .await
        .fs_context("reading archive metadata", &archive)?
        .len();
    let checksum = sha256_file(&archive).await?;
    let checksum_file = if settings.checksum_file() {
        Some(write_checksum_file(&archive, &checksum).await?)
    } else {
        None
    };

    Ok(PackageReport {
        bundled_artifact,
        archive,
        format,
        stats,
        size,
        checksum,
        checksum_file,
    })
}
