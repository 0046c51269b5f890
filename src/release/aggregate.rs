//! Module aggregation.
//!
//! Concatenates the plugin's source modules into one distributable file:
//! head-A, then head-B, then every other module sorted by file name. Each
//! module is followed by [`MODULE_SEPARATOR`], the last one included.

use crate::{
    bail,
    release::{
        Result, Settings,
        error::{Error, ErrorExt},
        pipeline::checksum::sha256_bytes,
        utils::fs::write_atomic,
    },
};
use std::path::PathBuf;

/// Written after every module's content.
pub const MODULE_SEPARATOR: &[u8] = b"\r\n\r\n";

/// A module scheduled for concatenation, content not yet loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedModule {
    /// File name inside the source directory
    pub name: String,
    /// Full path
    pub path: PathBuf,
    /// Position in the artifact, starting at 0
    pub rank: usize,
}

/// A module with its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceModule {
    /// File name inside the source directory
    pub name: String,
    /// Full path
    pub path: PathBuf,
    /// Position in the artifact, starting at 0
    pub rank: usize,
    /// Raw file content
    pub content: Vec<u8>,
}

/// Result of a successful aggregation.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    /// Where the artifact was written
    pub artifact: PathBuf,
    /// Module file names in the order they were written
    pub modules: Vec<String>,
    /// Artifact size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256 of the artifact
    pub checksum: String,
}

/// Determines which modules go into the artifact and in what order.
///
/// Only regular files directly inside the source directory whose name ends in
/// the module extension are considered. Everything else, subdirectories
/// included, is skipped.
///
/// # Errors
///
/// [`Error::NotFound`] when the source directory or either head module is
/// missing.
pub async fn plan_modules(settings: &Settings) -> Result<Vec<PlannedModule>> {
    let source_dir = settings.source_dir();
    let metadata = tokio::fs::metadata(&source_dir)
        .await
        .fs_context("reading source directory", &source_dir)?;
    if !metadata.is_dir() {
        bail!("source path {} is not a directory", source_dir.display());
    }

    let heads = [settings.head_a(), settings.head_b()];
    for head in heads {
        let path = source_dir.join(head);
        let is_file = tokio::fs::metadata(&path)
            .await
            .fs_context("locating head module", &path)?
            .is_file();
        if !is_file {
            return Err(Error::not_found("locating head module", &path));
        }
    }

    let mut others = Vec::new();
    let mut entries = tokio::fs::read_dir(&source_dir)
        .await
        .fs_context("listing source directory", &source_dir)?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("listing source directory", &source_dir)?
    {
        let Ok(name) = entry.file_name().into_string() else {
            log::warn!("Skipping non UTF-8 file name: {}", entry.path().display());
            continue;
        };
        if settings.sources().is_head(&name) || !settings.sources().is_module_name(&name) {
            continue;
        }
        // Follows symlinks, so linked modules count as files.
        let path = entry.path();
        let is_file = tokio::fs::metadata(&path)
            .await
            .fs_context("inspecting module", &path)?
            .is_file();
        if !is_file {
            log::debug!("Skipping non-file entry: {}", path.display());
            continue;
        }
        others.push(name);
    }
    others.sort();

    let plan = heads
        .into_iter()
        .map(str::to_string)
        .chain(others)
        .enumerate()
        .map(|(rank, name)| PlannedModule {
            path: source_dir.join(&name),
            name,
            rank,
        })
        .collect();
    Ok(plan)
}

/// Plans the modules and reads their content.
pub async fn collect_modules(settings: &Settings) -> Result<Vec<SourceModule>> {
    let plan = plan_modules(settings).await?;
    let mut modules = Vec::with_capacity(plan.len());
    for planned in plan {
        let content = tokio::fs::read(&planned.path)
            .await
            .fs_context("reading module", &planned.path)?;
        log::debug!(
            "Module #{} {} ({} bytes)",
            planned.rank,
            planned.name,
            content.len()
        );
        modules.push(SourceModule {
            name: planned.name,
            path: planned.path,
            rank: planned.rank,
            content,
        });
    }
    Ok(modules)
}

/// Concatenates modules, each followed by [`MODULE_SEPARATOR`].
pub fn render_artifact(modules: &[SourceModule]) -> Vec<u8> {
    let capacity = modules
        .iter()
        .map(|m| m.content.len() + MODULE_SEPARATOR.len())
        .sum();
    let mut artifact = Vec::with_capacity(capacity);
    for module in modules {
        artifact.extend_from_slice(&module.content);
        artifact.extend_from_slice(MODULE_SEPARATOR);
    }
    artifact
}

/// Builds the artifact and writes it to [`Settings::artifact_path`].
///
/// All inputs are read before the output is touched, and the output is
/// replaced atomically, so a failure leaves any previous artifact intact.
pub async fn aggregate(settings: &Settings) -> Result<AggregateReport> {
    let modules = collect_modules(settings).await?;
    let artifact = render_artifact(&modules);
    let path = settings.artifact_path();

    log::info!(
        "Writing {} modules to {}",
        modules.len(),
        path.display()
    );

    let checksum = sha256_bytes(&artifact);
    let size = artifact.len() as u64;
    write_atomic(&path, artifact).await?;

    Ok(AggregateReport {
        artifact: path,
        modules: modules.into_iter().map(|m| m.name).collect(),
        size,
        checksum,
    })
}

/// Splits an artifact back into module contents. Used to check output shape.
#[cfg(test)]
pub(crate) fn split_artifact(artifact: &[u8]) -> Vec<&[u8]> {
    let mut segments = Vec::new();
    let mut rest = artifact;
    while let Some(pos) = rest
        .windows(MODULE_SEPARATOR.len())
        .position(|w| w == MODULE_SEPARATOR)
    {
        segments.push(&rest[..pos]);
        rest = &rest[pos + MODULE_SEPARATOR.len()..];
    }
    assert!(rest.is_empty(), "artifact must end with the separator");
    segments
}
