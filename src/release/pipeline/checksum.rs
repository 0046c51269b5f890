//! Artifact checksum calculation.
//!
//! SHA-256 digests for the concatenated artifact and the release archive,
//! plus the optional `sha256sum`-compatible sidecar file.

use crate::release::{
    Result,
    error::{Context, ErrorExt},
    utils::fs::write_atomic,
};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Hex-encoded SHA-256 of an in-memory buffer.
pub fn sha256_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Calculates the SHA-256 of a file, reading it in 8KB chunks.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the file cannot be read
pub async fn sha256_file(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Writes `<file>.sha256` next to `file` in `sha256sum` format.
pub async fn write_checksum_file(file: &Path, checksum: &str) -> Result<PathBuf> {
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .context(format!("{} has no UTF-8 file name", file.display()))?;

    let mut sidecar = file.as_os_str().to_os_string();
    sidecar.push(".sha256");
    let sidecar = PathBuf::from(sidecar);

    write_atomic(&sidecar, format!("{checksum}  {file_name}\n").into_bytes()).await?;
    Ok(sidecar)
}
