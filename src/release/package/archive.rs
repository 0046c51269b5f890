//! Release archive creation.
//!
//! Walks the demo tree in file-name order and writes every directory and
//! file into a ZIP or gzip-compressed tarball, with paths relative to the
//! tree root. The archive is staged next to its destination and renamed
//! into place once complete.

use crate::{
    bail,
    release::{
        ArchiveFormat, Result,
        error::{Context, Error, ErrorExt},
        utils::fs::{commit, run_blocking, staging_file},
    },
};
use std::{
    fs::File,
    io::{self, Seek, Write},
    path::{Path, PathBuf},
};
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// What went into an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveStats {
    /// Regular files written
    pub files: usize,
    /// Directories written
    pub directories: usize,
}

/// Serializes the directory tree under `source` into an archive at `dest`.
///
/// Symlinks are followed, so the archive contains their targets' content.
///
/// # Errors
///
/// [`Error::NotFound`] if `source` does not exist, a generic error if it is
/// not a directory, and IO or ZIP errors from writing.
pub async fn create_archive(
    source: &Path,
    dest: &Path,
    format: ArchiveFormat,
) -> Result<ArchiveStats> {
    let metadata = tokio::fs::metadata(source)
        .await
        .fs_context("reading demo directory", source)?;
    if !metadata.is_dir() {
        bail!("{} is not a directory", source.display());
    }

    let source = source.to_path_buf();
    let dest = dest.to_path_buf();
    run_blocking("archive", move || {
        let mut staged = staging_file(&dest)?;
        let stats = match format {
            ArchiveFormat::Zip => write_zip(&source, staged.as_file_mut())?,
            ArchiveFormat::TarGz => write_tar_gz(&source, staged.as_file_mut())?,
        };
        commit(staged, &dest)?;
        log::info!(
            "Archived {} files and {} directories into {}",
            stats.files,
            stats.directories,
            dest.display()
        );
        Ok(stats)
    })
    .await
}

/// One archive member: its path on disk and its name inside the archive.
struct Member {
    path: PathBuf,
    name: String,
    is_dir: bool,
    mode: u32,
}

#[cfg(unix)]
fn unix_mode(metadata: &std::fs::Metadata, _is_dir: bool) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn unix_mode(_metadata: &std::fs::Metadata, is_dir: bool) -> u32 {
    if is_dir { 0o755 } else { 0o644 }
}

fn members(source: &Path) -> impl Iterator<Item = Result<Member>> + '_ {
    WalkDir::new(source)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .map(move |entry| -> Result<Member> {
            let entry = entry?;
            let rel = entry.path().strip_prefix(source)?;
            let name = rel
                .components()
                .map(|c| c.as_os_str().to_str())
                .collect::<Option<Vec<_>>>()
                .context(format!("{} is not valid UTF-8", rel.display()))?
                .join("/");
            let is_dir = entry.file_type().is_dir();
            let mode = unix_mode(&entry.metadata()?, is_dir);
            Ok(Member {
                path: entry.path().to_path_buf(),
                name,
                is_dir,
                mode,
            })
        })
}

fn write_zip<W: Write + Seek>(source: &Path, writer: W) -> Result<ArchiveStats> {
    let mut zip = ZipWriter::new(writer);
    let file_options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut stats = ArchiveStats {
        files: 0,
        directories: 0,
    };

    for member in members(source) {
        let member = member?;
        if member.is_dir {
            zip.add_directory(
                format!("{}/", member.name),
                SimpleFileOptions::default().unix_permissions(member.mode),
            )?;
            stats.directories += 1;
        } else {
            log::debug!("Adding {}", member.name);
            zip.start_file(
                member.name.as_str(),
                file_options.unix_permissions(member.mode),
            )?;
            let mut file = File::open(&member.path).fs_context("opening file to archive", &member.path)?;
            io::copy(&mut file, &mut zip).fs_context("archiving file", &member.path)?;
            stats.files += 1;
        }
    }

    zip.finish()?;
    Ok(stats)
}

fn write_tar_gz<W: Write>(source: &Path, writer: W) -> Result<ArchiveStats> {
    let encoder = flate2::write::GzEncoder::new(writer, flate2::Compression::default());
    let mut tar = tar::Builder::new(encoder);
    tar.follow_symlinks(true);
    let mut stats = ArchiveStats {
        files: 0,
        directories: 0,
    };

    for member in members(source) {
        let member = member?;
        if member.is_dir {
            tar.append_dir(&member.name, &member.path)
                .fs_context("archiving directory", &member.path)?;
            stats.directories += 1;
        } else {
            log::debug!("Adding {}", member.name);
            tar.append_path_with_name(&member.path, &member.name)
                .fs_context("archiving file", &member.path)?;
            stats.files += 1;
        }
    }

    let encoder = tar.into_inner().map_err(Error::IoError)?;
    encoder.finish().map_err(Error::IoError)?;
    Ok(stats)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::test_fixtures::Project;

    #[tokio::test]
    async fn zip_reproduces_tree() {
        let project = Project::new();
        project.demo();
        let dest = project.path("release.zip");

        let stats = create_archive(&project.path("demo"), &dest, ArchiveFormat::Zip)
            .await
            .unwrap();

        assert_eq!(extract::zip(&dest), extract::tree(&project.path("demo")));
        assert_eq!(stats.files, 5);
        assert_eq!(stats.directories, 5);
    }

    #[tokio::test]
    async fn tar_gz_reproduces_tree() {
        let project = Project::new();
        project.demo();
        let dest = project.path("release.tar.gz");

        create_archive(&project.path("demo"), &dest, ArchiveFormat::TarGz)
            .await
            .unwrap();

        assert_eq!(extract::tar_gz(&dest), extract::tree(&project.path("demo")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn both_formats_keep_file_modes() {
        use std::os::unix::fs::PermissionsExt;

        let project = Project::new();
        project.demo();
        let script = project.write("demo/tools/launch.sh", "#!/bin/sh\n");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        let zip_dest = project.path("release.zip");
        let tar_dest = project.path("release.tar.gz");

        create_archive(&project.path("demo"), &zip_dest, ArchiveFormat::Zip)
            .await
            .unwrap();
        create_archive(&project.path("demo"), &tar_dest, ArchiveFormat::TarGz)
            .await
            .unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&zip_dest).unwrap()).unwrap();
        let zip_mode = |zip: &mut zip::ZipArchive<File>, name: &str| {
            zip.by_name(name).unwrap().unix_mode().unwrap() & 0o777
        };
        assert_eq!(zip_mode(&mut zip, "tools/launch.sh"), 0o755);
        let html_mode = std::fs::metadata(project.path("demo/index.html"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(zip_mode(&mut zip, "index.html"), html_mode & 0o777);

        let decoder = flate2::read::GzDecoder::new(File::open(&tar_dest).unwrap());
        let mut tar = tar::Archive::new(decoder);
        let tar_mode = tar
            .entries()
            .unwrap()
            .map(|e| e.unwrap())
            .find(|e| e.path().unwrap().ends_with("tools/launch.sh"))
            .map(|e| e.header().mode().unwrap() & 0o777);
        assert_eq!(tar_mode, Some(0o755));
    }

    #[tokio::test]
    async fn overwrites_existing_archive() {
        let project = Project::new();
        project.demo();
        let dest = project.write("release.zip", "not a zip");

        create_archive(&project.path("demo"), &dest, ArchiveFormat::Zip)
            .await
            .unwrap();

        assert!(extract::zip(&dest).contains_key("index.html"));
    }

    #[tokio::test]
    async fn missing_source_is_not_found() {
        let project = Project::new();
        let dest = project.path("release.zip");

        let err = create_archive(&project.path("demo"), &dest, ArchiveFormat::Zip)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn file_source_is_rejected() {
        let project = Project::new();
        let source = project.write("demo", "a file, not a tree");

        let err = create_archive(&source, &project.path("release.zip"), ArchiveFormat::Zip)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::GenericError(_)));
    }
}
