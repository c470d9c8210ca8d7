//! Archive extraction module
//!
//! Handles the three release formats: tar.xz, zip and dmg.
//!
//! Archives are unpacked into a hidden staging directory next to the
//! destination and the top-level entries are moved into place only after
//! the whole archive has been read. A failed extraction leaves nothing
//! behind in the destination.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use bvm_schema::ArchiveFormat;
use thiserror::Error;
use xz2::read::XzDecoder;
use zip::ZipArchive;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported archive format: {0}")]
    UnsupportedFormat(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Disk image error: {0}")]
    DiskImage(String),
}

/// Extract `archive_path` into `dest_dir`, auto-detecting the format from its name.
///
/// Returns the paths of the top-level entries placed in `dest_dir`.
pub fn extract_archive(archive_path: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let name = archive_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ExtractError::Archive("Invalid archive filename".to_string()))?;
    let format = ArchiveFormat::from_filename(name)
        .ok_or_else(|| ExtractError::UnsupportedFormat(name.to_string()))?;

    fs::create_dir_all(dest_dir)?;
    let staging = tempfile::Builder::new()
        .prefix(".bvm-extract-")
        .tempdir_in(dest_dir)?;

    tracing::debug!(?format, archive = %archive_path.display(), "Extracting");
    match format {
        ArchiveFormat::TarXz => extract_tar_xz(archive_path, staging.path())?,
        ArchiveFormat::Zip => extract_zip(archive_path, staging.path())?,
        ArchiveFormat::Dmg => {
            let stem = name.trim_end_matches(".dmg");
            crate::io::dmg::copy_apps(archive_path, &staging.path().join(stem))?;
        }
    }

    let placed = promote(staging.path(), dest_dir)?;
    tracing::debug!(entries = placed.len(), dest = %dest_dir.display(), "Extraction complete");
    Ok(placed)
}

/// Extract a tar.xz archive into `dest_dir`.
pub fn extract_tar_xz(archive_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive_path)?;
    let decoder = XzDecoder::new(BufReader::new(file));
    let mut archive = tar::Archive::new(decoder);
    archive.set_preserve_permissions(true);

    for entry in archive.entries()? {
        let mut entry = entry?;

        // unpack_in refuses entries that would escape dest_dir
        if !entry.unpack_in(dest_dir)? {
            let path = entry.path()?.display().to_string();
            return Err(ExtractError::Archive(format!(
                "Invalid path in archive: {path}"
            )));
        }
    }

    Ok(())
}

/// Extract a zip archive into `dest_dir`.
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| ExtractError::Archive(e.to_string()))?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| ExtractError::Archive(e.to_string()))?;
        let Some(relative_path) = file.enclosed_name() else {
            return Err(ExtractError::Archive(format!(
                "Invalid path in archive: {}",
                file.name()
            )));
        };

        let absolute_path = dest_dir.join(&relative_path);
        if file.is_dir() {
            fs::create_dir_all(&absolute_path)?;
            continue;
        }

        if let Some(parent) = absolute_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut outfile = File::create(&absolute_path)?;
        io::copy(&mut file, &mut outfile)?;

        #[cfg(unix)]
        if let Some(mode) = file.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&absolute_path, fs::Permissions::from_mode(mode))?;
        }
    }

    Ok(())
}

/// Move every top-level entry of `staging` into `dest_dir`, replacing
/// entries of the same name.
fn promote(staging: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut placed = Vec::new();

    for entry in fs::read_dir(staging)? {
        let entry = entry?;
        let target = dest_dir.join(entry.file_name());

        match fs::symlink_metadata(&target) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(&target)?,
            Ok(_) => fs::remove_file(&target)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        fs::rename(entry.path(), &target)?;
        placed.push(target);
    }

    placed.sort();
    Ok(placed)
}
