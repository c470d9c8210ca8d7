//! DMG handling via hdiutil

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::extract::ExtractError;

/// A mounted disk image. Dropping it detaches the volume.
#[derive(Debug)]
pub struct MountPoint {
    pub path: PathBuf,
}

impl Drop for MountPoint {
    fn drop(&mut self) {
        if let Err(e) = detach(&self.path) {
            tracing::warn!("{e}");
        }
    }
}

/// Attach `dmg_path` read-only and return its mount point.
pub fn attach(dmg_path: &Path) -> Result<MountPoint, ExtractError> {
    if !cfg!(target_os = "macos") {
        return Err(ExtractError::DiskImage(
            "disk images can only be mounted on macOS".to_string(),
        ));
    }

    let output = Command::new("hdiutil")
        .arg("attach")
        .arg("-nobrowse")
        .arg("-readonly")
        .arg(dmg_path)
        .output()?;

    if !output.status.success() {
        return Err(ExtractError::DiskImage(format!(
            "hdiutil attach failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    // Lines look like: /dev/diskXsY <TYPE> /Volumes/<NAME>
    parse_mount_point(&String::from_utf8_lossy(&output.stdout))
        .map(|path| MountPoint { path })
        .ok_or_else(|| {
            ExtractError::DiskImage("could not find mount point in hdiutil output".to_string())
        })
}

fn parse_mount_point(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .find_map(|line| line.find("/Volumes/").map(|idx| PathBuf::from(line[idx..].trim())))
}

/// Detach a mounted volume, retrying while it is busy.
pub fn detach(mount_point: &Path) -> Result<(), ExtractError> {
    for _ in 0..3 {
        let status = Command::new("hdiutil")
            .arg("detach")
            .arg(mount_point)
            .arg("-force")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        if status.is_ok_and(|s| s.success()) {
            return Ok(());
        }
        std::thread::sleep(std::time::Duration::from_millis(500));
    }

    Err(ExtractError::DiskImage(format!(
        "failed to detach {}",
        mount_point.display()
    )))
}

/// Mount `dmg_path` and copy every `*.app` bundle on it into `dest_dir`.
pub fn copy_apps(dmg_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
    let mount = attach(dmg_path)?;
    fs::create_dir_all(dest_dir)?;

    let mut options = fs_extra::dir::CopyOptions::new();
    options.overwrite = true;

    let mut copied = 0usize;
    for entry in fs::read_dir(&mount.path)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "app") {
            tracing::debug!(app = %path.display(), "Copying app bundle");
            fs_extra::dir::copy(&path, dest_dir, &options)
                .map_err(|e| ExtractError::DiskImage(e.to_string()))?;
            copied += 1;
        }
    }

    if copied == 0 {
        return Err(ExtractError::DiskImage(format!(
            "no application bundle found in {}",
            dmg_path.display()
        )));
    }

    Ok(())
}
