//! Target platforms and the archive format each one ships in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from host platform detection and parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The host operating system has no published release archive.
    #[error("Unsupported host operating system '{0}'; pass --platform explicitly")]
    Unsupported(String),

    /// A platform name could not be parsed.
    #[error("Unknown platform '{0}' (expected linux, macos or windows)")]
    Unknown(String),
}

/// Target operating system for a release archive.
///
/// Each platform has exactly one archive naming convention; no per-platform
/// architecture variants are modelled.
///
/// # Example
///
/// ```
/// use bvm_schema::Platform;
///
/// assert_eq!(Platform::Linux.archive_suffix(), "x64.tar.xz");
/// assert_eq!("macos".parse::<Platform>().unwrap(), Platform::Macos);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux, shipped as an xz-compressed tarball.
    Linux,
    /// macOS, shipped as a disk image.
    Macos,
    /// Windows, shipped as a zip archive.
    Windows,
}

/// Container format of a release archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// `.tar.xz`
    TarXz,
    /// `.zip`
    Zip,
    /// `.dmg`
    Dmg,
}

impl Platform {
    /// Every supported platform, in display order.
    pub const ALL: [Self; 3] = [Self::Linux, Self::Macos, Self::Windows];

    /// Detect the platform of the running host.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unsupported`] for hosts other than Linux,
    /// macOS and Windows.
    pub fn current() -> Result<Self, PlatformError> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier as reported by `std::env::consts::OS`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unsupported`] when `os` is not one of the
    /// three supported systems.
    pub fn from_os(os: &str) -> Result<Self, PlatformError> {
        match os {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::Macos),
            "windows" => Ok(Self::Windows),
            other => Err(PlatformError::Unsupported(other.to_string())),
        }
    }

    /// Name used in archive filenames and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Macos => "macos",
            Self::Windows => "windows",
        }
    }

    /// Architecture-and-extension tail of the archive filename.
    pub fn archive_suffix(self) -> &'static str {
        match self {
            Self::Linux => "x64.tar.xz",
            Self::Macos => "arm64.dmg",
            Self::Windows => "x64.zip",
        }
    }

    /// Container format of this platform's archive.
    pub fn archive_format(self) -> ArchiveFormat {
        match self {
            Self::Linux => ArchiveFormat::TarXz,
            Self::Macos => ArchiveFormat::Dmg,
            Self::Windows => ArchiveFormat::Zip,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::Macos),
            "windows" => Ok(Self::Windows),
            _ => Err(PlatformError::Unknown(s.to_string())),
        }
    }
}

impl ArchiveFormat {
    /// Detect the format from a filename's extension.
    pub fn from_filename(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        if name.ends_with(".tar.xz") || name.ends_with(".txz") {
            Some(Self::TarXz)
        } else if name.ends_with(".zip") {
            Some(Self::Zip)
        } else if name.ends_with(".dmg") {
            Some(Self::Dmg)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_os_maps_supported_hosts() {
        assert_eq!(Platform::from_os("linux"), Ok(Platform::Linux));
        assert_eq!(Platform::from_os("macos"), Ok(Platform::Macos));
        assert_eq!(Platform::from_os("windows"), Ok(Platform::Windows));
    }

    #[test]
    fn from_os_rejects_unknown_hosts() {
        assert_eq!(
            Platform::from_os("freebsd"),
            Err(PlatformError::Unsupported("freebsd".to_string()))
        );
    }

    #[test]
    fn suffix_matches_format() {
        for platform in Platform::ALL {
            let name = format!("blender-4.2.2-{platform}-{}", platform.archive_suffix());
            assert_eq!(
                ArchiveFormat::from_filename(&name),
                Some(platform.archive_format())
            );
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Linux".parse::<Platform>(), Ok(Platform::Linux));
        assert_eq!("WINDOWS".parse::<Platform>(), Ok(Platform::Windows));
        assert!("beos".parse::<Platform>().is_err());
    }
}
