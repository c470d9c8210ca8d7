//! Domain-specific errors for install operations

use std::path::PathBuf;

use bvm_core::io::download::DownloadError;
use bvm_core::io::extract::ExtractError;
use bvm_core::io::verify::VerifyError;
use bvm_core::patches::PatchError;
use bvm_core::resolver::ResolveError;
use bvm_schema::{Md5Digest, PlatformError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error("Checksum invalid! (expected {expected}, got {actual})")]
    ChecksumMismatch {
        expected: Md5Digest,
        actual: Md5Digest,
    },

    #[error("Failed to extract {}: {source}", archive.display())]
    Extraction {
        archive: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The user-facing failure categories a run can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidVersionFormat,
    CatalogUnavailable,
    ReleaseLineNotFound,
    NoPatchesFound,
    UnsupportedPlatform,
    DownloadFailed,
    ChecksumFetchFailed,
    ChecksumMismatch,
    ExtractionFailed,
    Io,
}

impl InstallError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Platform(_) => ErrorKind::UnsupportedPlatform,
            Self::Resolve(e) => match e {
                ResolveError::InvalidVersionFormat(_) => ErrorKind::InvalidVersionFormat,
                ResolveError::NoReleasedLines | ResolveError::Catalog(_) => {
                    ErrorKind::CatalogUnavailable
                }
                ResolveError::Patch(PatchError::NoPatchesFound { .. }) => ErrorKind::NoPatchesFound,
                ResolveError::Patch(_) => ErrorKind::ReleaseLineNotFound,
            },
            Self::Download(_) => ErrorKind::DownloadFailed,
            Self::Verify(VerifyError::Io { .. }) | Self::Io(_) => ErrorKind::Io,
            Self::Verify(_) => ErrorKind::ChecksumFetchFailed,
            Self::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
            Self::Extraction { .. } => ErrorKind::ExtractionFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_follow_source_component() {
        let err: InstallError = ResolveError::InvalidVersionFormat("4".into()).into();
        assert_eq!(err.kind(), ErrorKind::InvalidVersionFormat);

        let err: InstallError = ResolveError::Patch(PatchError::NoPatchesFound {
            major: 4,
            minor: 2,
        })
        .into();
        assert_eq!(err.kind(), ErrorKind::NoPatchesFound);

        let err: InstallError = ResolveError::Patch(PatchError::ReleaseLineNotFound {
            major: 9,
            minor: 9,
            status: 404,
        })
        .into();
        assert_eq!(err.kind(), ErrorKind::ReleaseLineNotFound);

        let err: InstallError = VerifyError::MissingEntry {
            filename: "blender-4.2.2-linux-x64.tar.xz".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::ChecksumFetchFailed);

        let err: InstallError = PlatformError::Unsupported("plan9".into()).into();
        assert_eq!(err.kind(), ErrorKind::UnsupportedPlatform);
    }

    #[test]
    fn test_mismatch_message_names_both_digests() {
        let err = InstallError::ChecksumMismatch {
            expected: Md5Digest::new("aaa"),
            actual: Md5Digest::new("bbb"),
        };
        assert_eq!(err.to_string(), "Checksum invalid! (expected aaa, got bbb)");
        assert_eq!(err.kind(), ErrorKind::ChecksumMismatch);
    }
}
