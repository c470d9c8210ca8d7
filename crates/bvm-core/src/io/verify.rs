//! Checksum manifest lookup and MD5 verification.

use std::path::{Path, PathBuf};

use bvm_schema::Md5Digest;
use reqwest::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Failed to fetch checksum manifest {url}: HTTP {status}")]
    ManifestStatus { url: String, status: u16 },

    #[error("Failed to fetch checksum manifest: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Checksum manifest has no entry for {filename}")]
    MissingEntry { filename: String },

    #[error("Failed to read {path} for checksum: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of comparing a local file against its manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub expected: Md5Digest,
    pub actual: Md5Digest,
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        self.expected == self.actual
    }
}

/// Fetch the plain-text manifest at `checksum_url`.
pub async fn fetch_manifest(client: &Client, checksum_url: &str) -> Result<String, VerifyError> {
    tracing::debug!(url = %checksum_url, "Fetching checksum manifest");
    let response = client.get(checksum_url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(VerifyError::ManifestStatus {
            url: checksum_url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.text().await?)
}

/// Expected digest for `filename`: the first whitespace-delimited token of
/// the first manifest line that mentions it.
///
/// ```
/// use bvm_core::io::verify::expected_digest;
///
/// let manifest = "abc123 blender-4.2.2-linux-x64.tar.xz\n";
/// let digest = expected_digest(manifest, "blender-4.2.2-linux-x64.tar.xz").unwrap();
/// assert_eq!(digest.as_str(), "abc123");
/// ```
pub fn expected_digest(manifest: &str, filename: &str) -> Option<Md5Digest> {
    manifest
        .lines()
        .find(|line| line.contains(filename))
        .and_then(|line| line.split_whitespace().next())
        .map(Md5Digest::from)
}

/// MD5 of the file at `path`, computed off the async runtime.
pub async fn file_digest(path: &Path) -> Result<Md5Digest, VerifyError> {
    let owned = path.to_path_buf();
    tokio::task::spawn_blocking(move || Md5Digest::compute_file(&owned))
        .await
        .map_err(std::io::Error::other)
        .and_then(|r| r)
        .map_err(|source| VerifyError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Fetch the manifest, look up `filename` and hash the local file at `path`.
pub async fn verify(
    client: &Client,
    checksum_url: &str,
    path: &Path,
    filename: &str,
) -> Result<Verification, VerifyError> {
    let manifest = fetch_manifest(client, checksum_url).await?;
    let expected = expected_digest(&manifest, filename).ok_or_else(|| VerifyError::MissingEntry {
        filename: filename.to_string(),
    })?;
    let actual = file_digest(path).await?;

    tracing::debug!(%expected, %actual, filename, "Compared checksums");
    Ok(Verification { expected, actual })
}
