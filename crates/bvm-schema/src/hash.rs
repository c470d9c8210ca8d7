//! MD5 digests for release archives and checksum manifests.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Newtype for an MD5 digest as published in release checksum manifests.
///
/// The value is stored exactly as given. Comparison is case-sensitive, so a
/// manifest entry must use the same lowercase hex that [`Md5Digest::compute`]
/// produces.
///
/// # Example
///
/// ```
/// use bvm_schema::Md5Digest;
///
/// let digest = Md5Digest::compute(b"hello world");
/// assert_eq!(digest.as_str(), "5eb63bbbe01eeed093cb22bb8f5acdc3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Md5Digest(String);

impl Md5Digest {
    /// Wrap a hex string without validation (manifest data).
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Compute the digest of an in-memory buffer.
    pub fn compute(data: &[u8]) -> Self {
        Self(format!("{:x}", md5::compute(data)))
    }

    /// Compute the digest of everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while reading.
    pub fn compute_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut context = md5::Context::new();
        let mut buffer = [0u8; 64 * 1024];
        loop {
            let count = reader.read(&mut buffer)?;
            if count == 0 {
                break;
            }
            context.consume(&buffer[..count]);
        }
        Ok(Self(format!("{:x}", context.compute())))
    }

    /// Compute the digest of a file, streaming it from disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened or read.
    pub fn compute_file(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::compute_reader(std::io::BufReader::new(file))
    }

    /// Return the inner hex string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Md5Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Md5Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Md5Digest {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_and_buffer_agree() {
        let data = vec![7u8; 200 * 1024];
        let from_reader = Md5Digest::compute_reader(data.as_slice()).unwrap();
        assert_eq!(from_reader, Md5Digest::compute(&data));
    }

    #[test]
    fn file_digest_matches_known_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");
        std::fs::write(&path, b"").unwrap();
        assert_eq!(
            Md5Digest::compute_file(&path).unwrap().as_str(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let lower = Md5Digest::compute(b"abc");
        let upper = Md5Digest::new(lower.as_str().to_uppercase());
        assert_ne!(lower, upper);
    }
}
