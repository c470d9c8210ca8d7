//! Version token resolution.
//!
//! Supports:
//! - Latest: `latest` (newest released `major.minor`, newest patch)
//! - Series: `4.2` (newest published patch of that line)
//! - Exact: `4.2.3` (taken as-is)

use std::str::FromStr;

use bvm_schema::{ReleaseLine, VersionTriple};
use thiserror::Error;

use crate::catalog::{CatalogError, ReleaseCatalog};
use crate::patches::{PatchError, PatchSource};

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(
        "Invalid version '{0}'. Please provide version to install in the following format: <major>.<minor>[.<patch>]"
    )]
    InvalidVersionFormat(String),

    #[error("The release catalog lists no released versions")]
    NoReleasedLines,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// A parsed user version request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionToken {
    Latest,
    Series { major: u32, minor: u32 },
    Exact(VersionTriple),
}

impl FromStr for VersionToken {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "latest" {
            return Ok(Self::Latest);
        }

        let invalid = || ResolveError::InvalidVersionFormat(s.to_string());
        let parts = s
            .split('.')
            .map(|p| {
                // u32::from_str would accept a leading '+'
                if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                p.parse::<u32>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>, _>>()?;

        match parts.as_slice() {
            [major, minor] => Ok(Self::Series {
                major: *major,
                minor: *minor,
            }),
            [major, minor, patch] => Ok(Self::Exact(VersionTriple::new(*major, *minor, *patch))),
            _ => Err(invalid()),
        }
    }
}

/// Turns version tokens into concrete triples using a catalog and a patch source.
pub struct VersionResolver<'a> {
    catalog: &'a dyn ReleaseCatalog,
    patches: &'a dyn PatchSource,
}

impl std::fmt::Debug for VersionResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionResolver").finish_non_exhaustive()
    }
}

impl<'a> VersionResolver<'a> {
    pub fn new(catalog: &'a dyn ReleaseCatalog, patches: &'a dyn PatchSource) -> Self {
        Self { catalog, patches }
    }

    /// Resolve a raw token such as `"latest"`, `"4.2"` or `"4.2.3"`.
    pub async fn resolve(&self, token: &str) -> Result<VersionTriple, ResolveError> {
        let version = match token.parse::<VersionToken>()? {
            VersionToken::Exact(version) => version,
            VersionToken::Series { major, minor } => self.complete(major, minor).await?,
            VersionToken::Latest => {
                let lines = self.catalog.release_lines().await?;
                let (major, minor) =
                    latest_released(&lines).ok_or(ResolveError::NoReleasedLines)?;
                tracing::debug!("Latest released line is {major}.{minor}");
                self.complete(major, minor).await?
            }
        };

        tracing::info!(%version, token, "Resolved version");
        Ok(version)
    }

    /// Fill in the newest published patch for `major.minor`.
    async fn complete(&self, major: u32, minor: u32) -> Result<VersionTriple, ResolveError> {
        let patches = self.patches.list_patches(major, minor).await?;
        let patch = patches
            .last()
            .copied()
            .ok_or(PatchError::NoPatchesFound { major, minor })?;
        Ok(VersionTriple::new(major, minor, patch))
    }
}

/// The numerically greatest `(major, minor)` among released lines.
pub fn latest_released(lines: &[ReleaseLine]) -> Option<(u32, u32)> {
    lines
        .iter()
        .filter(|line| line.released)
        .filter_map(ReleaseLine::major_minor)
        .max()
}
