//! Patch discovery by scraping a release line's directory listing.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use thiserror::Error;

use crate::artifact::release_line_url;

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href=['"]?([^'" >]+)"#).expect("href pattern is valid")
});

static RELEASE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"blender-(\d+)\.(\d+)\.(\d+)").expect("release file pattern is valid")
});

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Failed to fetch Blender version {major}.{minor}! (HTTP {status})")]
    ReleaseLineNotFound {
        major: u32,
        minor: u32,
        status: u16,
    },

    #[error("Failed to find Blender version {major}.{minor}!")]
    NoPatchesFound { major: u32, minor: u32 },

    #[error("Failed to fetch Blender version {major}.{minor}: {source}")]
    Http {
        major: u32,
        minor: u32,
        #[source]
        source: reqwest::Error,
    },
}

/// Source of patch numbers for a `major.minor` line.
#[async_trait]
pub trait PatchSource: Send + Sync {
    /// Every distinct patch number published for `major.minor`.
    ///
    /// Never returns an empty set; an empty listing is
    /// [`PatchError::NoPatchesFound`].
    async fn list_patches(&self, major: u32, minor: u32) -> Result<BTreeSet<u32>, PatchError>;
}

/// Scrapes `{release_url}/Blender{major}.{minor}` for archive links.
#[derive(Debug, Clone)]
pub struct PatchDiscovery {
    client: Client,
    release_url: String,
}

impl PatchDiscovery {
    pub fn new(client: Client, release_url: impl Into<String>) -> Self {
        Self {
            client,
            release_url: release_url.into(),
        }
    }
}

#[async_trait]
impl PatchSource for PatchDiscovery {
    async fn list_patches(&self, major: u32, minor: u32) -> Result<BTreeSet<u32>, PatchError> {
        let url = release_line_url(&self.release_url, major, minor);
        tracing::debug!(%url, "Scraping release directory");

        let http = |source| PatchError::Http {
            major,
            minor,
            source,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(http)?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(PatchError::ReleaseLineNotFound {
                major,
                minor,
                status: status.as_u16(),
            });
        }

        let page = response.text().await.map_err(http)?;
        let patches = scrape_patches(&page, major, minor);
        tracing::debug!(?patches, "Found patches for {major}.{minor}");

        if patches.is_empty() {
            return Err(PatchError::NoPatchesFound { major, minor });
        }
        Ok(patches)
    }
}

/// Collect the patch numbers of every `href` that names a
/// `blender-{major}.{minor}.{patch}` file.
pub fn scrape_patches(page: &str, major: u32, minor: u32) -> BTreeSet<u32> {
    HREF.captures_iter(page)
        .filter_map(|href| {
            let found = RELEASE_FILE.captures(&href[1])?;
            let same_line = found[1].parse::<u32>().ok()? == major
                && found[2].parse::<u32>().ok()? == minor;
            if same_line {
                found[3].parse::<u32>().ok()
            } else {
                None
            }
        })
        .collect()
}
