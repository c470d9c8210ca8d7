//! Release installation.
//!
//! [`Installer`] runs one install request through a fixed sequence of
//! stages:
//!
//! ```text
//! ResolvingVersion → LocatingArtifact → Downloading | SkippingDownload
//!   → Verifying → Extracting → RemovingArchive | KeepingArchive → Done
//! ```
//!
//! Any failure ends the run in the stage it happened in. Nothing is
//! recorded between runs: a second run starts over at `ResolvingVersion` and
//! relies on the archive already being present in the source directory to
//! skip the download.

use std::path::{Path, PathBuf};

use bvm_core::artifact::ArtifactDescriptor;
use bvm_core::catalog::ReleaseCatalog;
use bvm_core::io::{download, extract, verify};
use bvm_core::patches::PatchSource;
use bvm_core::resolver::VersionResolver;
use bvm_schema::{Platform, VersionTriple};

use crate::ops::{Context, InstallError};

/// Where an install run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStage {
    ResolvingVersion,
    LocatingArtifact,
    Downloading,
    SkippingDownload,
    Verifying,
    Extracting,
    RemovingArchive,
    KeepingArchive,
    Done,
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// `latest`, `X.Y` or `X.Y.Z`
    pub version: String,
    /// Target platform; falls back to the configured default, then the host.
    pub platform: Option<Platform>,
    pub keep_archive: bool,
}

/// A verified, extracted installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub version: VersionTriple,
    pub platform: Platform,
    pub artifact: ArtifactDescriptor,
    /// Archive location in the source directory (removed unless kept).
    pub archive: PathBuf,
    /// `false` when an archive already present was reused.
    pub downloaded: bool,
    /// Top-level entries placed in the source directory.
    pub extracted: Vec<PathBuf>,
}

/// Runs the install pipeline against a catalog and a patch source.
pub struct Installer<'a> {
    ctx: &'a Context,
    resolver: VersionResolver<'a>,
    stage: InstallStage,
}

impl std::fmt::Debug for Installer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}

impl<'a> Installer<'a> {
    pub fn new(
        ctx: &'a Context,
        catalog: &'a dyn ReleaseCatalog,
        patches: &'a dyn PatchSource,
    ) -> Self {
        Self {
            ctx,
            resolver: VersionResolver::new(catalog, patches),
            stage: InstallStage::ResolvingVersion,
        }
    }

    /// The stage the last run reached (or failed in).
    pub fn stage(&self) -> InstallStage {
        self.stage
    }

    fn enter(&mut self, stage: InstallStage) {
        tracing::debug!(from = ?self.stage, to = ?stage, "Install stage");
        self.stage = stage;
    }

    pub async fn run(&mut self, request: &InstallRequest) -> Result<InstallOutcome, InstallError> {
        let ctx = self.ctx;
        let config = &ctx.config;
        let reporter = &ctx.reporter;

        self.enter(InstallStage::ResolvingVersion);
        let version = self.resolver.resolve(&request.version).await?;

        self.enter(InstallStage::LocatingArtifact);
        let platform = request
            .platform
            .or(config.default_platform)
            .map_or_else(Platform::current, Ok)?;
        let artifact = ArtifactDescriptor::locate(&config.release_url, version, platform);
        let archive = config.source_dir.join(&artifact.filename);
        tracing::info!(url = %artifact.download_url, archive = %archive.display(), "Located artifact");

        let downloaded = if tokio::fs::try_exists(&archive).await? {
            self.enter(InstallStage::SkippingDownload);
            reporter.success(&format!(
                "Blender {version} for {platform} already downloaded!"
            ));
            false
        } else {
            self.enter(InstallStage::Downloading);
            reporter.stage(&format!("Downloading Blender {version} for {platform}..."));
            download::download(
                &ctx.client,
                &artifact.download_url,
                &archive,
                &**reporter,
            )
            .await?;
            reporter.success(&format!(
                "Blender {version} for {platform} successfully downloaded!"
            ));
            true
        };

        self.enter(InstallStage::Verifying);
        reporter.stage("Validating checksum...");
        let verification = match verify::verify(
            &ctx.client,
            &artifact.checksum_url,
            &archive,
            &artifact.filename,
        )
        .await
        {
            Ok(verification) => verification,
            Err(e) => {
                self.discard_failed_archive(&archive).await;
                return Err(e.into());
            }
        };
        if !verification.is_valid() {
            self.discard_failed_archive(&archive).await;
            return Err(InstallError::ChecksumMismatch {
                expected: verification.expected,
                actual: verification.actual,
            });
        }
        reporter.success("Checksum valid!");

        self.enter(InstallStage::Extracting);
        reporter.stage("Extracting Blender archive...");
        let extracted = match extract_into(&archive, &config.source_dir).await {
            Ok(extracted) => extracted,
            Err(source) => {
                self.discard_failed_archive(&archive).await;
                return Err(InstallError::Extraction {
                    archive: archive.clone(),
                    source,
                });
            }
        };
        reporter.success("Blender archive extracted!");

        if request.keep_archive {
            self.enter(InstallStage::KeepingArchive);
            reporter.info(&format!("Keeping downloaded archive at {}", archive.display()));
        } else {
            self.enter(InstallStage::RemovingArchive);
            reporter.stage("Removing downloaded archive...");
            tokio::fs::remove_file(&archive).await?;
            reporter.success("Downloaded archive removed!");
        }

        self.enter(InstallStage::Done);
        Ok(InstallOutcome {
            version,
            platform,
            artifact,
            archive,
            downloaded,
            extracted,
        })
    }

    /// Apply the configured failure policy to an archive that did not verify
    /// or extract.
    async fn discard_failed_archive(&self, archive: &Path) {
        if !self.ctx.config.cleanup_on_failure {
            tracing::info!(archive = %archive.display(), "Leaving archive in place for inspection");
            return;
        }

        match tokio::fs::remove_file(archive).await {
            Ok(()) => self
                .ctx
                .reporter
                .warning(&format!("Removed {}", archive.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(archive = %archive.display(), "Failed to remove archive: {e}"),
        }
    }
}

async fn extract_into(archive: &Path, dest: &Path) -> Result<Vec<PathBuf>, extract::ExtractError> {
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || extract::extract_archive(&archive, &dest))
        .await
        .map_err(|e| extract::ExtractError::Io(std::io::Error::other(e)))?
}
