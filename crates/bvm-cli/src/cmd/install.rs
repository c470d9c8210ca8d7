use std::sync::Arc;

use anyhow::Result;
use bvm_core::Config;
use bvm_core::catalog::{ReleaseCatalog, VersionCatalog};
use bvm_core::patches::PatchDiscovery;
use bvm_schema::Platform;
use clap::CommandFactory;

use crate::Cli;
use crate::ops::install::{InstallRequest, Installer};
use crate::ops::{Context, ErrorKind};
use crate::ui::Output;

/// Install a release, or list installable release lines when no version is given.
pub async fn install(
    version: Option<&str>,
    platform: Option<Platform>,
    keep_archive: bool,
    quiet: bool,
) -> Result<()> {
    let config = Config::load()?;
    let client = bvm_core::http_client()?;
    let output = Arc::new(Output::new(quiet));

    let catalog = VersionCatalog::new(client.clone(), &config.catalog_url, &config.release_url);
    let patches = PatchDiscovery::new(client.clone(), &config.release_url);

    let Some(version) = version else {
        print_install_help()?;
        let lines = catalog.release_lines().await?;
        output.print_release_lines("\nAvailable Blender versions to install:", &lines);
        return Ok(());
    };

    let ctx = Context::new(config, client, output);
    let request = InstallRequest {
        version: version.to_string(),
        platform,
        keep_archive,
    };

    let mut installer = Installer::new(&ctx, &catalog, &patches);
    match installer.run(&request).await {
        Ok(outcome) => {
            tracing::info!(
                version = %outcome.version,
                platform = %outcome.platform,
                downloaded = outcome.downloaded,
                "Install complete"
            );
            Ok(())
        }
        Err(e) => {
            tracing::debug!(stage = ?installer.stage(), kind = ?e.kind(), "Install failed");
            if e.kind() == ErrorKind::InvalidVersionFormat {
                print_install_help()?;
            }
            Err(e.into())
        }
    }
}

fn print_install_help() -> Result<()> {
    let mut cli = Cli::command();
    cli.build();
    if let Some(install) = cli.find_subcommand_mut("install") {
        install.print_help()?;
    }
    Ok(())
}
