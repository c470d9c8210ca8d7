//! bvm - Blender Version Manager CLI

use std::process::ExitCode;

use bvm_cli::cmd;
use bvm_cli::ui::Output;
use bvm_cli::{Cli, Commands};
use bvm_core::Reporter;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let quiet = cli.quiet;

    let result = match cli.command {
        Some(Commands::List) => cmd::list::list(),
        Some(Commands::Install {
            version,
            platform,
            keep_archive,
        }) => {
            cmd::install::install(
                version.as_deref(),
                platform.map(Into::into),
                keep_archive,
                quiet,
            )
            .await
        }
        None => Cli::command().print_help().map_err(Into::into),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::new(quiet).error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
