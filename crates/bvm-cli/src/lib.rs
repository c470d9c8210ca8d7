//! bvm - Blender Version Manager
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
//!
//! Installs official Blender releases side by side under `~/.bvm/source`.
//!
//! # Pipeline
//!
//! `install` runs one release through a fixed sequence of stages:
//! resolve the version token, locate the platform archive, download it
//! (skipped when the archive is already present), verify its MD5 against the
//! published manifest, extract it, then remove the archive unless
//! `--keep-archive` was given. See [`ops::install::Installer`].
//!
//! # Directory Layout
//!
//! ```text
//! ~/.bvm/
//! ├── config.toml   # Optional settings
//! └── source/       # Archives and extracted releases, side by side
//! ```

pub mod cmd;
pub mod ops;
pub mod ui;

use bvm_schema::Platform;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "bvm")]
#[command(author, version, about = "Version management CLI for Blender")]
pub struct Cli {
    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all available Blender versions
    List,
    /// Install a Blender version
    Install {
        /// The version to install: latest, <major>.<minor> or <major>.<minor>.<patch>
        version: Option<String>,
        /// The platform to install Blender for
        #[arg(long, value_enum)]
        platform: Option<PlatformArg>,
        /// Keep the downloaded archive
        #[arg(long)]
        keep_archive: bool,
    },
}

/// Platform choices accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Linux,
    Macos,
    Windows,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Linux => Self::Linux,
            PlatformArg::Macos => Self::Macos,
            PlatformArg::Windows => Self::Windows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn install_flags_parse() {
        let cli = Cli::parse_from(["bvm", "install", "4.2", "--platform", "macos", "--keep-archive"]);
        match cli.command {
            Some(Commands::Install {
                version,
                platform,
                keep_archive,
            }) => {
                assert_eq!(version.as_deref(), Some("4.2"));
                assert_eq!(platform.map(Platform::from), Some(Platform::Macos));
                assert!(keep_archive);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn install_version_is_optional() {
        let cli = Cli::parse_from(["bvm", "install"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Install { version: None, .. })
        ));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        assert!(Cli::try_parse_from(["bvm", "install", "4.2", "--platform", "beos"]).is_err());
    }
}
