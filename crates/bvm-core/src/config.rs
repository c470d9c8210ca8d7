//! Installation settings.
//!
//! A [`Config`] is built once per invocation and handed to every component;
//! nothing reads paths or URLs from global state.

use std::path::{Path, PathBuf};

use bvm_schema::Platform;
use serde::Deserialize;
use thiserror::Error;

/// Default release server root.
pub const DEFAULT_RELEASE_URL: &str = "https://download.blender.org/release";

/// Default milestone catalog endpoint.
pub const DEFAULT_CATALOG_URL: &str =
    "https://projects.blender.org/api/v1/repos/blender/blender/milestones";

/// Name of the optional settings file inside the bvm home.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory. Set BVM_HOME to override.")]
    NoHome,

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of everything bvm manages (`~/.bvm`).
    pub home: PathBuf,
    /// Where archives are downloaded and extracted, side by side.
    pub source_dir: PathBuf,
    /// Release server root; release lines live at `{release_url}/Blender{major}.{minor}`.
    pub release_url: String,
    /// Milestone catalog endpoint.
    pub catalog_url: String,
    /// Platform used when `--platform` is not given. `None` means detect the host.
    pub default_platform: Option<Platform>,
    /// Remove the downloaded archive when verification or extraction fails.
    pub cleanup_on_failure: bool,
}

/// On-disk overrides from `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    source_dir: Option<PathBuf>,
    release_url: Option<String>,
    catalog_url: Option<String>,
    platform: Option<Platform>,
    cleanup_on_failure: Option<bool>,
}

impl Config {
    /// Settings rooted at `home` with every other value at its default.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            source_dir: home.join("source"),
            home,
            release_url: DEFAULT_RELEASE_URL.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            default_platform: None,
            cleanup_on_failure: false,
        }
    }

    /// Load settings from the process environment and `~/.bvm/config.toml`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load settings using `env` for variable lookup.
    ///
    /// Precedence is environment, then config file, then defaults.
    pub fn load_with<F>(env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = env("BVM_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".bvm")))
            .ok_or(ConfigError::NoHome)?;

        let mut config = Self::with_home(home);
        let file = read_file_config(&config.home.join(CONFIG_FILE))?;
        config.apply_file(file);

        if let Some(url) = env("BVM_RELEASE_URL") {
            config.release_url = url;
        }
        if let Some(url) = env("BVM_CATALOG_URL") {
            config.catalog_url = url;
        }

        config.release_url = config.release_url.trim_end_matches('/').to_string();
        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(dir) = file.source_dir {
            self.source_dir = if dir.is_absolute() {
                dir
            } else {
                self.home.join(dir)
            };
        }
        if let Some(url) = file.release_url {
            self.release_url = url;
        }
        if let Some(url) = file.catalog_url {
            self.catalog_url = url;
        }
        if file.platform.is_some() {
            self.default_platform = file.platform;
        }
        if let Some(cleanup) = file.cleanup_on_failure {
            self.cleanup_on_failure = cleanup;
        }
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
