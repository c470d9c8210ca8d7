//! Release discovery, download, verification and extraction for bvm.

pub mod artifact;
pub mod catalog;
pub mod config;
pub mod installed;
pub mod io;
pub mod patches;
pub mod reporter;
pub mod resolver;

pub use config::Config;
pub use reporter::{NullReporter, Reporter};

/// User Agent string for core operations
pub const USER_AGENT: &str = concat!("bvm/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by every request of one invocation.
pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().user_agent(USER_AGENT).build()
}
