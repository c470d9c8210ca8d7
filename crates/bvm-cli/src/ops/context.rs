//! Shared installation context.
//!
//! Groups the configuration, HTTP client and reporter that every stage of an
//! install needs.

use std::fmt;
use std::sync::Arc;

use bvm_core::{Config, Reporter};

/// Groups common state used during install operations.
#[derive(Clone)]
pub struct Context {
    pub config: Config,
    pub client: reqwest::Client,
    pub reporter: Arc<dyn Reporter>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Context {
    pub fn new(config: Config, client: reqwest::Client, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            config,
            client,
            reporter,
        }
    }
}
