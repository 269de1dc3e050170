//! Shared, read-only state handed to every tool handler.

use std::sync::Arc;

use crate::core::config::Config;
use crate::domains::steam::SteamApi;

/// Everything a handler needs: the upstream client and the configuration.
#[derive(Clone)]
pub struct ToolContext {
    steam: Arc<dyn SteamApi>,
    config: Arc<Config>,
}

impl ToolContext {
    pub fn new(steam: Arc<dyn SteamApi>, config: Arc<Config>) -> Self {
        Self { steam, config }
    }

    pub fn steam(&self) -> &dyn SteamApi {
        self.steam.as_ref()
    }

    /// Base URL of the Store API family.
    pub fn store_base_url(&self) -> &str {
        &self.config.steam.store_api_base_url
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
