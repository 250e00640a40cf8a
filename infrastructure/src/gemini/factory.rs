//! Builds [`GeminiClient`]s for the run-pipeline use case

use super::client::{GeminiClient, GeminiConfig};
use crew_application::{LlmClient, LlmClientFactory, LlmSettings};
use crew_domain::ConfigurationError;
use std::sync::Arc;
use tracing::debug;

/// Creates one [`GeminiClient`] per run.
///
/// The API key is captured when the factory is built; a missing or blank
/// key only becomes an error when a client is requested, so startup checks
/// of the use case report it before any task runs.
pub struct GeminiClientFactory {
    config: GeminiConfig,
    api_key: Option<String>,
}

impl GeminiClientFactory {
    pub fn new(config: GeminiConfig, api_key: Option<String>) -> Self {
        Self { config, api_key }
    }

    /// Read the key from the environment variable named in `config`.
    pub fn from_env(config: GeminiConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env).ok();
        Self::new(config, api_key)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

impl LlmClientFactory for GeminiClientFactory {
    fn create(&self, settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, ConfigurationError> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigurationError::MissingCredential(self.config.api_key_env.clone()))?;

        debug!(
            "Creating Gemini client for {} at temperature {}",
            settings.model, settings.temperature
        );
        let client = GeminiClient::new(&self.config, api_key, settings)?;
        Ok(Arc::new(client))
    }
}
