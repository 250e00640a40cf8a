//! LLM backend configuration from TOML (`[llm]` section)

use crate::gemini::GeminiConfig;
use crew_application::LlmSettings;
use crew_domain::{ConfigIssue, ConfigIssueCode, ConfigurationError, Model, Temperature};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw LLM configuration from TOML
///
/// # Example
///
/// ```toml
/// [llm]
/// model = "gemini-2.0-flash"
/// api_key_env = "GEMINI_API_KEY"
/// temperature = 0.7
/// timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Model identifier (a `gemini/` prefix is accepted)
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// API base URL
    pub base_url: String,
    /// Sampling temperature in `[0.0, 1.0]`
    pub temperature: f64,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            model: Model::default().to_string(),
            api_key_env: GeminiConfig::DEFAULT_API_KEY_ENV.to_string(),
            base_url: GeminiConfig::DEFAULT_BASE_URL.to_string(),
            temperature: 0.0,
            timeout_secs: 60,
        }
    }
}

impl FileLlmConfig {
    /// Parse the model name, collecting issues for empty or unknown names.
    pub fn parse_model(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: "llm.model".to_string(),
                },
                "llm.model: model name cannot be empty",
            ));
            return (None, issues);
        }

        let Ok(model) = self.model.parse::<Model>();
        if !model.is_known() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownModel {
                    model: self.model.clone(),
                },
                format!(
                    "llm.model: '{}' is not a built-in model, sending it as-is",
                    self.model
                ),
            ));
        }
        (Some(model), issues)
    }

    /// Parse the temperature, collecting an issue when out of range.
    pub fn parse_temperature(&self) -> (Option<Temperature>, Vec<ConfigIssue>) {
        match Temperature::new(self.temperature) {
            Ok(t) => (Some(t), Vec::new()),
            Err(_) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::OutOfRange {
                        field: "llm.temperature".to_string(),
                        value: self.temperature.to_string(),
                    },
                    format!(
                        "llm.temperature: {} is outside the range [0.0, 1.0]",
                        self.temperature
                    ),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_model().1;
        issues.extend(self.parse_temperature().1);
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "llm.timeout_secs".to_string(),
                    value: "0".to_string(),
                },
                "llm.timeout_secs: must be greater than zero",
            ));
        }
        issues
    }

    /// Model and temperature for the run's client.
    pub fn to_settings(&self) -> Result<LlmSettings, ConfigurationError> {
        let (model, _) = self.parse_model();
        let model = model.ok_or_else(|| {
            ConfigurationError::Invalid("llm.model: model name cannot be empty".to_string())
        })?;
        Ok(LlmSettings::new(model, Temperature::new(self.temperature)?))
    }

    pub fn to_gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            api_key_env: self.api_key_env.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        }
    }
}
