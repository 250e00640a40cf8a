//! Gemini REST client

use super::protocol::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use crew_application::{LlmClient, LlmError, LlmSettings};
use crew_domain::{ConfigurationError, Model, Temperature};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Longest error body excerpt kept in an error message
const MAX_ERROR_BODY: usize = 300;

/// Connection settings for the Gemini API.
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub base_url: String,
    /// Environment variable the API key is read from
    pub api_key_env: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
    pub const DEFAULT_API_KEY_ENV: &'static str = "GEMINI_API_KEY";
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key_env: Self::DEFAULT_API_KEY_ENV.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// [`LlmClient`] backed by `POST /v1beta/models/{model}:generateContent`.
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: Model,
    temperature: Temperature,
}

impl GeminiClient {
    pub fn new(
        config: &GeminiConfig,
        api_key: impl Into<String>,
        settings: &LlmSettings,
    ) -> Result<Self, ConfigurationError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigurationError::Invalid(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                settings.model
            ),
            api_key: api_key.into(),
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[cfg(test)]
    fn with_http(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateContentRequest::from_prompt(prompt, self.temperature.value());

        debug!("POST {} ({} prompt chars)", self.endpoint, prompt.len());
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::InvalidResponse(format!("malformed JSON: {}", e)))?;
        parsed
            .text()
            .ok_or_else(|| LlmError::InvalidResponse(parsed.empty_reason()))
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    fn model(&self) -> &Model {
        &self.model
    }

    fn temperature(&self) -> Temperature {
        self.temperature
    }

    async fn invoke(&self, prompt: &str, cancel: &CancellationToken) -> Result<String, LlmError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(LlmError::Cancelled),
            result = self.generate(prompt) => result,
        }
    }
}

/// Map a non-success HTTP status to an [`LlmError`].
///
/// 408 and 429 and every 5xx are transient; other statuses reject the request.
pub(crate) fn classify_status(status: StatusCode, body: &str) -> LlmError {
    let message = error_message(body);
    match status.as_u16() {
        408 => LlmError::Timeout,
        429 => LlmError::RateLimited(message),
        code if status.is_server_error() => LlmError::ServerError {
            status: code,
            message,
        },
        code => LlmError::RequestRejected {
            status: code,
            message,
        },
    }
}

fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        return match parsed.error.status {
            Some(status) => format!("{} ({})", parsed.error.message, status),
            None => parsed.error.message,
        };
    }
    let trimmed = body.trim();
    if trimmed.chars().count() > MAX_ERROR_BODY {
        let excerpt: String = trimmed.chars().take(MAX_ERROR_BODY).collect();
        format!("{}...", excerpt)
    } else {
        trimmed.to_string()
    }
}

fn map_transport_error(err: reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout
    } else if err.is_decode() {
        LlmError::InvalidResponse(err.to_string())
    } else {
        LlmError::ConnectionError(err.to_string())
    }
}
