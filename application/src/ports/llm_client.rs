//! LLM client port
//!
//! Defines the interface for sending a prompt to a text-generation backend.

use async_trait::async_trait;
use crew_domain::{ConfigurationError, Model, Temperature};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that can occur while invoking an LLM backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    #[error("Request timed out")]
    Timeout,

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Request rejected ({status}): {message}")]
    RequestRejected { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Gave up after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        attempts: u32,
        last_error: Box<LlmError>,
    },

    #[error("Cancelled")]
    Cancelled,
}

impl LlmError {
    /// Whether a retry may succeed.
    ///
    /// Timeouts, rate limiting, 5xx responses and connection failures are
    /// transient. Rejected requests and malformed responses are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmError::Timeout
                | LlmError::RateLimited(_)
                | LlmError::ConnectionError(_)
                | LlmError::ServerError { .. }
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, LlmError::Cancelled)
    }
}

/// A configured connection to one model at one temperature.
///
/// Implementations (adapters) live in the infrastructure layer. A client is
/// created once per run and shared by every agent of that run.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Model this client targets
    fn model(&self) -> &Model;

    /// Sampling temperature fixed at construction
    fn temperature(&self) -> Temperature;

    /// Send a prompt and return the generated text.
    ///
    /// Implementations should return [`LlmError::Cancelled`] promptly once
    /// `cancel` fires.
    async fn invoke(&self, prompt: &str, cancel: &CancellationToken) -> Result<String, LlmError>;
}

/// Settings a client is built from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LlmSettings {
    pub model: Model,
    pub temperature: Temperature,
}

impl LlmSettings {
    pub fn new(model: Model, temperature: Temperature) -> Self {
        Self { model, temperature }
    }

    pub fn with_temperature(mut self, temperature: Temperature) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Builds [`LlmClient`]s.
///
/// Credential checks happen here, so a missing API key surfaces as a
/// [`ConfigurationError`] before any task runs.
pub trait LlmClientFactory: Send + Sync {
    fn create(&self, settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, ConfigurationError>;
}
