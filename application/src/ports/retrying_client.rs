//! Retry decorator for [`LlmClient`]

use super::llm_client::{LlmClient, LlmError};
use crate::config::RetryPolicy;
use async_trait::async_trait;
use crew_domain::{Model, Temperature};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Wraps a client and retries transient failures with exponential backoff.
///
/// Non-transient errors are returned as-is on the first occurrence. When the
/// retry budget runs out the last error is wrapped in
/// [`LlmError::RetriesExhausted`]. Cancellation is checked before every
/// attempt and interrupts backoff sleeps.
pub struct RetryingLlmClient {
    inner: Arc<dyn LlmClient>,
    policy: RetryPolicy,
}

impl RetryingLlmClient {
    pub fn new(inner: Arc<dyn LlmClient>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl LlmClient for RetryingLlmClient {
    fn model(&self) -> &Model {
        self.inner.model()
    }

    fn temperature(&self) -> Temperature {
        self.inner.temperature()
    }

    async fn invoke(&self, prompt: &str, cancel: &CancellationToken) -> Result<String, LlmError> {
        let max_attempts = self.policy.max_attempts();
        let mut attempt: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(LlmError::Cancelled);
            }
            attempt += 1;

            let error = match self.inner.invoke(prompt, cancel).await {
                Ok(text) => return Ok(text),
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) => e,
            };

            if attempt >= max_attempts {
                warn!("LLM request failed after {} attempts: {}", attempt, error);
                return Err(LlmError::RetriesExhausted {
                    attempts: attempt,
                    last_error: Box::new(error),
                });
            }

            let delay = self.policy.delay_for(attempt - 1);
            warn!(
                "LLM request failed (attempt {}/{}): {}; retrying in {:?}",
                attempt, max_attempts, error, delay
            );

            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Retry backoff interrupted by cancellation");
                    return Err(LlmError::Cancelled);
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}
