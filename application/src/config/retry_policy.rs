//! Retry policy for transient LLM failures.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Exponential backoff: `initial_backoff * multiplier^attempt`, capped at
/// `max_backoff`.
///
/// `max_retries` counts retries, so a request is attempted at most
/// `max_retries + 1` times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Never retry.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Retry `max_retries` times without sleeping (tests).
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            multiplier: 1.0,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    pub fn with_max_backoff(mut self, backoff: Duration) -> Self {
        self.max_backoff = backoff;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Total attempts including the first one
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry number `retry` (0-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.multiplier.max(1.0).powi(retry.min(i32::MAX as u32) as i32);
        let secs = self.initial_backoff.as_secs_f64() * factor;
        let capped = secs.min(self.max_backoff.as_secs_f64());
        if !capped.is_finite() || capped <= 0.0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(capped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backoff_sequence() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy::default().with_max_backoff(Duration::from_secs(5));
        assert_eq!(policy.delay_for(10), Duration::from_secs(5));
    }

    #[test]
    fn test_immediate_and_none() {
        assert_eq!(RetryPolicy::immediate(2).delay_for(1), Duration::ZERO);
        assert_eq!(RetryPolicy::immediate(2).max_attempts(), 3);
        assert_eq!(RetryPolicy::none().max_attempts(), 1);
    }
}
