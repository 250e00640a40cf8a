//! Retry configuration from TOML (`[retry]` section)

use crew_application::RetryPolicy;
use crew_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw retry configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub multiplier: f64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_retries: policy.max_retries,
            initial_backoff_ms: policy.initial_backoff.as_millis() as u64,
            max_backoff_ms: policy.max_backoff.as_millis() as u64,
            multiplier: policy.multiplier,
        }
    }
}

impl FileRetryConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "retry.multiplier".to_string(),
                    value: self.multiplier.to_string(),
                },
                format!("retry.multiplier: {} must be at least 1.0", self.multiplier),
            ));
        }
        if self.initial_backoff_ms > self.max_backoff_ms {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "retry.initial_backoff_ms".to_string(),
                    value: self.initial_backoff_ms.to_string(),
                },
                "retry.initial_backoff_ms: larger than max_backoff_ms, every wait is capped",
            ));
        }
        issues
    }

    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_retries(self.max_retries)
            .with_initial_backoff(Duration::from_millis(self.initial_backoff_ms))
            .with_max_backoff(Duration::from_millis(self.max_backoff_ms))
            .with_multiplier(self.multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_policy() {
        let config = FileRetryConfig::default();
        assert_eq!(config.to_policy(), RetryPolicy::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_zero_multiplier_is_error() {
        let config = FileRetryConfig {
            multiplier: 0.0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }
}
