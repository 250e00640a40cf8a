//! Domain error types

use thiserror::Error;

/// Configuration errors.
///
/// Every variant is fatal and is raised before any task starts: a pipeline
/// that fails configuration never runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    #[error("Temperature {0} is outside the range [0.0, 1.0]")]
    TemperatureOutOfRange(f64),

    #[error("Pipeline '{0}' has no tasks")]
    EmptyPipeline(String),

    #[error("Task '{0}' has no agent assigned")]
    MissingAgent(String),

    #[error("Process mode '{0}' is not supported")]
    UnsupportedProcessMode(String),

    #[error("Task '{task}' references unknown agent '{agent}'")]
    UnknownAgent { task: String, agent: String },

    #[error("Agent '{agent}' references unknown tool '{tool}'")]
    UnknownTool { agent: String, tool: String },

    #[error("Duplicate {kind} '{name}'")]
    Duplicate { kind: &'static str, name: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigurationError {
    /// Check if this error is caused by a missing credential
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, ConfigurationError::MissingCredential(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_display() {
        let error = ConfigurationError::MissingCredential("GEMINI_API_KEY".to_string());
        assert_eq!(
            error.to_string(),
            "Missing credential: environment variable GEMINI_API_KEY is not set"
        );
        assert!(error.is_missing_credential());
    }

    #[test]
    fn test_unknown_tool_display() {
        let error = ConfigurationError::UnknownTool {
            agent: "analyst".to_string(),
            tool: "Scraper".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Agent 'analyst' references unknown tool 'Scraper'"
        );
        assert!(!error.is_missing_credential());
    }
}
