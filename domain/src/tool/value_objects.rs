//! Tool domain value objects
//!
//! [`ToolError`] is the failure side of the [`Tool`](super::Tool) contract.
//! It never propagates as a hard failure: the agent executor renders it as
//! observation text so the model can react to it.

use serde::{Deserialize, Serialize};

/// Error that occurred during tool execution.
///
/// | Code | Description |
/// |------|-------------|
/// | `INVALID_ARGUMENT` | Missing/malformed argument - the model can fix it |
/// | `NOT_FOUND` | Unknown tool or resource |
/// | `PERMISSION_DENIED` | Access outside the allowed area |
/// | `EXECUTION_FAILED` | Runtime failure (I/O error, panic) |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "PERMISSION_DENIED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Common error constructors
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            "NOT_FOUND",
            format!("Resource not found: {}", resource.into()),
        )
    }

    pub fn permission_denied(resource: impl Into<String>) -> Self {
        Self::new(
            "PERMISSION_DENIED",
            format!("Permission denied: {}", resource.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}
