//! Execution parameters - use case loop control.
//!
//! [`ExecutionParams`] groups the static parameters that control a pipeline
//! run in [`RunPipelineUseCase`](crate::use_cases::run_pipeline::RunPipelineUseCase).
//! These are application-layer concerns, not domain policy.

use super::retry_policy::RetryPolicy;
use serde::{Deserialize, Serialize};

/// Execution loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum tool calls an agent may make for one task.
    pub max_tool_turns: usize,
    /// Retry policy wrapped around the run's LLM client.
    pub retry: RetryPolicy,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_tool_turns: 10,
            retry: RetryPolicy::default(),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
