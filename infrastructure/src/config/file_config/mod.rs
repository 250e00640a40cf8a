//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod execution;
mod llm;
mod output;
mod retry;

pub use execution::FileExecutionConfig;
pub use llm::FileLlmConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use retry::FileRetryConfig;

use crew_application::ExecutionParams;
use crew_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// LLM backend settings
    pub llm: FileLlmConfig,
    /// Retry settings for transient LLM failures
    pub retry: FileRetryConfig,
    /// Agent loop settings
    pub execution: FileExecutionConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Model name and temperature range
    /// 2. Retry backoff parameters
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.llm.validate();
        issues.extend(self.retry.validate());
        issues
    }

    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_tool_turns(self.execution.max_tool_turns)
            .with_retry(self.retry.to_policy())
    }
}
