//! Execution configuration from TOML (`[execution]` section)

use serde::{Deserialize, Serialize};

/// Raw execution configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Maximum tool calls per task
    pub max_tool_turns: usize,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self { max_tool_turns: 10 }
    }
}
