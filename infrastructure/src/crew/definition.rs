//! Raw crew definition structs (deserialized from TOML)

use crew_domain::ProcessMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top level of a crew file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrewDefinition {
    /// Crew name, also used for the report file name
    pub name: String,
    #[serde(default)]
    pub process: ProcessMode,
    /// Default inputs; `-i key=value` on the command line overrides them
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
    #[serde(default)]
    pub tools: Vec<ToolDefinition>,
    #[serde(default)]
    pub agents: Vec<AgentDefinition>,
    #[serde(default)]
    pub tasks: Vec<TaskDefinition>,
}

/// Built-in tool implementations a crew file can instantiate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Fixed text block
    Static,
    /// File reader rooted at `path`
    ReadFile,
}

/// `[[tools]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ToolKind,
    /// Returned text (`static` only)
    pub text: Option<String>,
    /// Base directory (`read_file` only). Relative to the crew file;
    /// defaults to the crew file's directory.
    pub path: Option<PathBuf>,
}

/// `[[agents]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentDefinition {
    /// Reference used by tasks; defaults to the role
    pub id: Option<String>,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    /// Tool names, in the order they are offered to the model
    #[serde(default)]
    pub tools: Vec<String>,
    /// Delegation between agents is not supported; `true` is rejected
    #[serde(default)]
    pub allow_delegation: bool,
}

impl AgentDefinition {
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.role)
    }
}

/// `[[tasks]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskDefinition {
    /// Defaults to `task_<n>` (1-based position)
    pub id: Option<String>,
    pub description: String,
    #[serde(default)]
    pub expected_output: String,
    /// Agent id (or role when the agent has no id)
    pub agent: String,
}
