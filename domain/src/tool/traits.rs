//! Tool domain traits
//!
//! The synchronous [`Tool`] contract. Executing tools off the async runtime
//! is an application-layer concern.

use super::value_objects::ToolError;

/// A named, stateless capability an agent may call while reasoning.
///
/// Implementations must not keep mutable state shared with other tools or
/// agents. Side effects such as file reads are fine.
pub trait Tool: Send + Sync {
    /// Stable identifier shown to the model (e.g. "Market Research Data Fetcher")
    fn name(&self) -> &str;

    /// Guidance for the model on when to select this tool
    fn description(&self) -> &str;

    /// Run the tool with a single string argument
    fn run(&self, argument: &str) -> Result<String, ToolError>;
}

/// Compare a requested tool name against a tool's name.
///
/// Models are sloppy with case, surrounding quotes and whitespace, so the
/// match ignores all three.
pub fn matches_name(tool: &dyn Tool, requested: &str) -> bool {
    let requested = requested.trim().trim_matches(|c: char| c == '"' || c == '\'' || c == '`');
    tool.name().trim().eq_ignore_ascii_case(requested.trim())
}
