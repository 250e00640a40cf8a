//! Agent domain entities

use crate::tool::traits::{Tool, matches_name};
use std::sync::Arc;

/// A role-specialized persona.
///
/// An agent is plain data: role, goal and backstory shape the prompt, and
/// the ordered tool list is what the model may call while working on a task.
/// Execution lives in the application layer, which runs any agent through
/// the same executor and the run's shared LLM client.
///
/// Agents are immutable once built and are shared between tasks via `Arc`.
#[derive(Clone)]
pub struct Agent {
    id: String,
    role: String,
    goal: String,
    backstory: String,
    tools: Vec<Arc<dyn Tool>>,
    allow_delegation: bool,
}

impl Agent {
    /// Create an agent. The id defaults to the role.
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        let role = role.into();
        Self {
            id: role.clone(),
            role,
            goal: goal.into(),
            backstory: backstory.into(),
            tools: Vec::new(),
            allow_delegation: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn backstory(&self) -> &str {
        &self.backstory
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// Agents never hand work to another agent.
    pub fn allow_delegation(&self) -> bool {
        self.allow_delegation
    }

    pub fn has_tools(&self) -> bool {
        !self.tools.is_empty()
    }

    /// Look up one of this agent's tools by the name the model used
    pub fn tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| matches_name(t.as_ref(), name))
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("goal", &self.goal)
            .field("tools", &self.tool_names())
            .field("allow_delegation", &self.allow_delegation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::value_objects::ToolError;

    struct Fixed(&'static str);

    impl Tool for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "fixed"
        }

        fn run(&self, _argument: &str) -> Result<String, ToolError> {
            Ok(self.0.to_string())
        }
    }

    fn analyst() -> Agent {
        Agent::new(
            "Market Research Analyst",
            "Identify gaps",
            "An expert researcher.",
        )
    }

    #[test]
    fn test_new_agent_defaults() {
        let agent = analyst();
        assert_eq!(agent.id(), "Market Research Analyst");
        assert!(!agent.has_tools());
        assert!(!agent.allow_delegation());
    }

    #[test]
    fn test_tool_lookup_preserves_order() {
        let agent = analyst()
            .with_id("market_analyst")
            .with_tool(Arc::new(Fixed("Market Data")))
            .with_tool(Arc::new(Fixed("Tech Feasibility")));

        assert_eq!(agent.id(), "market_analyst");
        assert_eq!(agent.tool_names(), vec!["Market Data", "Tech Feasibility"]);
        assert!(agent.tool("market data").is_some());
        assert!(agent.tool("Unknown").is_none());
    }

    #[test]
    fn test_debug_lists_tool_names() {
        let agent = analyst().with_tool(Arc::new(Fixed("Market Data")));
        let debug = format!("{:?}", agent);
        assert!(debug.contains("Market Data"));
    }
}
