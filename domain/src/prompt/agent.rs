//! Prompt templates for crew agents

use crate::agent::entities::Agent;
use crate::orchestration::entities::Task;
use crate::orchestration::value_objects::RunContext;
use crate::tool::value_objects::ToolError;

/// Templates for generating agent prompts
pub struct AgentPromptTemplate;

impl AgentPromptTemplate {
    /// Persona section: who the agent is and what it is after.
    pub fn persona(agent: &Agent) -> String {
        format!(
            "You are {role}.\n{backstory}\n\nYour personal goal is: {goal}",
            role = agent.role(),
            backstory = agent.backstory(),
            goal = agent.goal()
        )
    }

    /// Tool list plus the text protocol for calling them.
    ///
    /// Empty when the agent has no tools; such agents answer directly.
    pub fn tool_instructions(agent: &Agent) -> String {
        if !agent.has_tools() {
            return String::new();
        }

        let tool_descriptions = agent
            .tools()
            .iter()
            .map(|t| format!("- **{}**: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"## Available Tools

{tool_descriptions}

## How to Use Tools

To use a tool, reply with exactly this format and then stop:

Thought: what you need and why
Action: the tool name, exactly as listed above
Action Input: the input for the tool

You will receive the tool result as an Observation. You may use tools several times."#
        )
    }

    /// Full prompt for the first turn of a task.
    pub fn task_prompt(agent: &Agent, task: &Task, context: &RunContext) -> String {
        let tools = Self::tool_instructions(agent);
        let tools = if tools.is_empty() {
            String::new()
        } else {
            format!("\n\n{}", tools)
        };

        let expected = if task.expected_output.trim().is_empty() {
            String::new()
        } else {
            format!(
                "\n\nThis is the expected criteria for your final answer: {}",
                task.expected_output.trim()
            )
        };

        let previous = if context.is_empty() {
            String::new()
        } else {
            format!(
                "\n\n## Context From Previous Tasks\n\n{}",
                context.render()
            )
        };

        format!(
            r#"{persona}{tools}

## Current Task

{description}{expected}{previous}

When you have your complete answer, reply with:

Final Answer: your complete answer to the task"#,
            persona = Self::persona(agent),
            tools = tools,
            description = task.description.trim(),
            expected = expected,
            previous = previous
        )
    }

    /// Append one tool round-trip to the running transcript.
    pub fn tool_turn(response: &str, observation: &str) -> String {
        format!("\n\n{}\nObservation: {}", response.trim(), observation.trim())
    }

    /// Observation text when a tool fails.
    pub fn tool_error(tool: &str, error: &ToolError) -> String {
        format!(
            "Tool '{}' failed: {}. Try a different input or continue without it.",
            tool, error
        )
    }

    /// Observation text when the model asks for a tool the agent does not have.
    pub fn unknown_tool(requested: &str, agent: &Agent) -> String {
        let available = agent.tool_names();
        let available = if available.is_empty() {
            "none".to_string()
        } else {
            available.join(", ")
        };
        format!(
            "Tool '{}' does not exist. Available tools: {}.",
            requested, available
        )
    }

    /// Appended once the tool-turn limit is reached.
    pub fn final_answer_nudge() -> &'static str {
        "\n\nYou have used all available tool calls. Do not call any more tools.\nReply now with:\n\nFinal Answer: your complete answer to the task"
    }
}
