//! Agent step parsing from LLM responses.
//!
//! Agents talk to their tools through a plain-text protocol:
//!
//! ```text
//! Thought: I need the latest market data
//! Action: Market Research Data Fetcher
//! Action Input: TechPro Suite
//! ```
//!
//! and finish with:
//!
//! ```text
//! Final Answer: <the task output>
//! ```
//!
//! A response carrying neither marker is taken verbatim as the final answer,
//! so models that ignore the protocol still complete their task.

const FINAL_ANSWER: &str = "Final Answer:";
const ACTION: &str = "Action:";
const ACTION_INPUT: &str = "Action Input:";
const OBSERVATION: &str = "Observation:";

/// One step of an agent's reasoning loop, as decided by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStep {
    /// The model asks to run a tool and wants the result back.
    UseTool {
        tool: String,
        input: String,
        thought: Option<String>,
    },
    /// The model is done; this is the task output.
    FinalAnswer(String),
}

/// Parse a model response into the next [`AgentStep`].
///
/// `Final Answer:` wins over `Action:` when both are present. The action
/// input runs until the end of the response or until a hallucinated
/// `Observation:` line.
pub fn parse_agent_step(response: &str) -> AgentStep {
    if response.contains(FINAL_ANSWER) {
        return AgentStep::FinalAnswer(parse_final_answer(response));
    }

    let lines: Vec<&str> = response.lines().collect();
    let Some(action_idx) = lines
        .iter()
        .position(|line| strip_marker(line, ACTION).is_some())
    else {
        return AgentStep::FinalAnswer(response.trim().to_string());
    };

    let tool = strip_marker(lines[action_idx], ACTION)
        .map(unquote)
        .unwrap_or_default();
    if tool.is_empty() {
        return AgentStep::FinalAnswer(response.trim().to_string());
    }

    let mut input_lines = Vec::new();
    let mut in_input = false;
    for line in &lines[action_idx + 1..] {
        if in_input {
            if strip_marker(line, OBSERVATION).is_some() {
                break;
            }
            input_lines.push(*line);
        } else if let Some(rest) = strip_marker(line, ACTION_INPUT) {
            in_input = true;
            input_lines.push(rest);
        }
    }
    let input = unquote(input_lines.join("\n").trim());

    let thought = lines[..action_idx]
        .iter()
        .map(|line| {
            let trimmed = line.trim();
            trimmed.strip_prefix("Thought:").unwrap_or(trimmed).trim()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    AgentStep::UseTool {
        tool,
        input,
        thought: (!thought.is_empty()).then_some(thought),
    }
}

/// Read a response as the task output, ignoring any tool request.
///
/// The text after `Final Answer:` when present, otherwise the whole
/// response trimmed.
pub fn parse_final_answer(response: &str) -> String {
    match response.find(FINAL_ANSWER) {
        Some(pos) => response[pos + FINAL_ANSWER.len()..].trim().to_string(),
        None => response.trim().to_string(),
    }
}

/// Return the text after `marker` when the (trimmed) line starts with it.
///
/// `Action Input:` also starts with `Action`, so the `Action:` marker only
/// matches when followed by the colon directly.
fn strip_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.trim_start().strip_prefix(marker).map(str::trim)
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    for quote in ['"', '\'', '`'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return value[1..value.len() - 1].trim().to_string();
        }
    }
    value.to_string()
}
