//! Execute Task use case.
//!
//! Runs one task with its agent: builds the prompt, drives the
//! `Action:` / `Observation:` tool loop and returns the final answer.

use crate::ports::llm_client::{LlmClient, LlmError};
use crate::ports::progress::PipelineProgressNotifier;
use crate::use_cases::shared::check_cancelled;
use crew_domain::{
    Agent, AgentPromptTemplate, AgentStep, RunContext, Task, ToolError, parse_agent_step,
    parse_final_answer,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Why an agent could not produce an answer. Fails the task.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(LlmError),

    #[error("Cancelled")]
    Cancelled,
}

impl From<LlmError> for AgentError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Cancelled => AgentError::Cancelled,
            other => AgentError::Llm(other),
        }
    }
}

/// Stateless executor shared by every agent of a run.
///
/// The executor owns nothing but the run's client and the tool-turn limit,
/// so any agent can be executed through it.
pub struct AgentExecutor {
    client: Arc<dyn LlmClient>,
    max_tool_turns: usize,
}

impl AgentExecutor {
    pub fn new(client: Arc<dyn LlmClient>, max_tool_turns: usize) -> Self {
        Self {
            client,
            max_tool_turns,
        }
    }

    /// Execute `task` as `agent`, with the outputs of earlier tasks as context.
    ///
    /// Tool failures become observation text and never fail the task. LLM
    /// failures and cancellation do.
    pub async fn execute(
        &self,
        agent: &Agent,
        task: &Task,
        context: &RunContext,
        cancel: &CancellationToken,
        progress: &dyn PipelineProgressNotifier,
    ) -> Result<String, AgentError> {
        let mut transcript = AgentPromptTemplate::task_prompt(agent, task, context);
        let mut tool_turns = 0;

        loop {
            check_cancelled(cancel)?;

            debug!(
                "Task {} ({}): invoking model, prompt {} chars",
                task.id,
                agent.role(),
                transcript.len()
            );
            let response = self.client.invoke(&transcript, cancel).await?;

            // No tools were offered, so an `Action:` line is just prose
            if !agent.has_tools() {
                return Ok(parse_final_answer(&response));
            }

            let (tool, input, thought) = match parse_agent_step(&response) {
                AgentStep::FinalAnswer(answer) => {
                    info!("Task {}: final answer after {} tool turn(s)", task.id, tool_turns);
                    return Ok(answer);
                }
                AgentStep::UseTool {
                    tool,
                    input,
                    thought,
                } => (tool, input, thought),
            };

            if tool_turns >= self.max_tool_turns {
                warn!(
                    "Task {}: tool turn limit ({}) reached, asking for a final answer",
                    task.id, self.max_tool_turns
                );
                return self.force_final_answer(transcript, cancel).await;
            }
            tool_turns += 1;

            if let Some(thought) = thought {
                debug!("Task {} thought: {}", task.id, thought);
            }
            let observation = self.run_tool(agent, &tool, &input, progress).await;
            transcript.push_str(&AgentPromptTemplate::tool_turn(
                &without_observations(&response),
                &observation,
            ));
        }
    }

    /// One last invocation with tools disabled.
    ///
    /// Whatever comes back is the answer; a further tool request is taken
    /// verbatim.
    async fn force_final_answer(
        &self,
        mut transcript: String,
        cancel: &CancellationToken,
    ) -> Result<String, AgentError> {
        check_cancelled(cancel)?;
        transcript.push_str(AgentPromptTemplate::final_answer_nudge());
        let response = self.client.invoke(&transcript, cancel).await?;
        Ok(parse_final_answer(&response))
    }

    /// Run a tool off the async runtime and turn the outcome into observation text.
    async fn run_tool(
        &self,
        agent: &Agent,
        requested: &str,
        input: &str,
        progress: &dyn PipelineProgressNotifier,
    ) -> String {
        let Some(tool) = agent.tool(requested).cloned() else {
            warn!("Agent {} requested unknown tool '{}'", agent.role(), requested);
            return AgentPromptTemplate::unknown_tool(requested, agent);
        };

        let name = tool.name().to_string();
        progress.on_tool_call(&name, input);
        debug!("Running tool '{}' with input: {}", name, input);

        let argument = input.to_string();
        let result = tokio::task::spawn_blocking(move || tool.run(&argument))
            .await
            .unwrap_or_else(|join_error| {
                Err(ToolError::execution_failed(format!(
                    "tool panicked: {}",
                    join_error
                )))
            });

        match result {
            Ok(output) => {
                progress.on_tool_result(&name, true);
                output
            }
            Err(error) => {
                warn!("Tool '{}' failed: {}", name, error);
                progress.on_tool_result(&name, false);
                AgentPromptTemplate::tool_error(&name, &error)
            }
        }
    }
}

/// Drop any `Observation:` the model invented, and everything after it.
fn without_observations(response: &str) -> String {
    response
        .lines()
        .take_while(|line| !line.trim_start().starts_with("Observation:"))
        .collect::<Vec<_>>()
        .join("\n")
}
