//! Application layer for crew-pipeline
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ExecutionParams, RetryPolicy};
pub use ports::{
    llm_client::{LlmClient, LlmClientFactory, LlmError, LlmSettings},
    progress::{NoProgress, PipelineProgressNotifier},
    retrying_client::RetryingLlmClient,
};
pub use use_cases::execute_task::{AgentError, AgentExecutor};
pub use use_cases::run_pipeline::{
    RunInvocation, RunPipelineError, RunPipelineInput, RunPipelineUseCase,
};
