//! Domain layer for crew-pipeline
//!
//! This crate contains the core entities, value objects and pure parsing
//! logic. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Crew
//!
//! A crew is a small set of role-specialized [`Agent`]s working through an
//! ordered list of [`Task`]s:
//!
//! - **Agent**: a persona (role, goal, backstory) with zero or more [`Tool`]s
//! - **Task**: a templated description executed by exactly one agent
//! - **Pipeline**: the ordered task list, always executed sequentially
//!
//! ## Report
//!
//! The final task output is aggregated into a [`Report`] of findings and
//! recommendations by [`parse_report`].

pub mod agent;
pub mod config;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod report;
pub mod tool;

// Re-export commonly used types
pub use agent::{
    entities::Agent,
    step_parser::{AgentStep, parse_agent_step, parse_final_answer},
};
pub use config::OutputFormat;
pub use core::{
    error::ConfigurationError,
    model::Model,
    temperature::Temperature,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use orchestration::{
    entities::{Pipeline, Task, TaskStatus},
    mode::ProcessMode,
    run::{PipelineRun, RunStatus},
    value_objects::{ContextEntry, PipelineInputs, RunContext, TaskId},
};
pub use prompt::{AgentPromptTemplate, render_template};
pub use report::{
    entities::Report,
    parsing::{parse_report, parse_sections, parse_structured},
};
pub use tool::{traits::Tool, value_objects::ToolError};
