//! Agent domain module
//!
//! Contains the [`Agent`](entities::Agent) persona record and the parser for
//! the model's step-by-step tool protocol.

pub mod entities;
pub mod step_parser;

pub use entities::Agent;
pub use step_parser::{AgentStep, parse_agent_step, parse_final_answer};
