//! Crew definition files
//!
//! A crew file is TOML describing the tools, agents and tasks of one
//! pipeline. [`CrewLoader`] parses it into the serde structs of
//! [`definition`] and then resolves every reference into a domain
//! [`Pipeline`](crew_domain::Pipeline):
//!
//! ```text
//! crew.toml ──toml──▶ CrewDefinition ──resolve──▶ Pipeline
//!                      tools / agents / tasks      Arc<Agent> + Arc<dyn Tool>
//! ```

pub mod definition;
mod loader;

pub use definition::{AgentDefinition, CrewDefinition, TaskDefinition, ToolDefinition, ToolKind};
pub use loader::{CrewLoadError, CrewLoader};
