//! Prompt domain
//!
//! Input substitution for task descriptions and the prompt text agents see.

pub mod agent;
pub mod template;

pub use agent::AgentPromptTemplate;
pub use template::render_template;
