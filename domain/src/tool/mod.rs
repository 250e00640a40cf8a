//! Tool domain module
//!
//! Tools give agents access to auxiliary data beyond text generation. The
//! contract is deliberately small:
//!
//! ```text
//! ┌──────────────┐  argument  ┌──────────────┐   text / ToolError
//! │ Agent step   │───────────▶│ Tool::run    │──────────────────▶ Observation
//! └──────────────┘            └──────────────┘
//! ```
//!
//! - [`Tool`](traits::Tool) - named, stateless capability taking one string
//! - [`ToolError`](value_objects::ToolError) - failure payload; it is turned
//!   into observation text by the executor and never aborts a task
//!
//! Which tool is called, and how many times, is decided by the model's own
//! output. The domain only defines the shape of a call.

pub mod traits;
pub mod value_objects;

pub use traits::Tool;
pub use value_objects::ToolError;
