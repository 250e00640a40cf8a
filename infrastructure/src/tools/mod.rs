//! Built-in tool implementations
//!
//! Crew definition files refer to tools by `kind`:
//!
//! - `static`: [`StaticDataTool`] returns a fixed text block (canned data fetchers)
//! - `read_file`: [`ReadFileTool`] reads a UTF-8 file below a base directory
//!
//! Both implement the domain [`Tool`](crew_domain::Tool) trait and are shared
//! between agents through `Arc<dyn Tool>`.

pub mod file;
pub mod static_data;

pub use file::ReadFileTool;
pub use static_data::StaticDataTool;
