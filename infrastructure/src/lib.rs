//! Infrastructure layer for crew-pipeline
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer:
//!
//! - [`gemini`]: Gemini REST client and the per-run client factory
//! - [`config`]: layered TOML/env configuration loading
//! - [`crew`]: crew definition files resolved into domain pipelines
//! - [`tools`]: built-in tools referenced by crew files
//! - [`report`]: JSON report files

pub mod config;
pub mod crew;
pub mod gemini;
pub mod report;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileExecutionConfig, FileLlmConfig, FileOutputConfig,
    FileOutputFormat, FileRetryConfig,
};
pub use crew::{CrewLoadError, CrewLoader};
pub use gemini::{GeminiClient, GeminiClientFactory, GeminiConfig};
pub use report::{ReportWriteError, ReportWriter};
pub use tools::{ReadFileTool, StaticDataTool};
