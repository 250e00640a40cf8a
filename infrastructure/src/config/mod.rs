//! Configuration file loading for crew-pipeline
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CREW_` environment variables (`CREW_LLM__MODEL`, `CREW_RETRY__MAX_RETRIES`, ...)
//! 2. `--config <path>` specified file
//! 3. Project root: `./crew-pipeline.toml` or `./.crew-pipeline.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/crew-pipeline/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileExecutionConfig, FileLlmConfig, FileOutputConfig, FileOutputFormat,
    FileRetryConfig,
};
pub use loader::ConfigLoader;
