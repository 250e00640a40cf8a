//! Output configuration from TOML (`[output]` section)

use crew_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Re-export OutputFormat from domain for convenience
pub use crew_domain::OutputFormat as FileOutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Directory the JSON report is written to when saving is requested
    pub report_dir: Option<PathBuf>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            report_dir: None,
        }
    }
}
