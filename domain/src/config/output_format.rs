//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished run is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Findings and recommendations only (default)
    #[default]
    Summary,
    /// The report as JSON
    Json,
    /// Every task output followed by the report
    Full,
}
