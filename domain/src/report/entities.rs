//! Report entity

use serde::{Deserialize, Serialize};

/// Findings and recommendations extracted from a run's final output.
///
/// Serializes as `{"findings": [...], "recommendations": [...]}`. Missing
/// fields deserialize to empty lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub findings: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl Report {
    pub fn new(findings: Vec<String>, recommendations: Vec<String>) -> Self {
        Self {
            findings,
            recommendations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty() && self.recommendations.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
