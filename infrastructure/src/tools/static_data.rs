//! Fixed-text data fetcher tool

use crew_domain::{Tool, ToolError};
use tracing::info;

/// Tool that answers every call with the same text block.
///
/// Stands in for a data source (market research, support tickets,
/// feasibility notes) whose content is part of the crew definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDataTool {
    name: String,
    description: String,
    text: String,
}

impl StaticDataTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Tool for StaticDataTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn run(&self, argument: &str) -> Result<String, ToolError> {
        info!("Fetching {} for: {}", self.name, argument.trim());
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_text_regardless_of_argument() {
        let tool = StaticDataTool::new(
            "Market Research Data Fetcher",
            "Fetches market research data",
            "Market Research Summary:\n- 3 main competitors",
        );

        assert_eq!(tool.name(), "Market Research Data Fetcher");
        assert_eq!(tool.run("TechPro Suite").unwrap(), tool.text());
        assert_eq!(tool.run("").unwrap(), tool.text());
    }
}
