//! Output formatter trait

use crew_domain::{OutputFormat, PipelineRun};

/// Trait for formatting pipeline runs
pub trait OutputFormatter {
    /// Findings and recommendations of a completed run
    fn format_summary(&self, run: &PipelineRun) -> String;

    /// Every task output followed by the summary
    fn format_full(&self, run: &PipelineRun) -> String;

    /// The report as JSON
    fn format_json(&self, run: &PipelineRun) -> String;

    /// Failed task, reason and the context gathered before the failure
    fn format_failure(&self, run: &PipelineRun) -> String;

    /// Format a completed run in the requested format
    fn format(&self, run: &PipelineRun, format: OutputFormat) -> String {
        match format {
            OutputFormat::Summary => self.format_summary(run),
            OutputFormat::Json => self.format_json(run),
            OutputFormat::Full => self.format_full(run),
        }
    }
}
