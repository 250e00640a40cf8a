//! Console output formatter for pipeline runs

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use crew_domain::{PipelineRun, Report, RunStatus, TaskStatus};

/// Formats pipeline runs for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Findings and recommendations, or the raw final output when the report is empty
    pub fn format_summary(run: &PipelineRun) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Crew Results: {}", run.pipeline_name)));
        output.push('\n');

        let report = run.report.clone().unwrap_or_default();
        if report.is_empty() {
            output.push_str(&format!(
                "\n{}\n\n",
                "No findings or recommendations could be extracted. Final output:".yellow()
            ));
            output.push_str(run.final_output().unwrap_or_default());
            output.push('\n');
        } else {
            output.push_str(&Self::report_section(&report));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Every task output in order, then the summary
    pub fn format_full(run: &PipelineRun) -> String {
        let mut output = String::new();
        let total = run.tasks.len();

        output.push_str(&Self::header(&format!("Crew Run: {}", run.pipeline_name)));
        output.push('\n');

        for (index, task) in run.tasks.iter().enumerate() {
            let role = task.agent().map(|a| a.role()).unwrap_or("unassigned");
            let title = format!("── [{}/{}] {} ({}) ──", index + 1, total, task.id, role);
            match task.status() {
                TaskStatus::Completed => {
                    output.push_str(&format!(
                        "\n{}\n{}\n",
                        title.yellow().bold(),
                        task.output().unwrap_or_default()
                    ));
                }
                TaskStatus::Failed => {
                    output.push_str(&format!(
                        "\n{}\nError: {}\n",
                        title.red().bold(),
                        task.error().unwrap_or("Unknown")
                    ));
                }
                status => {
                    output.push_str(&format!("\n{} {}\n", title.dimmed(), status.as_str()));
                }
            }
        }

        if let Some(report) = run.report.as_ref().filter(|r| !r.is_empty()) {
            output.push_str(&Self::section_header("Report"));
            output.push_str(&Self::report_section(report));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format the report as JSON (`{}` when the run produced none)
    pub fn format_json(run: &PipelineRun) -> String {
        match &run.report {
            Some(report) => report.to_json_pretty().unwrap_or_else(|_| "{}".to_string()),
            None => "{}".to_string(),
        }
    }

    /// Which task failed, why, and the outputs of the tasks that completed before it
    pub fn format_failure(run: &PipelineRun) -> String {
        let mut output = String::new();

        let (task_id, reason) = match &run.status {
            RunStatus::Failed { task_id, reason } => (task_id.to_string(), reason.as_str()),
            _ => return output,
        };

        output.push_str(&format!(
            "{} {} failed at task '{}'\n",
            "Error:".red().bold(),
            run.pipeline_name,
            task_id
        ));
        output.push_str(&format!("{} {}\n", "Reason:".bold(), reason));

        if run.context.is_empty() {
            output.push_str(&format!("\n{}\n", "No task completed before the failure.".dimmed()));
            return output;
        }

        output.push_str(&Self::section_header("Partial Context"));
        for entry in run.context.entries() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ({}) ──", entry.task_id, entry.agent_role).yellow().bold(),
                Self::indent(&entry.output, "  ")
            ));
        }

        output
    }

    fn report_section(report: &Report) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{}\n", "Key Findings:".cyan().bold()));
        if report.findings.is_empty() {
            output.push_str(&format!("  {}\n", "(none)".dimmed()));
        }
        for finding in &report.findings {
            output.push_str(&Self::bullet(finding));
        }

        output.push_str(&format!("\n{}\n", "Recommendations:".green().bold()));
        if report.recommendations.is_empty() {
            output.push_str(&format!("  {}\n", "(none)".dimmed()));
        }
        for recommendation in &report.recommendations {
            output.push_str(&Self::bullet(recommendation));
        }

        output
    }

    /// Bullet with continuation lines aligned under the text
    fn bullet(text: &str) -> String {
        let mut lines = text.trim().lines();
        let first = lines.next().unwrap_or_default();
        let mut output = format!("  * {}\n", first);
        for line in lines {
            output.push_str(&format!("    {}\n", line));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_summary(&self, run: &PipelineRun) -> String {
        Self::format_summary(run)
    }

    fn format_full(&self, run: &PipelineRun) -> String {
        Self::format_full(run)
    }

    fn format_json(&self, run: &PipelineRun) -> String {
        Self::format_json(run)
    }

    fn format_failure(&self, run: &PipelineRun) -> String {
        Self::format_failure(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_domain::{Agent, OutputFormat, Task, TaskId};
    use std::sync::Arc;

    fn task(id: &str, role: &str) -> Task {
        Task::new(id, "do it").with_agent(Arc::new(Agent::new(role, "goal", "story")))
    }

    fn completed_run(report: Report) -> PipelineRun {
        let mut run = PipelineRun::new("support", vec![task("analyze", "Analyst"), task("write", "Writer")]);
        for t in run.tasks.iter_mut() {
            t.mark_running();
            let output = format!("{} output", t.id);
            t.mark_completed(output);
        }
        run.complete(report);
        run
    }

    fn failed_run() -> PipelineRun {
        let mut run = PipelineRun::new("support", vec![task("analyze", "Analyst"), task("write", "Writer")]);
        run.tasks[0].mark_running();
        run.tasks[0].mark_completed("ALPHA analysis");
        run.context.append(TaskId::new("analyze"), "Analyst", "ALPHA analysis");
        run.tasks[1].mark_running();
        run.tasks[1].mark_failed("LLM error: timeout");
        run.fail(TaskId::new("write"), "LLM error: timeout");
        run
    }

    #[test]
    fn test_summary_lists_findings_and_recommendations() {
        colored::control::set_override(false);
        let run = completed_run(Report::new(
            vec!["Finding: login errors".to_string()],
            vec!["Recommendation: add SSO".to_string()],
        ));

        let text = ConsoleFormatter::format_summary(&run);
        assert!(text.contains("Crew Results: support"));
        assert!(text.contains("Key Findings:"));
        assert!(text.contains("  * Finding: login errors"));
        assert!(text.contains("  * Recommendation: add SSO"));
    }

    #[test]
    fn test_summary_falls_back_to_final_output() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_summary(&completed_run(Report::default()));
        assert!(text.contains("No findings or recommendations"));
        assert!(text.contains("write output"));
    }

    #[test]
    fn test_full_shows_every_task() {
        colored::control::set_override(false);
        let run = completed_run(Report::new(vec!["f".into()], vec![]));
        let text = ConsoleFormatter.format(&run, OutputFormat::Full);
        assert!(text.contains("[1/2] analyze (Analyst)"));
        assert!(text.contains("[2/2] write (Writer)"));
        assert!(text.contains("analyze output"));
        assert!(text.contains("Report"));
    }

    #[test]
    fn test_json_is_report() {
        let run = completed_run(Report::new(vec!["f".into()], vec!["r".into()]));
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&run)).unwrap();
        assert_eq!(value, serde_json::json!({"findings": ["f"], "recommendations": ["r"]}));

        assert_eq!(ConsoleFormatter::format_json(&failed_run()), "{}");
    }

    #[test]
    fn test_failure_shows_task_reason_and_context() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_failure(&failed_run());
        assert!(text.contains("failed at task 'write'"));
        assert!(text.contains("LLM error: timeout"));
        assert!(text.contains("Partial Context"));
        assert!(text.contains("  ALPHA analysis"));
    }

    #[test]
    fn test_failure_of_completed_run_is_empty() {
        assert!(ConsoleFormatter::format_failure(&completed_run(Report::default())).is_empty());
    }

    #[test]
    fn test_multiline_bullet_is_aligned() {
        assert_eq!(ConsoleFormatter::bullet("a\nb"), "  * a\n    b\n");
    }
}
