//! Progress reporting for pipeline runs

use colored::Colorize;
use crew_application::PipelineProgressNotifier;
use crew_domain::{PipelineRun, RunStatus, Task, TaskStatus};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during a pipeline run with a task progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
    current: Mutex<String>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            current: Mutex::new(String::new()),
        }
    }

    fn task_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn task_label(task: &Task) -> String {
        match task.agent() {
            Some(agent) => format!("{} ({})", task.id, agent.role()),
            None => task.id.to_string(),
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineProgressNotifier for ProgressReporter {
    fn on_run_start(&self, pipeline: &str, total_tasks: usize) {
        let pb = ProgressBar::new(total_tasks as u64);
        pb.set_style(Self::task_style());
        pb.set_prefix(pipeline.to_string());
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_task_start(&self, task: &Task, _index: usize, _total: usize) {
        let label = Self::task_label(task);
        self.with_bar(|pb| pb.set_message(label.clone()));
        if let Ok(mut current) = self.current.lock() {
            *current = label;
        }
    }

    fn on_tool_call(&self, tool: &str, _input: &str) {
        let current = self.current.lock().map(|c| c.clone()).unwrap_or_default();
        self.with_bar(|pb| pb.set_message(format!("{} {} {}", current, "->".dimmed(), tool)));
    }

    fn on_tool_result(&self, tool: &str, success: bool) {
        if !success {
            self.with_bar(|pb| pb.println(format!("  {} tool {} failed", "!".yellow(), tool)));
        }
    }

    fn on_task_complete(&self, task: &Task, _index: usize) {
        let label = Self::task_label(task);
        self.with_bar(|pb| {
            if task.status() == TaskStatus::Completed {
                pb.println(format!("  {} {}", "v".green(), label));
            } else {
                pb.println(format!("  {} {}", "x".red(), label));
            }
            pb.inc(1);
        });
    }

    fn on_run_complete(&self, run: &PipelineRun) {
        let Some(pb) = self.bar.lock().ok().and_then(|mut bar| bar.take()) else {
            return;
        };
        match &run.status {
            RunStatus::Completed => pb.finish_with_message("complete!".green().to_string()),
            RunStatus::Failed { task_id, .. } => {
                pb.abandon_with_message(format!("{} at {}", "failed".red(), task_id))
            }
            RunStatus::Running => pb.finish_and_clear(),
        }
    }
}

/// Line-based progress on stderr, for when stderr is not a terminal
pub struct SimpleProgress;

impl PipelineProgressNotifier for SimpleProgress {
    fn on_run_start(&self, pipeline: &str, total_tasks: usize) {
        eprintln!("{} {} ({} tasks)", "->".cyan(), pipeline.bold(), total_tasks);
    }

    fn on_task_start(&self, task: &Task, index: usize, total: usize) {
        eprintln!(
            "  [{}/{}] {}",
            index + 1,
            total,
            ProgressReporter::task_label(task)
        );
    }

    fn on_tool_call(&self, tool: &str, input: &str) {
        eprintln!("    {} {}: {}", "tool".dimmed(), tool, input.trim());
    }

    fn on_task_complete(&self, task: &Task, _index: usize) {
        match task.status() {
            TaskStatus::Completed => eprintln!("  {} {}", "v".green(), task.id),
            _ => eprintln!(
                "  {} {} ({})",
                "x".red(),
                task.id,
                task.error().unwrap_or("failed")
            ),
        }
    }

    fn on_run_complete(&self, _run: &PipelineRun) {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_domain::Agent;
    use std::sync::Arc;

    #[test]
    fn test_task_label_includes_role() {
        let task = Task::new("analyze", "x").with_agent(Arc::new(Agent::new("Analyst", "g", "b")));
        assert_eq!(ProgressReporter::task_label(&task), "analyze (Analyst)");
        assert_eq!(ProgressReporter::task_label(&Task::new("bare", "x")), "bare");
    }

    #[test]
    fn test_reporter_tolerates_events_without_run_start() {
        let reporter = ProgressReporter::new();
        let task = Task::new("t", "x");
        reporter.on_task_start(&task, 0, 1);
        reporter.on_tool_call("Lookup", "q");
        reporter.on_task_complete(&task, 0);
        reporter.on_run_complete(&PipelineRun::new("p", vec![]));
    }

    #[test]
    fn test_reporter_full_cycle() {
        let reporter = ProgressReporter::new();
        let mut run = PipelineRun::new("p", vec![Task::new("t", "x")]);
        reporter.on_run_start("p", 1);
        run.tasks[0].mark_running();
        reporter.on_task_start(&run.tasks[0], 0, 1);
        run.tasks[0].mark_completed("done");
        reporter.on_task_complete(&run.tasks[0], 0);
        run.complete(Default::default());
        reporter.on_run_complete(&run);
        assert!(reporter.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_simple_progress_reports_failed_task() {
        let progress = SimpleProgress;
        let mut run = PipelineRun::new("p", vec![Task::new("t", "x")]);
        progress.on_run_start("p", 1);
        run.tasks[0].mark_running();
        progress.on_task_start(&run.tasks[0], 0, 1);
        progress.on_tool_call("Lookup", " q ");
        run.tasks[0].mark_failed("quota exceeded");
        progress.on_task_complete(&run.tasks[0], 0);
        progress.on_run_complete(&run);
        assert_eq!(run.tasks[0].error(), Some("quota exceeded"));
    }
}
