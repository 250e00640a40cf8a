//! The outcome of one pipeline run.

use super::entities::{Task, TaskStatus};
use super::value_objects::{RunContext, TaskId};
use crate::report::entities::Report;

/// Overall status of a [`PipelineRun`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
    /// The run stopped at `task_id`; later tasks were never started.
    Failed { task_id: TaskId, reason: String },
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Running)
    }
}

/// Everything a single run produced.
///
/// Tasks are copies rendered from the pipeline definition, so the pipeline
/// itself is never mutated and can be executed again. The report is only
/// present when the run completed.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub pipeline_name: String,
    pub tasks: Vec<Task>,
    pub context: RunContext,
    pub status: RunStatus,
    pub report: Option<Report>,
}

impl PipelineRun {
    pub fn new(pipeline_name: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            pipeline_name: pipeline_name.into(),
            tasks,
            context: RunContext::new(),
            status: RunStatus::Running,
            report: None,
        }
    }

    pub fn complete(&mut self, report: Report) {
        self.status = RunStatus::Completed;
        self.report = Some(report);
    }

    pub fn fail(&mut self, task_id: TaskId, reason: impl Into<String>) {
        self.status = RunStatus::Failed {
            task_id,
            reason: reason.into(),
        };
        self.report = None;
    }

    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Output of the last task in the pipeline, if the run got that far.
    pub fn final_output(&self) -> Option<&str> {
        if !self.is_complete() {
            return None;
        }
        self.tasks.last().and_then(Task::output)
    }

    pub fn completed_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(|t| t.status() == TaskStatus::Completed)
    }

    pub fn failed_task(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| t.status() == TaskStatus::Failed)
    }
}
