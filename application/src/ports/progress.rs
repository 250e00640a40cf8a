//! Progress notification port
//!
//! Defines the interface for reporting progress during a pipeline run.

use crew_domain::{PipelineRun, Task};

/// Callback for progress updates during a pipeline run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain log lines, etc.)
pub trait PipelineProgressNotifier: Send + Sync {
    /// Called once the run passed its startup checks
    fn on_run_start(&self, _pipeline: &str, _total_tasks: usize) {}

    /// Called when a task goes Running. `index` is 0-based.
    fn on_task_start(&self, _task: &Task, _index: usize, _total: usize) {}

    /// Called before an agent's tool is executed
    fn on_tool_call(&self, _tool: &str, _input: &str) {}

    /// Called after a tool returned (or failed; `success` is false then)
    fn on_tool_result(&self, _tool: &str, _success: bool) {}

    /// Called when a task reaches a terminal state
    fn on_task_complete(&self, _task: &Task, _index: usize) {}

    /// Called when the run finished, successfully or not
    fn on_run_complete(&self, _run: &PipelineRun) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl PipelineProgressNotifier for NoProgress {}
