//! Orchestration domain entities

use super::mode::ProcessMode;
use super::value_objects::{PipelineInputs, TaskId};
use crate::agent::entities::Agent;
use crate::core::error::ConfigurationError;
use crate::prompt::template::render_template;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task is waiting to be executed
    #[default]
    Pending,
    /// Task is currently being executed
    Running,
    /// Task completed successfully
    Completed,
    /// Task failed
    Failed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    /// Allowed moves: `Pending -> Running -> {Completed | Failed}`.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        matches!(
            (self, next),
            (TaskStatus::Pending, TaskStatus::Running)
                | (TaskStatus::Running, TaskStatus::Completed)
                | (TaskStatus::Running, TaskStatus::Failed)
        )
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single unit of pipeline work.
///
/// The description may contain `{input}` placeholders that are filled from
/// the pipeline inputs before the run starts. `expected_output` is guidance
/// for the model and is not enforced.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub expected_output: String,
    agent: Option<Arc<Agent>>,
    status: TaskStatus,
    output: Option<String>,
    error: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            expected_output: String::new(),
            agent: None,
            status: TaskStatus::Pending,
            output: None,
            error: None,
        }
    }

    pub fn with_expected_output(mut self, expected_output: impl Into<String>) -> Self {
        self.expected_output = expected_output.into();
        self
    }

    pub fn with_agent(mut self, agent: Arc<Agent>) -> Self {
        self.agent = Some(agent);
        self
    }

    pub fn agent(&self) -> Option<&Arc<Agent>> {
        self.agent.as_ref()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A fresh copy of this task with its description rendered from `inputs`.
    pub fn rendered(&self, inputs: &PipelineInputs) -> Task {
        Task {
            id: self.id.clone(),
            description: render_template(&self.description, inputs),
            expected_output: render_template(&self.expected_output, inputs),
            agent: self.agent.clone(),
            status: TaskStatus::Pending,
            output: None,
            error: None,
        }
    }

    /// Move `Pending -> Running`. Returns false if the move is not allowed.
    pub fn mark_running(&mut self) -> bool {
        self.transition(TaskStatus::Running)
    }

    /// Move `Running -> Completed` and record the output.
    pub fn mark_completed(&mut self, output: impl Into<String>) -> bool {
        if !self.transition(TaskStatus::Completed) {
            return false;
        }
        self.output = Some(output.into());
        true
    }

    /// Move `Running -> Failed` and record the reason.
    pub fn mark_failed(&mut self, reason: impl Into<String>) -> bool {
        if !self.transition(TaskStatus::Failed) {
            return false;
        }
        self.error = Some(reason.into());
        true
    }

    fn transition(&mut self, next: TaskStatus) -> bool {
        if !self.status.can_transition_to(next) {
            return false;
        }
        self.status = next;
        true
    }
}

/// An ordered list of tasks executed as one pipeline.
///
/// Insertion order is execution order and never changes once built.
#[derive(Debug, Clone)]
pub struct Pipeline {
    name: String,
    tasks: Vec<Task>,
    process: ProcessMode,
    inputs: PipelineInputs,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
            process: ProcessMode::default(),
            inputs: PipelineInputs::default(),
        }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn with_process(mut self, process: ProcessMode) -> Self {
        self.process = process;
        self
    }

    /// Default inputs; run-time inputs are layered on top of these.
    pub fn with_inputs(mut self, inputs: PipelineInputs) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn process(&self) -> ProcessMode {
        self.process
    }

    pub fn inputs(&self) -> &PipelineInputs {
        &self.inputs
    }

    /// Check that the pipeline can be executed at all.
    ///
    /// Fails when there are no tasks, when a task has no agent, or when the
    /// process mode is not executable.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.process.is_supported() {
            return Err(ConfigurationError::UnsupportedProcessMode(
                self.process.to_string(),
            ));
        }
        if self.tasks.is_empty() {
            return Err(ConfigurationError::EmptyPipeline(self.name.clone()));
        }
        if let Some(task) = self.tasks.iter().find(|t| t.agent().is_none()) {
            return Err(ConfigurationError::MissingAgent(task.id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> Arc<Agent> {
        Arc::new(Agent::new("Zen Master", "Analyze mindfully", "A Zen master."))
    }

    #[test]
    fn test_task_lifecycle() {
        let mut task = Task::new("analysis", "Analyze the topic").with_agent(agent());
        assert_eq!(task.status(), TaskStatus::Pending);

        assert!(task.mark_running());
        assert_eq!(task.status(), TaskStatus::Running);

        assert!(task.mark_completed("insight"));
        assert_eq!(task.status(), TaskStatus::Completed);
        assert_eq!(task.output(), Some("insight"));
        assert!(task.status().is_terminal());
    }

    #[test]
    fn test_invalid_transitions_are_refused() {
        let mut task = Task::new("analysis", "Analyze");

        // Cannot complete or fail a task that never started
        assert!(!task.mark_completed("too early"));
        assert!(!task.mark_failed("too early"));
        assert_eq!(task.status(), TaskStatus::Pending);
        assert!(task.output().is_none());

        assert!(task.mark_running());
        assert!(task.mark_failed("backend down"));
        assert_eq!(task.error(), Some("backend down"));

        // Terminal states stay terminal
        assert!(!task.mark_running());
        assert!(!task.mark_completed("late"));
        assert_eq!(task.status(), TaskStatus::Failed);
    }

    #[test]
    fn test_rendered_task_is_fresh() {
        let mut task = Task::new("design", "Design features for {product_name}")
            .with_expected_output("A spec for {product_name}")
            .with_agent(agent());
        task.mark_running();

        let inputs = PipelineInputs::new().with("product_name", "TechPro Suite");
        let rendered = task.rendered(&inputs);

        assert_eq!(rendered.description, "Design features for TechPro Suite");
        assert_eq!(rendered.expected_output, "A spec for TechPro Suite");
        assert_eq!(rendered.status(), TaskStatus::Pending);
        assert!(rendered.agent().is_some());
    }

    #[test]
    fn test_validate_requires_agents() {
        let pipeline = Pipeline::new("crew")
            .with_task(Task::new("t1", "first").with_agent(agent()))
            .with_task(Task::new("t2", "second"));

        assert_eq!(
            pipeline.validate(),
            Err(ConfigurationError::MissingAgent("t2".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_empty_and_parallel() {
        assert_eq!(
            Pipeline::new("empty").validate(),
            Err(ConfigurationError::EmptyPipeline("empty".to_string()))
        );

        let parallel = Pipeline::new("panel")
            .with_process(ProcessMode::Parallel)
            .with_task(Task::new("t1", "first").with_agent(agent()));
        assert_eq!(
            parallel.validate(),
            Err(ConfigurationError::UnsupportedProcessMode("parallel".to_string()))
        );
    }

    #[test]
    fn test_validate_ok() {
        let pipeline = Pipeline::new("crew")
            .with_task(Task::new("t1", "first").with_agent(agent()))
            .with_task(Task::new("t2", "second").with_agent(agent()));
        assert!(pipeline.validate().is_ok());
        assert_eq!(pipeline.tasks().len(), 2);
        assert_eq!(pipeline.process(), ProcessMode::Sequential);
    }
}
