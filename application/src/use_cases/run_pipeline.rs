//! Run Pipeline use case
//!
//! The sequential process engine: validates the pipeline, builds the run's
//! LLM client, then executes tasks one after another, feeding each the
//! outputs of the ones before it.

use crate::config::ExecutionParams;
use crate::ports::llm_client::{LlmClientFactory, LlmSettings};
use crate::ports::progress::{NoProgress, PipelineProgressNotifier};
use crate::ports::retrying_client::RetryingLlmClient;
use crate::use_cases::execute_task::AgentExecutor;
use crew_domain::{
    ConfigurationError, Pipeline, PipelineInputs, PipelineRun, Temperature, parse_report,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Errors that prevent a run from starting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunPipelineError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Input for the RunPipeline use case
#[derive(Debug, Clone, Default)]
pub struct RunPipelineInput {
    /// Values for `{placeholder}`s, layered over the pipeline's defaults
    pub inputs: PipelineInputs,
    /// Overrides the configured temperature for this run
    pub temperature: Option<f64>,
}

impl RunPipelineInput {
    pub fn new(inputs: PipelineInputs) -> Self {
        Self {
            inputs,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Outcome of an invocation.
#[derive(Debug)]
pub enum RunInvocation {
    /// The run executed; see [`PipelineRun::status`] for how it ended.
    Finished(PipelineRun),
    /// Another run of this engine was still in progress; nothing was done.
    AlreadyRunning,
}

impl RunInvocation {
    pub fn into_run(self) -> Option<PipelineRun> {
        match self {
            RunInvocation::Finished(run) => Some(run),
            RunInvocation::AlreadyRunning => None,
        }
    }
}

/// Resets the running flag when the run ends, however it ends.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Use case for running a pipeline
///
/// The engine holds no per-run state apart from its `running` flag;
/// everything a run produces is returned in a [`PipelineRun`].
pub struct RunPipelineUseCase<F: LlmClientFactory + 'static> {
    factory: Arc<F>,
    pipeline: Pipeline,
    settings: LlmSettings,
    params: ExecutionParams,
    running: AtomicBool,
}

impl<F: LlmClientFactory + 'static> RunPipelineUseCase<F> {
    pub fn new(factory: Arc<F>, pipeline: Pipeline, settings: LlmSettings) -> Self {
        Self {
            factory,
            pipeline,
            settings,
            params: ExecutionParams::default(),
            running: AtomicBool::new(false),
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunPipelineInput,
    ) -> Result<RunInvocation, RunPipelineError> {
        self.execute_with_progress(input, &NoProgress, CancellationToken::new())
            .await
    }

    /// Execute the use case with progress callbacks and cancellation
    pub async fn execute_with_progress(
        &self,
        input: RunPipelineInput,
        progress: &dyn PipelineProgressNotifier,
        cancel: CancellationToken,
    ) -> Result<RunInvocation, RunPipelineError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(
                "Pipeline '{}' is already running; ignoring invocation",
                self.pipeline.name()
            );
            return Ok(RunInvocation::AlreadyRunning);
        }
        let _guard = RunningGuard(&self.running);

        // Startup checks, all before any task runs
        let settings = match input.temperature {
            Some(value) => self.settings.clone().with_temperature(Temperature::new(value)?),
            None => self.settings.clone(),
        };
        self.pipeline.validate()?;
        let client = self.factory.create(&settings)?;
        let client = Arc::new(RetryingLlmClient::new(client, self.params.retry.clone()));
        let executor = AgentExecutor::new(client, self.params.max_tool_turns);

        let inputs = self.pipeline.inputs().merged_with(&input.inputs);
        let tasks = self
            .pipeline
            .tasks()
            .iter()
            .map(|task| task.rendered(&inputs))
            .collect();
        let mut run = PipelineRun::new(self.pipeline.name(), tasks);
        let total = run.tasks.len();

        info!(
            "Starting pipeline '{}' with {} tasks (model {}, temperature {})",
            self.pipeline.name(),
            total,
            settings.model,
            settings.temperature
        );
        progress.on_run_start(self.pipeline.name(), total);

        for index in 0..total {
            let task = &mut run.tasks[index];
            let Some(agent) = task.agent().cloned() else {
                // validate() guarantees an agent; keep the run consistent anyway
                let task_id = task.id.clone();
                task.mark_running();
                task.mark_failed("no agent assigned");
                run.fail(task_id, "no agent assigned");
                break;
            };

            task.mark_running();
            info!("Task {}/{} '{}' started by {}", index + 1, total, task.id, agent.role());
            progress.on_task_start(task, index, total);

            // The executor checks `cancel` before every model call
            let snapshot = task.clone();
            let result = executor
                .execute(&agent, &snapshot, &run.context, &cancel, progress)
                .await;

            let task = &mut run.tasks[index];
            match result {
                Ok(output) => {
                    task.mark_completed(output.clone());
                    info!("Task '{}' completed", task.id);
                    progress.on_task_complete(task, index);
                    let task_id = task.id.clone();
                    run.context.append(task_id, agent.role(), output);
                }
                Err(e) => {
                    let reason = e.to_string();
                    task.mark_failed(reason.clone());
                    error!("Task '{}' failed: {}", task.id, reason);
                    progress.on_task_complete(task, index);
                    let task_id = task.id.clone();
                    run.fail(task_id, reason);
                    break;
                }
            }
        }

        if !run.status.is_terminal() {
            let final_output = run.tasks.last().and_then(|t| t.output()).unwrap_or_default();
            let report = parse_report(final_output);
            info!(
                "Pipeline '{}' completed: {} findings, {} recommendations",
                self.pipeline.name(),
                report.findings.len(),
                report.recommendations.len()
            );
            run.complete(report);
        }

        progress.on_run_complete(&run);
        Ok(RunInvocation::Finished(run))
    }
}
