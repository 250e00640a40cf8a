//! Pipeline orchestration domain
//!
//! This module contains the task/pipeline data model and the per-run state
//! produced by the sequential process engine:
//!
//! - [`Task`](entities::Task) / [`TaskStatus`](entities::TaskStatus) - one unit of work and its
//!   `Pending -> Running -> {Completed | Failed}` lifecycle
//! - [`Pipeline`](entities::Pipeline) - ordered tasks plus default inputs
//! - [`ProcessMode`](mode::ProcessMode) - how tasks are scheduled
//! - [`RunContext`](value_objects::RunContext) - append-only output of completed tasks
//! - [`PipelineRun`](run::PipelineRun) - everything one run produced, owned by the caller

pub mod entities;
pub mod mode;
pub mod run;
pub mod value_objects;
