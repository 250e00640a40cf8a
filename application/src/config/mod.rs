//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`ExecutionParams`] - per-task loop control (tool turns) and retries
//! - [`RetryPolicy`] - exponential backoff for transient LLM failures

pub mod execution_params;
pub mod retry_policy;

pub use execution_params::ExecutionParams;
pub use retry_policy::RetryPolicy;
