//! Shared utilities for use cases.
//!
//! Contains cancellation checking used by the agent executor and the
//! pipeline engine.

use super::execute_task::AgentError;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(AgentError::Cancelled)` if the token is cancelled.
pub(crate) fn check_cancelled(token: &CancellationToken) -> Result<(), AgentError> {
    if token.is_cancelled() {
        return Err(AgentError::Cancelled);
    }
    Ok(())
}
