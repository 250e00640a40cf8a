//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod llm_client;
pub mod progress;
pub mod retrying_client;
