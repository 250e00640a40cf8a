//! Gemini adapter
//!
//! Implements the [`LlmClient`](crew_application::LlmClient) port over the
//! Gemini `generateContent` REST endpoint.

mod client;
mod factory;
mod protocol;

pub use client::{GeminiClient, GeminiConfig};
pub use factory::GeminiClientFactory;
