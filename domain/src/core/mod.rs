//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - language models the LLM client can target
//! - [`temperature::Temperature`] - validated sampling temperature
//! - [`error::ConfigurationError`] - fatal setup errors raised before a run
//! - [`validation::ConfigIssue`] - non-fatal and fatal settings issues

pub mod error;
pub mod model;
pub mod temperature;
pub mod validation;
