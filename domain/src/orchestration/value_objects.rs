//! Orchestration value objects
//!
//! # Identifiers
//! - [`TaskId`] - Identifier of a task within a pipeline
//!
//! # Run Data
//! - [`PipelineInputs`] - Named string inputs substituted into task descriptions
//! - [`RunContext`] - Append-only accumulation of completed task outputs

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Identifier of a task within a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a TaskId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for TaskId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named string inputs of a pipeline run (e.g. `product_name`, `topic`).
///
/// Keys are kept sorted so rendering and logging are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineInputs(BTreeMap<String, String>);

impl PipelineInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Layer `overrides` on top of these inputs; overrides win on conflicts.
    pub fn merged_with(&self, overrides: &PipelineInputs) -> PipelineInputs {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.insert(key, value);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PipelineInputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<HashMap<String, String>> for PipelineInputs {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for PipelineInputs {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Output of one completed task, as recorded in the [`RunContext`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub task_id: TaskId,
    pub agent_role: String,
    pub output: String,
}

/// Append-only accumulation of completed task outputs within one run.
///
/// Entries are kept in completion order, which for a sequential pipeline is
/// task order. There is no way to remove or rewrite an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    entries: Vec<ContextEntry>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        task_id: TaskId,
        agent_role: impl Into<String>,
        output: impl Into<String>,
    ) {
        self.entries.push(ContextEntry {
            task_id,
            agent_role: agent_role.into(),
            output: output.into(),
        });
    }

    pub fn entries(&self) -> &[ContextEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Output of the most recently completed task
    pub fn last_output(&self) -> Option<&str> {
        self.entries.last().map(|e| e.output.as_str())
    }

    /// Render all outputs, in order, for inclusion in a prompt.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("--- {} ({}) ---\n{}", e.task_id, e.agent_role, e.output))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl std::fmt::Display for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_merge_prefers_overrides() {
        let defaults = PipelineInputs::new()
            .with("product_name", "TechPro Suite")
            .with("quarter", "Q3");
        let overrides = PipelineInputs::new().with("product_name", "Acme CRM");

        let merged = defaults.merged_with(&overrides);
        assert_eq!(merged.get("product_name"), Some("Acme CRM"));
        assert_eq!(merged.get("quarter"), Some("Q3"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_inputs_from_iter() {
        let inputs: PipelineInputs = [("topic", "The Nature of Freedom")].into_iter().collect();
        assert_eq!(inputs.get("topic"), Some("The Nature of Freedom"));
        assert!(inputs.get("missing").is_none());
    }

    #[test]
    fn test_context_renders_in_append_order() {
        let mut context = RunContext::new();
        assert!(context.is_empty());

        context.append(TaskId::new("market_analysis"), "Market Analyst", "A");
        context.append(TaskId::new("feature_design"), "Product Manager", "B");

        let rendered = context.render();
        let a = rendered.find("\nA").unwrap();
        let b = rendered.find("\nB").unwrap();
        assert!(a < b);
        assert_eq!(context.len(), 2);
        assert_eq!(context.last_output(), Some("B"));
        assert!(rendered.starts_with("--- market_analysis (Market Analyst) ---"));
    }
}
