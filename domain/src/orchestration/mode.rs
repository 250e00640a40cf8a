//! Process mode definitions.
//!
//! Defines [`ProcessMode`], the scheduling strategy of a pipeline. Only
//! [`ProcessMode::Sequential`] is executed: every task depends on the output
//! of the ones before it. [`ProcessMode::Parallel`] exists so crew files can
//! name it and receive a clear configuration error instead of silently
//! running sequentially.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheduling strategy for the tasks of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessMode {
    /// One task at a time, in insertion order, context flowing forward
    #[default]
    Sequential,
    /// Independent tasks at the same time (not executed)
    Parallel,
}

impl ProcessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessMode::Sequential => "sequential",
            ProcessMode::Parallel => "parallel",
        }
    }

    /// Check if the engine can execute this mode
    pub fn is_supported(&self) -> bool {
        matches!(self, ProcessMode::Sequential)
    }
}

impl fmt::Display for ProcessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProcessMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(ProcessMode::Sequential),
            "parallel" => Ok(ProcessMode::Parallel),
            other => Err(format!(
                "unknown process mode '{}' (expected 'sequential' or 'parallel')",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sequential() {
        assert_eq!(ProcessMode::default(), ProcessMode::Sequential);
        assert!(ProcessMode::default().is_supported());
    }

    #[test]
    fn test_parallel_is_not_supported() {
        assert!(!ProcessMode::Parallel.is_supported());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Sequential".parse::<ProcessMode>(), Ok(ProcessMode::Sequential));
        assert_eq!("parallel".parse::<ProcessMode>(), Ok(ProcessMode::Parallel));
        assert!("hierarchical".parse::<ProcessMode>().is_err());
    }
}
