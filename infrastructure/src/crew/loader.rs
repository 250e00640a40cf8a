//! Crew file loader

use super::definition::{CrewDefinition, ToolDefinition, ToolKind};
use crate::tools::{ReadFileTool, StaticDataTool};
use crew_domain::{Agent, ConfigurationError, Pipeline, PipelineInputs, Task, Tool};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while turning a crew file into a [`Pipeline`]
#[derive(Error, Debug)]
pub enum CrewLoadError {
    #[error("Failed to read crew file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid crew file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Loads crew definition files
pub struct CrewLoader;

impl CrewLoader {
    /// Read and resolve a crew file.
    ///
    /// Relative `read_file` paths are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Pipeline, CrewLoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| CrewLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let pipeline = Self::from_str(&text, base_dir)?;
        info!(
            "Loaded crew '{}' from {} ({} task(s))",
            pipeline.name(),
            path.display(),
            pipeline.tasks().len()
        );
        Ok(pipeline)
    }

    /// Parse crew TOML, resolving relative paths against `base_dir`
    pub fn from_str(text: &str, base_dir: &Path) -> Result<Pipeline, CrewLoadError> {
        let definition: CrewDefinition = toml::from_str(text)?;
        Ok(Self::resolve(definition, base_dir)?)
    }

    /// Turn references by name into shared domain objects
    pub fn resolve(
        definition: CrewDefinition,
        base_dir: &Path,
    ) -> Result<Pipeline, ConfigurationError> {
        let mut tools: HashMap<String, Arc<dyn Tool>> = HashMap::new();
        for tool in &definition.tools {
            let key = tool_key(&tool.name);
            if tools.contains_key(&key) {
                return Err(ConfigurationError::Duplicate {
                    kind: "tool",
                    name: tool.name.clone(),
                });
            }
            tools.insert(key, build_tool(tool, base_dir)?);
        }

        let mut agents: HashMap<String, Arc<Agent>> = HashMap::new();
        for agent in &definition.agents {
            let id = agent.key().to_string();
            if agents.contains_key(&id) {
                return Err(ConfigurationError::Duplicate {
                    kind: "agent",
                    name: id,
                });
            }
            if agent.allow_delegation {
                return Err(ConfigurationError::Invalid(format!(
                    "agent '{}' sets allow_delegation, which is not supported",
                    id
                )));
            }

            let agent_tools = agent
                .tools
                .iter()
                .map(|name| {
                    tools
                        .get(&tool_key(name))
                        .cloned()
                        .ok_or_else(|| ConfigurationError::UnknownTool {
                            agent: id.clone(),
                            tool: name.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            debug!("Agent '{}' with {} tool(s)", id, agent_tools.len());
            let built = Agent::new(&agent.role, &agent.goal, &agent.backstory)
                .with_id(&id)
                .with_tools(agent_tools);
            agents.insert(id, Arc::new(built));
        }

        let mut pipeline = Pipeline::new(&definition.name)
            .with_process(definition.process)
            .with_inputs(PipelineInputs::from(definition.inputs));

        let mut task_ids = HashSet::new();
        for (index, task) in definition.tasks.iter().enumerate() {
            let id = task
                .id
                .clone()
                .unwrap_or_else(|| format!("task_{}", index + 1));
            if !task_ids.insert(id.clone()) {
                return Err(ConfigurationError::Duplicate { kind: "task", name: id });
            }

            let agent = agents
                .get(&task.agent)
                .cloned()
                .ok_or_else(|| ConfigurationError::UnknownAgent {
                    task: id.clone(),
                    agent: task.agent.clone(),
                })?;

            pipeline = pipeline.with_task(
                Task::new(id, &task.description)
                    .with_expected_output(&task.expected_output)
                    .with_agent(agent),
            );
        }

        Ok(pipeline)
    }
}

/// Tool names are matched the way the model's requests are: ignoring case
fn tool_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn build_tool(tool: &ToolDefinition, base_dir: &Path) -> Result<Arc<dyn Tool>, ConfigurationError> {
    if tool.name.trim().is_empty() {
        return Err(ConfigurationError::Invalid("tool name must not be empty".to_string()));
    }

    match tool.kind {
        ToolKind::Static => {
            let text = tool.text.clone().ok_or_else(|| {
                ConfigurationError::Invalid(format!("static tool '{}' has no text", tool.name))
            })?;
            Ok(Arc::new(StaticDataTool::new(&tool.name, &tool.description, text)))
        }
        ToolKind::ReadFile => {
            let dir = match &tool.path {
                Some(path) if path.is_absolute() => path.clone(),
                Some(path) => base_dir.join(path),
                None => base_dir.to_path_buf(),
            };
            let mut reader = ReadFileTool::new(dir).with_name(&tool.name);
            if !tool.description.is_empty() {
                reader = reader.with_description(&tool.description);
            }
            Ok(Arc::new(reader))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_domain::ProcessMode;
    use std::fs;

    const FEATURE_DESIGN: &str = r#"
name = "feature_design"
process = "sequential"

[inputs]
product_name = "TechPro Suite"

[[tools]]
name = "Market Research Data Fetcher"
description = "Fetches market research data."
kind = "static"
text = "Market Research Summary:\n- 3 competitors"

[[agents]]
id = "market_analyst"
role = "Market Research Analyst"
goal = "Analyze the market."
backstory = "Expert researcher."
tools = ["Market Research Data Fetcher"]

[[agents]]
role = "UX Designer"
goal = "Design interfaces."
backstory = "UX expert."

[[tasks]]
id = "market_analysis"
description = "Analyze the market for {product_name}"
expected_output = "A market report"
agent = "market_analyst"

[[tasks]]
description = "Design the UX"
agent = "UX Designer"
"#;

    fn load(text: &str) -> Result<Pipeline, CrewLoadError> {
        CrewLoader::from_str(text, Path::new("."))
    }

    fn configuration_error(text: &str) -> ConfigurationError {
        match load(text) {
            Err(CrewLoadError::Configuration(e)) => e,
            other => panic!("expected configuration error, got {:?}", other.map(|p| p.name().to_string())),
        }
    }

    #[test]
    fn test_load_resolves_references() {
        let pipeline = load(FEATURE_DESIGN).unwrap();
        assert_eq!(pipeline.name(), "feature_design");
        assert_eq!(pipeline.process(), ProcessMode::Sequential);
        assert_eq!(pipeline.inputs().get("product_name"), Some("TechPro Suite"));

        let tasks = pipeline.tasks();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id.as_str(), "market_analysis");
        assert_eq!(tasks[1].id.as_str(), "task_2");

        let analyst = tasks[0].agent().unwrap();
        assert_eq!(analyst.role(), "Market Research Analyst");
        assert_eq!(analyst.tool_names(), vec!["Market Research Data Fetcher"]);
        assert_eq!(
            analyst.tool("market research data fetcher").unwrap().run("x").unwrap(),
            "Market Research Summary:\n- 3 competitors"
        );
        assert!(!tasks[1].agent().unwrap().has_tools());
        assert!(pipeline.validate().is_ok());
    }

    #[test]
    fn test_agents_are_shared_between_tasks() {
        let text = r#"
name = "shared"
[[agents]]
role = "Writer"
goal = "g"
backstory = "b"
[[tasks]]
description = "one"
agent = "Writer"
[[tasks]]
description = "two"
agent = "Writer"
"#;
        let pipeline = load(text).unwrap();
        let first = pipeline.tasks()[0].agent().unwrap();
        let second = pipeline.tasks()[1].agent().unwrap();
        assert!(Arc::ptr_eq(first, second));
    }

    #[test]
    fn test_unknown_agent() {
        let text = FEATURE_DESIGN.replace("agent = \"UX Designer\"", "agent = \"ghost\"");
        assert_eq!(
            configuration_error(&text),
            ConfigurationError::UnknownAgent {
                task: "task_2".to_string(),
                agent: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_tool() {
        let text = FEATURE_DESIGN.replace(
            "tools = [\"Market Research Data Fetcher\"]",
            "tools = [\"Crystal Ball\"]",
        );
        assert_eq!(
            configuration_error(&text),
            ConfigurationError::UnknownTool {
                agent: "market_analyst".to_string(),
                tool: "Crystal Ball".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_task_id() {
        let text = FEATURE_DESIGN.replace("description = \"Design the UX\"", "id = \"market_analysis\"\ndescription = \"Design the UX\"");
        assert!(matches!(
            configuration_error(&text),
            ConfigurationError::Duplicate { kind: "task", .. }
        ));
    }

    #[test]
    fn test_duplicate_tool_name_ignores_case() {
        let text = r#"
name = "dup"
[[tools]]
name = "Fetcher"
kind = "static"
text = "a"
[[tools]]
name = "fetcher"
kind = "static"
text = "b"
"#;
        assert!(matches!(
            configuration_error(text),
            ConfigurationError::Duplicate { kind: "tool", .. }
        ));
    }

    #[test]
    fn test_static_tool_without_text() {
        let text = r#"
name = "broken"
[[tools]]
name = "Fetcher"
kind = "static"
"#;
        assert!(matches!(configuration_error(text), ConfigurationError::Invalid(_)));
    }

    #[test]
    fn test_delegation_is_rejected() {
        let text = FEATURE_DESIGN.replace(
            "backstory = \"UX expert.\"",
            "backstory = \"UX expert.\"\nallow_delegation = true",
        );
        assert!(matches!(configuration_error(&text), ConfigurationError::Invalid(m) if m.contains("allow_delegation")));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        assert!(matches!(load("name = "), Err(CrewLoadError::Parse(_))));
    }

    #[test]
    fn test_parallel_loads_but_does_not_validate() {
        let text = FEATURE_DESIGN.replace("process = \"sequential\"", "process = \"parallel\"");
        let pipeline = load(&text).unwrap();
        assert!(matches!(
            pipeline.validate(),
            Err(ConfigurationError::UnsupportedProcessMode(_))
        ));
    }

    #[test]
    fn test_load_file_resolves_read_file_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data/tickets.txt"), "120 open tickets").unwrap();
        let crew_path = dir.path().join("support.toml");
        fs::write(
            &crew_path,
            r#"
name = "support"
[[tools]]
name = "Ticket Reader"
kind = "read_file"
path = "data"
[[agents]]
role = "Analyst"
goal = "g"
backstory = "b"
tools = ["Ticket Reader"]
[[tasks]]
description = "Read tickets"
agent = "Analyst"
"#,
        )
        .unwrap();

        let pipeline = CrewLoader::load(&crew_path).unwrap();
        let agent = pipeline.tasks()[0].agent().unwrap();
        assert_eq!(
            agent.tool("Ticket Reader").unwrap().run("tickets.txt").unwrap(),
            "120 open tickets"
        );
    }

    #[test]
    fn test_demo_crews_load() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos");
        for (file, tasks) in [
            ("feature_design.toml", 3),
            ("philosophy_panel.toml", 5),
            ("support_analysis.toml", 3),
        ] {
            let pipeline = CrewLoader::load(&demos.join(file)).unwrap();
            assert_eq!(pipeline.tasks().len(), tasks, "{}", file);
            assert!(pipeline.validate().is_ok(), "{}", file);
        }

        let support = CrewLoader::load(&demos.join("support_analysis.toml")).unwrap();
        let reader = support.tasks()[0]
            .agent()
            .unwrap()
            .tool("Support Ticket Reader")
            .cloned()
            .unwrap();
        assert!(reader.run("tickets_sample.csv").unwrap().starts_with("id,opened"));

        let analysis = support.tasks()[0].rendered(support.inputs());
        assert!(
            analysis
                .description
                .contains("data from 2025-03-01 to 2025-03-31")
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CrewLoader::load(Path::new("/nonexistent/crew.toml")).unwrap_err();
        assert!(matches!(err, CrewLoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/crew.toml"));
    }
}
