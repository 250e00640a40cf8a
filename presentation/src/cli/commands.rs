//! CLI command definitions

use clap::{Parser, ValueEnum};
use crew_domain::PipelineInputs;
use std::path::PathBuf;

/// Output format for pipeline results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Findings and recommendations only
    Summary,
    /// The report as JSON
    Json,
    /// Every task output followed by the report
    Full,
}

impl From<OutputFormat> for crew_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Summary => crew_domain::OutputFormat::Summary,
            OutputFormat::Json => crew_domain::OutputFormat::Json,
            OutputFormat::Full => crew_domain::OutputFormat::Full,
        }
    }
}

/// CLI arguments for crew-pipeline
#[derive(Parser, Debug)]
#[command(name = "crew-pipeline")]
#[command(author, version, about = "Run a crew of role-playing LLM agents through a sequential task pipeline")]
#[command(long_about = r#"
crew-pipeline runs a crew of role-specialized agents over an ordered list of
tasks. Each task sees the outputs of the tasks before it, and the last output
is turned into a report of findings and recommendations.

Crews are TOML files listing tools, agents and tasks. Task descriptions may
reference inputs as {name}; inputs come from the crew file's [inputs] table
and from -i key=value.

Configuration files are loaded from (in priority order):
1. CREW_<SECTION>__<KEY> environment variables
2. --config <path>     Explicit config file
3. ./crew-pipeline.toml or ./.crew-pipeline.toml   Project-level config
4. ~/.config/crew-pipeline/config.toml   Global config

Example:
  crew-pipeline demos/feature_design.toml
  crew-pipeline demos/philosophy_panel.toml -i topic="The Nature of Time" -o full
  crew-pipeline demos/support_analysis.toml -t 0.2 --save-report reports
"#)]
pub struct Cli {
    /// Crew definition file
    #[arg(value_name = "CREW_FILE", required_unless_present = "show_config")]
    pub crew: Option<PathBuf>,

    /// Pipeline input, overriding the crew file (can be specified multiple times)
    #[arg(short, long = "input", value_name = "KEY=VALUE", value_parser = parse_input)]
    pub inputs: Vec<(String, String)>,

    /// Sampling temperature for every agent, in [0.0, 1.0]
    #[arg(short, long, value_name = "TEMP")]
    pub temperature: Option<f64>,

    /// Output format (defaults to the configured format, then summary)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Save the JSON report, optionally into DIR
    #[arg(long, value_name = "DIR", num_args = 0..=1)]
    pub save_report: Option<Option<PathBuf>>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// `-i` values as pipeline inputs; a repeated key keeps the last value
    pub fn pipeline_inputs(&self) -> PipelineInputs {
        self.inputs.iter().cloned().collect()
    }
}

/// Parse `key=value`. The value may itself contain `=`.
fn parse_input(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty input name in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "crew-pipeline",
            "crew.toml",
            "-i",
            "product_name=TechPro Suite",
            "--input",
            "query=a=b",
            "-t",
            "0.7",
            "-o",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.crew, Some(PathBuf::from("crew.toml")));
        assert_eq!(cli.temperature, Some(0.7));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert!(cli.save_report.is_none());

        let inputs = cli.pipeline_inputs();
        assert_eq!(inputs.get("product_name"), Some("TechPro Suite"));
        assert_eq!(inputs.get("query"), Some("a=b"));
    }

    #[test]
    fn test_save_report_with_and_without_dir() {
        let cli = Cli::try_parse_from(["crew-pipeline", "crew.toml", "--save-report"]).unwrap();
        assert_eq!(cli.save_report, Some(None));

        let cli =
            Cli::try_parse_from(["crew-pipeline", "crew.toml", "--save-report", "reports"]).unwrap();
        assert_eq!(cli.save_report, Some(Some(PathBuf::from("reports"))));
    }

    #[test]
    fn test_crew_file_required_unless_show_config() {
        assert!(Cli::try_parse_from(["crew-pipeline"]).is_err());
        let cli = Cli::try_parse_from(["crew-pipeline", "--show-config"]).unwrap();
        assert!(cli.crew.is_none());
    }

    #[test]
    fn test_parse_input_rejects_malformed() {
        assert!(parse_input("no-equals").is_err());
        assert!(parse_input("=value").is_err());
        assert_eq!(parse_input("k=").unwrap(), ("k".to_string(), String::new()));
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        assert_eq!(
            crew_domain::OutputFormat::from(OutputFormat::Full),
            crew_domain::OutputFormat::Full
        );
    }
}
