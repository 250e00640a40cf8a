//! CLI entrypoint for crew-pipeline
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use colored::Colorize;
use crew_application::{NoProgress, RunPipelineInput, RunPipelineUseCase};
use crew_infrastructure::{ConfigLoader, CrewLoader, FileConfig, GeminiClientFactory, ReportWriter};
use crew_presentation::{Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    check_config(&config)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Crew ===
    let crew_path = cli
        .crew
        .as_ref()
        .ok_or_else(|| anyhow!("A crew file is required"))?;
    let pipeline = CrewLoader::load(crew_path)?;
    let crew_name = pipeline.name().to_string();
    info!("Starting crew '{}'", crew_name);

    // === Dependency Injection ===
    let settings = config.llm.to_settings()?;
    let factory = Arc::new(GeminiClientFactory::from_env(config.llm.to_gemini_config()));
    let use_case = RunPipelineUseCase::new(factory, pipeline, settings)
        .with_params(config.to_execution_params());

    let mut input = RunPipelineInput::new(cli.pipeline_inputs());
    if let Some(temperature) = cli.temperature {
        input = input.with_temperature(temperature);
    }

    // Ctrl-C cancels the run; the current task fails with "Cancelled"
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling run");
            on_interrupt.cancel();
        }
    });

    if !cli.quiet {
        eprintln!();
        eprintln!("{} {}", "Crew:".cyan().bold(), crew_name);
        eprintln!(
            "{} {} (temperature {})",
            "Model:".cyan().bold(),
            config.llm.model,
            cli.temperature.unwrap_or(config.llm.temperature)
        );
        eprintln!();
    }

    let invocation = if cli.quiet {
        use_case.execute_with_progress(input, &NoProgress, cancel).await?
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress, cancel).await?
    } else {
        use_case.execute_with_progress(input, &SimpleProgress, cancel).await?
    };

    let Some(run) = invocation.into_run() else {
        bail!("Crew '{}' is already running", crew_name);
    };

    if !run.is_complete() {
        eprintln!("{}", ConsoleFormatter::format_failure(&run));
        bail!("Crew '{}' did not complete", crew_name);
    }

    // Output results
    let format = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    println!("{}", ConsoleFormatter.format(&run, format));

    if let Some(dir) = &cli.save_report {
        let dir = dir
            .clone()
            .or_else(|| config.output.report_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let report = run.report.clone().unwrap_or_default();
        let path = ReportWriter::new(dir)
            .write(&crew_name, &report)
            .context("Failed to save report")?;
        if !cli.quiet {
            eprintln!("{} {}", "Report saved to".green(), path.display());
        }
    }

    Ok(())
}

/// Print configuration issues; errors abort before anything runs
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("{} {}", "config error:".red().bold(), issue);
        } else {
            eprintln!("{} {}", "config warning:".yellow().bold(), issue);
        }
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("Configuration has {} error(s)", errors);
    }
    Ok(())
}
