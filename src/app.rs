//! Entry-point plumbing shared by the binaries.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any failure (missing input table, bad config, unwritable output, ...)

use crate::cli::Args;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::ReportError;
use crate::pipeline::{Pipeline, RunSummary, Selection};
use crate::progress::Progress;
use crate::report::{format_sweep_statistics, write_atomic};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

const BANNER_WIDTH: usize = 80;

/// Options that shape console output and extra artifacts.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub quiet: bool,
    pub metrics_json: Option<PathBuf>,
}

/// Initialize logging at the given level. Logs go to stderr.
pub fn init_logging(level: tracing::Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Entry point of the main binary.
pub fn run_with_args(args: Args) -> i32 {
    if args.init_config {
        return match handle_init_config() {
            Ok(code) => code,
            Err(e) => report_failure(&e),
        };
    }

    if let Err(e) = init_logging(args.log_level()) {
        eprintln!("Warning: {:#}", e);
    }

    info!("PageReport v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    let result = load_config(args.config.as_deref()).and_then(|mut config| {
        config.merge_with_args(&args);
        let options = RunOptions {
            quiet: args.quiet,
            metrics_json: args.metrics_json.clone(),
        };
        execute(&config, Selection::from(args.part), &options)
    });

    match result {
        Ok(_) => 0,
        Err(e) => report_failure(&e),
    }
}

/// Entry point of the fixed-selection binaries, which take no arguments.
pub fn run_fixed(selection: Selection) -> i32 {
    if let Err(e) = init_logging(tracing::Level::INFO) {
        eprintln!("Warning: {:#}", e);
    }

    let result = load_config(None)
        .and_then(|config| execute(&config, selection, &RunOptions::default()));

    match result {
        Ok(_) => 0,
        Err(e) => report_failure(&e),
    }
}

fn report_failure(e: &anyhow::Error) -> i32 {
    error!("Run failed: {:#}", e);
    eprintln!("\n❌ Error: {:#}", e);
    if let Some(hint) = failure_hint(e) {
        eprintln!("   {}", hint);
    }
    1
}

/// Extra advice for failures the user can fix by rerunning the simulator.
fn failure_hint(e: &anyhow::Error) -> Option<&'static str> {
    e.downcast_ref::<ReportError>()
        .filter(|err| err.is_missing_input())
        .map(|_| "Run the simulator for every algorithm (FIFO, OPT, CLK) before generating plots.")
}

/// Handle --init-config: generate a default .pagereport.toml.
pub fn handle_init_config() -> Result<i32> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        return Ok(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to customize paths, the pivot frame count and chart styling.");
    Ok(0)
}

/// Load configuration from file or use defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(config_path) = explicit {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}

/// Run the pipeline and print everything the user sees on stdout.
pub fn execute(config: &Config, selection: Selection, options: &RunOptions) -> Result<RunSummary> {
    let progress = Progress::new(options.quiet);
    print_rule(&progress);
    progress.line(format_args!("Page Replacement Analysis - {}", selection.title()));
    print_rule(&progress);
    progress.blank();

    let summary = Pipeline::new(config, progress.clone())
        .run(selection)
        .context("Pipeline failed")?;

    if let Some(ref sweeps) = summary.sweeps {
        progress.line(format_sweep_statistics(sweeps));
        progress.blank();
    }

    if let Some(ref text) = summary.report {
        progress.line(text);
    }

    if let (Some(path), Some(metrics)) = (&options.metrics_json, &summary.metrics) {
        let json = serde_json::to_string_pretty(metrics).context("Failed to serialize metrics")?;
        write_atomic(path, json.as_bytes())
            .with_context(|| format!("Failed to write metrics to {}", path.display()))?;
        info!("Metrics written to {}", path.display());
    }

    print_rule(&progress);
    progress.line("ALL SELECTED OUTPUTS GENERATED SUCCESSFULLY!");
    print_rule(&progress);
    progress.blank();
    progress.line("Generated files:");
    let mut files = summary.generated_files();
    if summary.metrics.is_some() {
        files.extend(options.metrics_json.as_deref());
    }
    for (index, path) in files.iter().enumerate() {
        progress.line(format_args!("  {}. {}", index + 1, path.display()));
    }

    Ok(summary)
}

fn print_rule(progress: &Progress) {
    progress.line("=".repeat(BANNER_WIDTH));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[analysis]\npivot_frames = 30").unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.analysis.pivot_frames, 30);
    }

    #[test]
    fn test_load_config_explicit_missing_is_fatal() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(Some(dir.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn test_execute_reports_missing_input() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.data_dir = dir.path().join("data");
        config.paths.plots_dir = dir.path().join("plots");

        let options = RunOptions {
            quiet: true,
            metrics_json: None,
        };
        let err = execute(&config, Selection::first_half(), &options).unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("./a3 FIFO < Assignment_3_input_file.csv"));
        assert!(failure_hint(&err).is_some());
    }

    #[test]
    fn test_no_hint_for_other_failures() {
        let err = anyhow::Error::new(ReportError::EmptyTable {
            family: crate::models::TableFamily::ClockVaryN,
        })
        .context("Pipeline failed");
        assert!(failure_hint(&err).is_none());

        assert!(failure_hint(&anyhow::anyhow!("bad config")).is_none());
    }
}
