//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::pipeline::Selection;
use clap::Parser;
use std::path::PathBuf;

/// PageReport - charts and observations for page-replacement experiments
///
/// Reads the FIFO, Optimal and Second Chance result tables written by the
/// simulator, renders the five comparison charts and writes a text report
/// with the derived observations.
///
/// Examples:
///   pagereport
///   pagereport --part first
///   pagereport --data-dir out/data --plots-dir out/plots
///   pagereport --metrics-json metrics.json
///   pagereport --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Which part of the catalog to produce
    ///
    /// all: every chart plus the report; first: FIFO/Optimal charts;
    /// second: Second Chance charts and statistics.
    #[arg(long, default_value = "all", value_name = "PART")]
    pub part: Part,

    /// Path to configuration file
    ///
    /// If not specified, looks for .pagereport.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory containing the simulator's CSV tables
    #[arg(long, value_name = "DIR", env = "PAGEREPORT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory the charts are written to
    #[arg(long, value_name = "DIR")]
    pub plots_dir: Option<PathBuf>,

    /// Output file path for the observations report
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Frame count at which FIFO and Optimal are compared
    #[arg(long, value_name = "FRAMES")]
    pub pivot_frames: Option<u32>,

    /// Also write the derived metrics as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub metrics_json: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .pagereport.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Part of the chart catalog to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Part {
    /// Every chart and the report (default)
    #[default]
    All,
    /// FIFO vs Optimal charts (1-3)
    First,
    /// Second Chance charts (4-5)
    Second,
}

impl From<Part> for Selection {
    fn from(part: Part) -> Self {
        match part {
            Part::All => Selection::full(),
            Part::First => Selection::first_half(),
            Part::Second => Selection::second_half(),
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.pivot_frames == Some(0) {
            return Err("Pivot frame count must be at least 1".to_string());
        }

        if let Some(ref dir) = self.data_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(format!("Data path is not a directory: {}", dir.display()));
            }
        }

        if self.metrics_json.is_some() && self.part != Part::All {
            return Err("--metrics-json requires --part all".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
