//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.pagereport.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".pagereport.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// How the simulator is invoked (used in error messages).
    #[serde(default)]
    pub simulator: SimulatorConfig,

    /// Chart styling.
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the simulator's CSV tables.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory the charts are written to.
    #[serde(default = "default_plots_dir")]
    pub plots_dir: PathBuf,

    /// File the observations report is written to.
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            plots_dir: default_plots_dir(),
            report_path: default_report_path(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("results/data")
}

fn default_plots_dir() -> PathBuf {
    PathBuf::from("results/plots")
}

fn default_report_path() -> PathBuf {
    PathBuf::from("results/observations.txt")
}

/// Analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Frame count at which FIFO and Optimal are compared.
    #[serde(default = "default_pivot_frames")]
    pub pivot_frames: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pivot_frames: default_pivot_frames(),
        }
    }
}

fn default_pivot_frames() -> u32 {
    50
}

/// Simulator invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Path of the simulator executable.
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Workload file fed on the simulator's standard input.
    #[serde(default = "default_workload")]
    pub workload: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            workload: default_workload(),
        }
    }
}

fn default_binary() -> String {
    "./a3".to_string()
}

fn default_workload() -> String {
    "Assignment_3_input_file.csv".to_string()
}

impl SimulatorConfig {
    /// Shell command that regenerates tables for the given algorithm flag.
    pub fn command_for(&self, algorithm_flag: &str) -> String {
        format!("{} {} < {}", self.binary, algorithm_flag, self.workload)
    }
}

/// Chart styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Canvas width of single-metric charts.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height of single-metric charts.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Canvas width of the combined chart.
    #[serde(default = "default_wide_width")]
    pub wide_width: u32,

    /// Canvas height of the combined chart.
    #[serde(default = "default_wide_height")]
    pub wide_height: u32,

    /// Font family for all text.
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Title font size.
    #[serde(default = "default_title_size")]
    pub title_size: u32,

    /// Axis description font size.
    #[serde(default = "default_label_size")]
    pub label_size: u32,

    /// Legend font size.
    #[serde(default = "default_legend_size")]
    pub legend_size: u32,

    /// Stroke width of series lines.
    #[serde(default = "default_line_width")]
    pub line_width: u32,

    /// Opacity of the grid lines (0.0 - 1.0).
    #[serde(default = "default_grid_opacity")]
    pub grid_opacity: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            wide_width: default_wide_width(),
            wide_height: default_wide_height(),
            font_family: default_font_family(),
            title_size: default_title_size(),
            label_size: default_label_size(),
            legend_size: default_legend_size(),
            line_width: default_line_width(),
            grid_opacity: default_grid_opacity(),
        }
    }
}

fn default_width() -> u32 {
    1200
}

fn default_height() -> u32 {
    700
}

fn default_wide_width() -> u32 {
    1400
}

fn default_wide_height() -> u32 {
    800
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

fn default_title_size() -> u32 {
    30
}

fn default_label_size() -> u32 {
    22
}

fn default_legend_size() -> u32 {
    18
}

fn default_line_width() -> u32 {
    2
}

fn default_grid_opacity() -> f64 {
    0.3
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref dir) = args.data_dir {
            self.paths.data_dir = dir.clone();
        }
        if let Some(ref dir) = args.plots_dir {
            self.paths.plots_dir = dir.clone();
        }
        if let Some(ref path) = args.report {
            self.paths.report_path = path.clone();
        }
        if let Some(pivot) = args.pivot_frames {
            self.analysis.pivot_frames = pivot;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.paths.data_dir, PathBuf::from("results/data"));
        assert_eq!(config.paths.report_path, PathBuf::from("results/observations.txt"));
        assert_eq!(config.analysis.pivot_frames, 50);
        assert_eq!(config.chart.font_family, "sans-serif");
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[paths]
data_dir = "out/data"

[analysis]
pivot_frames = 40

[simulator]
binary = "./sim"

[chart]
width = 800
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.paths.data_dir, PathBuf::from("out/data"));
        assert_eq!(config.paths.plots_dir, PathBuf::from("results/plots"));
        assert_eq!(config.analysis.pivot_frames, 40);
        assert_eq!(config.simulator.binary, "./sim");
        assert_eq!(config.simulator.workload, "Assignment_3_input_file.csv");
        assert_eq!(config.chart.width, 800);
        assert_eq!(config.chart.height, 700);
    }

    #[test]
    fn test_simulator_command() {
        let simulator = SimulatorConfig::default();
        assert_eq!(
            simulator.command_for("OPT"),
            "./a3 OPT < Assignment_3_input_file.csv"
        );
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[paths]"));
        assert!(toml_str.contains("[analysis]"));
        assert!(toml_str.contains("[simulator]"));
        assert!(toml_str.contains("[chart]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.analysis.pivot_frames, 50);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[analysis]\npivot_frames = 25\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.analysis.pivot_frames, 25);
    }
}
