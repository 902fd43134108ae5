//! Stage orchestration.
//!
//! A [`Pipeline`] loads the tables a [`Selection`] needs, derives the
//! metrics, renders the selected charts and composes the report. The
//! first failing stage aborts the run.

use crate::analysis::{ReportMetrics, SweepSummaries};
use crate::chart::{ChartArtifact, ChartId, ChartRenderer, ChartStyle};
use crate::config::Config;
use crate::error::{ReportError, Result};
use crate::loader::TableLoader;
use crate::models::{TableFamily, TableSet};
use crate::progress::Progress;
use crate::report::ReportComposer;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Charts 1-3 (FIFO vs Optimal).
    pub baseline_charts: bool,
    /// Charts 4-5 (Second Chance sweeps).
    pub sweep_charts: bool,
    /// The observations report.
    pub report: bool,
}

impl Selection {
    pub fn full() -> Self {
        Self {
            baseline_charts: true,
            sweep_charts: true,
            report: true,
        }
    }

    pub fn first_half() -> Self {
        Self {
            baseline_charts: true,
            sweep_charts: false,
            report: false,
        }
    }

    pub fn second_half() -> Self {
        Self {
            baseline_charts: false,
            sweep_charts: true,
            report: false,
        }
    }

    /// Charts to render, in catalog order.
    pub fn charts(&self) -> Vec<ChartId> {
        let mut charts = Vec::new();
        if self.baseline_charts {
            charts.extend(ChartId::BASELINE);
        }
        if self.sweep_charts {
            charts.extend(ChartId::SWEEP);
        }
        charts
    }

    /// Tables that must be loaded. The report quotes all four.
    pub fn families(&self) -> Vec<TableFamily> {
        if self.report {
            return TableFamily::ALL.to_vec();
        }

        let mut families: Vec<TableFamily> = self
            .charts()
            .iter()
            .flat_map(|id| id.families().iter().copied())
            .collect();
        families.sort();
        families.dedup();
        families
    }

    /// Banner title for console output.
    pub fn title(&self) -> &'static str {
        match (self.baseline_charts, self.sweep_charts) {
            (true, false) => "Part 1: FIFO vs Optimal",
            (false, true) => "Part 2: Second Chance",
            _ => "Complete Plotting Suite",
        }
    }
}

/// Results of one run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Row counts of the tables that were loaded.
    pub loaded: Vec<(TableFamily, usize)>,
    pub charts: Vec<ChartArtifact>,
    pub sweeps: Option<SweepSummaries>,
    pub metrics: Option<ReportMetrics>,
    pub report: Option<String>,
    pub report_path: Option<PathBuf>,
}

impl RunSummary {
    /// Every file written during the run.
    pub fn generated_files(&self) -> Vec<&Path> {
        self.charts
            .iter()
            .map(|chart| chart.path.as_path())
            .chain(self.report_path.as_deref())
            .collect()
    }
}

/// Wires the loader, analyzer, renderer and composer together.
pub struct Pipeline {
    loader: TableLoader,
    renderer: ChartRenderer,
    composer: ReportComposer,
    plots_dir: PathBuf,
    pivot_frames: u32,
    progress: Progress,
}

impl Pipeline {
    pub fn new(config: &Config, progress: Progress) -> Self {
        let style = ChartStyle::from(&config.chart);

        Self {
            loader: TableLoader::new(&config.paths.data_dir, config.simulator.clone()),
            renderer: ChartRenderer::new(style, &config.paths.plots_dir),
            composer: ReportComposer::new(&config.paths.report_path),
            plots_dir: config.paths.plots_dir.clone(),
            pivot_frames: config.analysis.pivot_frames,
            progress,
        }
    }

    pub fn run(&self, selection: Selection) -> Result<RunSummary> {
        info!("Running pipeline: {:?}", selection);
        self.ensure_output_dirs(selection)?;

        let tables = self.load_tables(selection)?;
        let mut summary = RunSummary {
            loaded: tables.loaded(),
            ..RunSummary::default()
        };

        if selection.report {
            summary.metrics = Some(ReportMetrics::compute(&tables, self.pivot_frames)?);
        }
        if selection.sweep_charts {
            summary.sweeps = match summary.metrics {
                Some(ref metrics) => Some(metrics.sweeps.clone()),
                None => Some(SweepSummaries::compute(&tables)?),
            };
        }

        summary.charts = self.render_charts(selection, &tables)?;

        if let Some(ref metrics) = summary.metrics {
            self.progress.line("Generating observations...");
            let text = self.composer.compose(metrics)?;
            self.progress.line(format_args!(
                "✓ Observations saved to: {}",
                self.composer.report_path().display()
            ));
            self.progress.blank();
            summary.report = Some(text);
            summary.report_path = Some(self.composer.report_path().to_path_buf());
        }

        info!("Pipeline finished: {} charts written", summary.charts.len());
        Ok(summary)
    }

    /// Create the output directories the selection writes into.
    fn ensure_output_dirs(&self, selection: Selection) -> Result<()> {
        let mut dirs = Vec::new();
        if selection.baseline_charts || selection.sweep_charts {
            dirs.push(self.plots_dir.as_path());
        }
        if selection.report {
            if let Some(parent) = self.composer.report_path().parent() {
                if !parent.as_os_str().is_empty() {
                    dirs.push(parent);
                }
            }
        }

        for dir in dirs {
            std::fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))?;
            debug!("Output directory ready: {}", dir.display());
        }

        Ok(())
    }

    fn load_tables(&self, selection: Selection) -> Result<TableSet> {
        let mut tables = TableSet::default();

        self.progress.line("Loading data from CSV files...");
        for family in selection.families() {
            let rows = self.loader.load_into(family, &mut tables)?;
            self.progress
                .line(format_args!("✓ {} data: {} entries", family.label(), rows));
        }
        self.progress.blank();

        Ok(tables)
    }

    fn render_charts(&self, selection: Selection, tables: &TableSet) -> Result<Vec<ChartArtifact>> {
        let charts = selection.charts();
        if charts.is_empty() {
            return Ok(Vec::new());
        }

        self.progress.line("Generating plots...");
        self.progress.start(charts.len());

        let mut artifacts = Vec::with_capacity(charts.len());
        for id in charts {
            self.progress.step(id.summary());
            let artifact = match self.renderer.render(id, tables) {
                Ok(artifact) => artifact,
                Err(e) => {
                    self.progress.finish();
                    return Err(e);
                }
            };
            self.progress.line(format_args!("✓ {}: {}", id, id.summary()));
            self.progress.advance();
            artifacts.push(artifact);
        }

        self.progress.finish();
        self.progress.blank();
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_selection() {
        let selection = Selection::full();
        assert_eq!(selection.charts(), ChartId::ALL.to_vec());
        assert_eq!(selection.families(), TableFamily::ALL.to_vec());
    }

    #[test]
    fn test_first_half_loads_baseline_tables_only() {
        let selection = Selection::first_half();
        assert_eq!(selection.charts(), ChartId::BASELINE.to_vec());
        assert_eq!(
            selection.families(),
            vec![TableFamily::Fifo, TableFamily::Optimal]
        );
    }

    #[test]
    fn test_second_half_loads_sweep_tables_only() {
        let selection = Selection::second_half();
        assert_eq!(selection.charts(), ChartId::SWEEP.to_vec());
        assert_eq!(
            selection.families(),
            vec![TableFamily::ClockVaryN, TableFamily::ClockVaryM]
        );
    }

    #[test]
    fn test_report_only_needs_every_table() {
        let selection = Selection {
            baseline_charts: false,
            sweep_charts: false,
            report: true,
        };
        assert!(selection.charts().is_empty());
        assert_eq!(selection.families().len(), 4);
    }

    #[test]
    fn test_titles() {
        assert_eq!(Selection::first_half().title(), "Part 1: FIFO vs Optimal");
        assert_eq!(Selection::second_half().title(), "Part 2: Second Chance");
        assert_eq!(Selection::full().title(), "Complete Plotting Suite");
    }

    #[test]
    fn test_generated_files_lists_report_last() {
        let summary = RunSummary {
            charts: vec![ChartArtifact {
                id: ChartId::PageFaults,
                path: PathBuf::from("plots/plot1_page_faults.svg"),
            }],
            report_path: Some(PathBuf::from("observations.txt")),
            ..RunSummary::default()
        };

        assert_eq!(
            summary.generated_files(),
            vec![
                Path::new("plots/plot1_page_faults.svg"),
                Path::new("observations.txt")
            ]
        );
    }
}
