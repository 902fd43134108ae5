//! Derived observations built from the metric primitives.
//!
//! These structs carry every number the report quotes, so report text is
//! pure templating over values computed here.

use super::metrics::{extremum, is_non_increasing, mean, percent_improvement, row_at, Extremum};
use crate::error::Result;
use crate::models::{Column, ExperimentRow, ExperimentTable, FrameTable, TableFamily, TableSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// FIFO vs Optimal at the pivot frame count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineComparison {
    pub pivot_frames: u32,
    pub fifo_page_faults: u64,
    pub optimal_page_faults: u64,
    pub fifo_write_backs: u64,
    pub optimal_write_backs: u64,
    /// Optimal's page-fault improvement over FIFO, in percent.
    pub page_fault_improvement: f64,
    /// Optimal's write-back improvement over FIFO, in percent; `None` when
    /// FIFO has no write-backs at the pivot.
    pub write_back_improvement: Option<f64>,
    /// Both page-fault curves never rise as frames grow.
    pub monotonic_decrease: bool,
}

impl BaselineComparison {
    pub fn compute(fifo: &FrameTable, optimal: &FrameTable, pivot_frames: u32) -> Result<Self> {
        let fifo_row = row_at(fifo, pivot_frames)?;
        let optimal_row = row_at(optimal, pivot_frames)?;

        let comparison = Self {
            pivot_frames,
            fifo_page_faults: fifo_row.page_faults,
            optimal_page_faults: optimal_row.page_faults,
            fifo_write_backs: fifo_row.write_backs,
            optimal_write_backs: optimal_row.write_backs,
            page_fault_improvement: percent_improvement(fifo_row, optimal_row, Column::PageFaults)?,
            write_back_improvement: if fifo_row.write_backs == 0 {
                None
            } else {
                Some(percent_improvement(fifo_row, optimal_row, Column::WriteBacks)?)
            },
            monotonic_decrease: is_non_increasing(fifo, Column::PageFaults)?
                && is_non_increasing(optimal, Column::PageFaults)?,
        };

        debug!(
            "Baseline at {} frames: FIFO {} vs Optimal {} ({:.1}%)",
            pivot_frames,
            comparison.fifo_page_faults,
            comparison.optimal_page_faults,
            comparison.page_fault_improvement
        );

        Ok(comparison)
    }
}

/// Page-fault summary of one Second Chance sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub family: TableFamily,
    /// Name of the swept parameter (`n` or `m`).
    pub parameter: String,
    pub first_parameter: u32,
    pub last_parameter: u32,
    pub min_page_faults: u64,
    pub max_page_faults: u64,
    pub best_parameter: u32,
    pub worst_parameter: u32,
    pub mean_page_faults: f64,
    /// `max_page_faults - min_page_faults`.
    pub spread: u64,
}

impl SweepSummary {
    pub fn compute<R: ExperimentRow>(table: &ExperimentTable<R>) -> Result<Self> {
        let best = extremum(table, Column::PageFaults, Extremum::Min)?;
        let worst = extremum(table, Column::PageFaults, Extremum::Max)?;
        let min_page_faults = table.value_of(best, Column::PageFaults)?;
        let max_page_faults = table.value_of(worst, Column::PageFaults)?;

        // extremum succeeded, so the table has at least one row
        let rows = table.rows();
        let first_parameter = rows.first().map(|r| r.parameter()).unwrap_or_default();
        let last_parameter = rows.last().map(|r| r.parameter()).unwrap_or_default();

        let summary = Self {
            family: table.family(),
            parameter: table.family().parameter_column().to_string(),
            first_parameter,
            last_parameter,
            min_page_faults,
            max_page_faults,
            best_parameter: best.parameter(),
            worst_parameter: worst.parameter(),
            mean_page_faults: mean(table, Column::PageFaults)?,
            spread: max_page_faults - min_page_faults,
        };

        debug!(
            "Sweep {}: best {}={} with {} faults",
            summary.family, summary.parameter, summary.best_parameter, summary.min_page_faults
        );

        Ok(summary)
    }
}

/// Both Second Chance sweeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummaries {
    pub register: SweepSummary,
    pub shift: SweepSummary,
}

impl SweepSummaries {
    pub fn compute(tables: &TableSet) -> Result<Self> {
        Ok(Self {
            register: SweepSummary::compute(tables.clock_vary_n()?)?,
            shift: SweepSummary::compute(tables.clock_vary_m()?)?,
        })
    }
}

/// Where a sweep's best result lands against the baseline pivot values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    AtOrBelowOptimal,
    CloserToOptimal,
    CloserToFifo,
    AtOrAboveFifo,
}

impl Placement {
    pub fn classify(page_faults: u64, baseline: &BaselineComparison) -> Self {
        let optimal = baseline.optimal_page_faults;
        let fifo = baseline.fifo_page_faults;

        if page_faults <= optimal {
            Placement::AtOrBelowOptimal
        } else if page_faults >= fifo {
            Placement::AtOrAboveFifo
        } else if fifo - page_faults < page_faults - optimal {
            Placement::CloserToFifo
        } else {
            Placement::CloserToOptimal
        }
    }
}

/// Everything the observations report quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetrics {
    pub baseline: BaselineComparison,
    pub sweeps: SweepSummaries,
    pub register_placement: Placement,
    pub shift_placement: Placement,
    /// Sweep with the larger page-fault spread; register size wins ties.
    pub more_sensitive: TableFamily,
}

impl ReportMetrics {
    pub fn compute(tables: &TableSet, pivot_frames: u32) -> Result<Self> {
        let baseline = BaselineComparison::compute(tables.fifo()?, tables.optimal()?, pivot_frames)?;
        let sweeps = SweepSummaries::compute(tables)?;

        let more_sensitive = if sweeps.shift.spread > sweeps.register.spread {
            TableFamily::ClockVaryM
        } else {
            TableFamily::ClockVaryN
        };

        Ok(Self {
            more_sensitive,
            register_placement: Placement::classify(sweeps.register.min_page_faults, &baseline),
            shift_placement: Placement::classify(sweeps.shift.min_page_faults, &baseline),
            baseline,
            sweeps,
        })
    }
}
