//! The fixed catalog of chart templates.

use super::style::{Canvas, Marker, SeriesStyle, FIFO_RED, OPTIMAL_BLUE, REGISTER_PURPLE, SHIFT_GREEN};
use crate::models::{Column, TableFamily};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one of the five charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    PageFaults,
    WriteBacks,
    Combined,
    RegisterSize,
    ShiftInterval,
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plot {}", self.number())
    }
}

impl ChartId {
    pub const ALL: [ChartId; 5] = [
        ChartId::PageFaults,
        ChartId::WriteBacks,
        ChartId::Combined,
        ChartId::RegisterSize,
        ChartId::ShiftInterval,
    ];

    /// FIFO vs Optimal charts.
    pub const BASELINE: [ChartId; 3] = [ChartId::PageFaults, ChartId::WriteBacks, ChartId::Combined];

    /// Second Chance sweep charts.
    pub const SWEEP: [ChartId; 2] = [ChartId::RegisterSize, ChartId::ShiftInterval];

    /// 1-based position in the catalog.
    pub fn number(&self) -> u8 {
        match self {
            ChartId::PageFaults => 1,
            ChartId::WriteBacks => 2,
            ChartId::Combined => 3,
            ChartId::RegisterSize => 4,
            ChartId::ShiftInterval => 5,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartId::PageFaults => "plot1_page_faults.svg",
            ChartId::WriteBacks => "plot2_write_backs.svg",
            ChartId::Combined => "plot3_combined.svg",
            ChartId::RegisterSize => "plot4_clock_vary_n.svg",
            ChartId::ShiftInterval => "plot5_clock_vary_m.svg",
        }
    }

    /// Short description for progress output.
    pub fn summary(&self) -> &'static str {
        match self {
            ChartId::PageFaults => "Page Faults (FIFO vs Optimal)",
            ChartId::WriteBacks => "Write-backs (FIFO vs Optimal)",
            ChartId::Combined => "Combined (all metrics)",
            ChartId::RegisterSize => "Second Chance (varying n)",
            ChartId::ShiftInterval => "Second Chance (varying m)",
        }
    }

    /// Tables this chart draws from.
    pub fn families(&self) -> &'static [TableFamily] {
        match self {
            ChartId::PageFaults | ChartId::WriteBacks | ChartId::Combined => {
                &[TableFamily::Fifo, TableFamily::Optimal]
            }
            ChartId::RegisterSize => &[TableFamily::ClockVaryN],
            ChartId::ShiftInterval => &[TableFamily::ClockVaryM],
        }
    }

    pub fn template(&self) -> ChartTemplate {
        match self {
            ChartId::PageFaults => ChartTemplate {
                id: *self,
                title: "Page Faults vs Number of Frames (FIFO vs Optimal)",
                x_label: "Number of Frames",
                y_label: "Number of Page Faults",
                canvas: Canvas::Standard,
                x_label_count: None,
                series: vec![
                    SeriesSpec::new("FIFO", TableFamily::Fifo, Column::PageFaults, fifo_solid()),
                    SeriesSpec::new(
                        "Optimal",
                        TableFamily::Optimal,
                        Column::PageFaults,
                        optimal_solid(),
                    ),
                ],
            },
            ChartId::WriteBacks => ChartTemplate {
                id: *self,
                title: "Write-backs vs Number of Frames (FIFO vs Optimal)",
                x_label: "Number of Frames",
                y_label: "Number of Write-backs",
                canvas: Canvas::Standard,
                x_label_count: None,
                series: vec![
                    SeriesSpec::new("FIFO", TableFamily::Fifo, Column::WriteBacks, fifo_solid()),
                    SeriesSpec::new(
                        "Optimal",
                        TableFamily::Optimal,
                        Column::WriteBacks,
                        optimal_solid(),
                    ),
                ],
            },
            ChartId::Combined => ChartTemplate {
                id: *self,
                title: "Combined Performance Metrics (FIFO vs Optimal, Page Faults and Write-backs)",
                x_label: "Number of Frames",
                y_label: "Count (Page Faults and Write-backs)",
                canvas: Canvas::Wide,
                x_label_count: None,
                series: vec![
                    SeriesSpec::new(
                        "FIFO - Page Faults",
                        TableFamily::Fifo,
                        Column::PageFaults,
                        fifo_solid(),
                    ),
                    SeriesSpec::new(
                        "FIFO - Write-backs",
                        TableFamily::Fifo,
                        Column::WriteBacks,
                        SeriesStyle::muted(FIFO_RED, Marker::Circle, 3),
                    ),
                    SeriesSpec::new(
                        "Optimal - Page Faults",
                        TableFamily::Optimal,
                        Column::PageFaults,
                        optimal_solid(),
                    ),
                    SeriesSpec::new(
                        "Optimal - Write-backs",
                        TableFamily::Optimal,
                        Column::WriteBacks,
                        SeriesStyle::muted(OPTIMAL_BLUE, Marker::Square, 3),
                    ),
                ],
            },
            ChartId::RegisterSize => ChartTemplate {
                id: *self,
                title: "Second Chance: Page Faults vs Reference Register Size (m=10, Frames=50)",
                x_label: "n (Number of Bits in Reference Register)",
                y_label: "Number of Page Faults",
                canvas: Canvas::Standard,
                x_label_count: Some(16),
                series: vec![SeriesSpec::unlabeled(
                    TableFamily::ClockVaryN,
                    Column::PageFaults,
                    SeriesStyle::solid(REGISTER_PURPLE, Marker::Circle, 5),
                )],
            },
            ChartId::ShiftInterval => ChartTemplate {
                id: *self,
                title: "Second Chance: Page Faults vs Shift Interval (n=8, Frames=50)",
                x_label: "m (Interval Between Register Shifts)",
                y_label: "Number of Page Faults",
                canvas: Canvas::Standard,
                x_label_count: None,
                series: vec![SeriesSpec::unlabeled(
                    TableFamily::ClockVaryM,
                    Column::PageFaults,
                    SeriesStyle::solid(SHIFT_GREEN, Marker::Square, 4),
                )],
            },
        }
    }
}

fn fifo_solid() -> SeriesStyle {
    SeriesStyle::solid(FIFO_RED, Marker::Circle, 3)
}

fn optimal_solid() -> SeriesStyle {
    SeriesStyle::solid(OPTIMAL_BLUE, Marker::Square, 3)
}

/// One plotted series: a column of a table against its parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    /// Legend entry; `None` for single-series charts.
    pub label: Option<&'static str>,
    pub family: TableFamily,
    pub column: Column,
    pub style: SeriesStyle,
}

impl SeriesSpec {
    fn new(label: &'static str, family: TableFamily, column: Column, style: SeriesStyle) -> Self {
        Self {
            label: Some(label),
            family,
            column,
            style,
        }
    }

    fn unlabeled(family: TableFamily, column: Column, style: SeriesStyle) -> Self {
        Self {
            label: None,
            family,
            column,
            style,
        }
    }
}

/// Declarative description of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTemplate {
    pub id: ChartId,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub canvas: Canvas,
    /// Requested number of x-axis labels, `None` for the default.
    pub x_label_count: Option<usize>,
    pub series: Vec<SeriesSpec>,
}

impl ChartTemplate {
    pub fn has_legend(&self) -> bool {
        self.series.iter().any(|s| s.label.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::style::LineKind;

    #[test]
    fn test_catalog_has_five_distinct_files() {
        let mut names: Vec<_> = ChartId::ALL.iter().map(|id| id.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_combined_chart_mutes_write_backs() {
        let template = ChartId::Combined.template();
        assert_eq!(template.series.len(), 4);
        assert_eq!(template.canvas, Canvas::Wide);

        for spec in &template.series {
            let muted = spec.style.line == LineKind::Dashed;
            assert_eq!(muted, spec.column == Column::WriteBacks);
        }
    }

    #[test]
    fn test_sweep_charts_are_single_series() {
        for id in ChartId::SWEEP {
            let template = id.template();
            assert_eq!(template.series.len(), 1);
            assert!(!template.has_legend());
        }
    }

    #[test]
    fn test_template_families_match() {
        for id in ChartId::ALL {
            let template = id.template();
            for spec in &template.series {
                assert!(id.families().contains(&spec.family));
                assert!(spec.family.outcome_columns().contains(&spec.column));
            }
        }
    }
}
