//! Data models for experiment tables.
//!
//! This module contains the fixed set of table families produced by the
//! page-replacement simulator, one typed row per family, and the ordered
//! table wrapper the analyzer and renderer work on.

use crate::error::{ReportError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four tables the simulator writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFamily {
    /// FIFO page faults and write-backs by frame count
    Fifo,
    /// Optimal page faults and write-backs by frame count
    Optimal,
    /// Second chance page faults by register width `n` (m=10, 50 frames)
    ClockVaryN,
    /// Second chance page faults by shift interval `m` (n=8, 50 frames)
    ClockVaryM,
}

impl fmt::Display for TableFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source_id())
    }
}

impl TableFamily {
    /// All families in load order.
    pub const ALL: [TableFamily; 4] = [
        TableFamily::Fifo,
        TableFamily::Optimal,
        TableFamily::ClockVaryN,
        TableFamily::ClockVaryM,
    ];

    /// Identifier of the table, also the file stem on disk.
    pub fn source_id(&self) -> &'static str {
        match self {
            TableFamily::Fifo => "fifo_results",
            TableFamily::Optimal => "optimal_results",
            TableFamily::ClockVaryN => "clock_vary_n",
            TableFamily::ClockVaryM => "clock_vary_m",
        }
    }

    /// File name inside the data directory.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.source_id())
    }

    /// Human readable name for console output.
    pub fn label(&self) -> &'static str {
        match self {
            TableFamily::Fifo => "FIFO",
            TableFamily::Optimal => "Optimal",
            TableFamily::ClockVaryN => "Clock (vary n)",
            TableFamily::ClockVaryM => "Clock (vary m)",
        }
    }

    /// Header of the varying-parameter column.
    pub fn parameter_column(&self) -> &'static str {
        match self {
            TableFamily::Fifo | TableFamily::Optimal => "Frames",
            TableFamily::ClockVaryN => "n",
            TableFamily::ClockVaryM => "m",
        }
    }

    /// Outcome columns carried by this family.
    pub fn outcome_columns(&self) -> &'static [Column] {
        match self {
            TableFamily::Fifo | TableFamily::Optimal => &[Column::PageFaults, Column::WriteBacks],
            TableFamily::ClockVaryN | TableFamily::ClockVaryM => &[Column::PageFaults],
        }
    }

    /// Every header the loader insists on.
    pub fn required_columns(&self) -> Vec<&'static str> {
        std::iter::once(self.parameter_column())
            .chain(self.outcome_columns().iter().map(|c| c.header()))
            .collect()
    }

    /// Algorithm flag passed to the simulator to produce this table.
    pub fn algorithm_flag(&self) -> &'static str {
        match self {
            TableFamily::Fifo => "FIFO",
            TableFamily::Optimal => "OPT",
            TableFamily::ClockVaryN | TableFamily::ClockVaryM => "CLK",
        }
    }
}

/// Outcome counter column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    PageFaults,
    WriteBacks,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

impl Column {
    /// CSV header of the column.
    pub fn header(&self) -> &'static str {
        match self {
            Column::PageFaults => "PageFaults",
            Column::WriteBacks => "WriteBack",
        }
    }
}

/// Row shape shared by every family.
pub trait ExperimentRow: DeserializeOwned + Clone + fmt::Debug {
    /// The varying parameter (frames, `n` or `m`).
    fn parameter(&self) -> u32;

    /// Value of an outcome column, `None` if this row type lacks it.
    fn value(&self, column: Column) -> Option<u64>;
}

/// A FIFO or Optimal measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRow {
    #[serde(rename = "Frames")]
    pub frames: u32,
    #[serde(rename = "PageFaults")]
    pub page_faults: u64,
    #[serde(rename = "WriteBack")]
    pub write_backs: u64,
}

impl ExperimentRow for FrameRow {
    fn parameter(&self) -> u32 {
        self.frames
    }

    fn value(&self, column: Column) -> Option<u64> {
        match column {
            Column::PageFaults => Some(self.page_faults),
            Column::WriteBacks => Some(self.write_backs),
        }
    }
}

/// A second chance measurement with varying register width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRow {
    pub n: u32,
    #[serde(rename = "PageFaults")]
    pub page_faults: u64,
}

impl ExperimentRow for RegisterRow {
    fn parameter(&self) -> u32 {
        self.n
    }

    fn value(&self, column: Column) -> Option<u64> {
        match column {
            Column::PageFaults => Some(self.page_faults),
            Column::WriteBacks => None,
        }
    }
}

/// A second chance measurement with varying shift interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRow {
    pub m: u32,
    #[serde(rename = "PageFaults")]
    pub page_faults: u64,
}

impl ExperimentRow for ShiftRow {
    fn parameter(&self) -> u32 {
        self.m
    }

    fn value(&self, column: Column) -> Option<u64> {
        match column {
            Column::PageFaults => Some(self.page_faults),
            Column::WriteBacks => None,
        }
    }
}

/// Rows of one family, ascending by parameter with no repeats.
#[derive(Debug, Clone)]
pub struct ExperimentTable<R> {
    family: TableFamily,
    rows: Vec<R>,
}

pub type FrameTable = ExperimentTable<FrameRow>;
pub type RegisterTable = ExperimentTable<RegisterRow>;
pub type ShiftTable = ExperimentTable<ShiftRow>;

impl<R: ExperimentRow> ExperimentTable<R> {
    /// Builds a table, sorting rows by parameter and rejecting duplicates.
    pub fn new(family: TableFamily, mut rows: Vec<R>) -> Result<Self> {
        rows.sort_by_key(|r| r.parameter());

        if let Some(pair) = rows
            .windows(2)
            .find(|pair| pair[0].parameter() == pair[1].parameter())
        {
            return Err(ReportError::DuplicateParameter {
                family,
                value: pair[0].parameter(),
            });
        }

        Ok(Self { family, rows })
    }

    pub fn family(&self) -> TableFamily {
        self.family
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reads `column` from a row of this table.
    pub fn value_of(&self, row: &R, column: Column) -> Result<u64> {
        row.value(column).ok_or(ReportError::UnsupportedColumn {
            family: self.family,
            column,
        })
    }

    /// `(parameter, value)` pairs in table order.
    pub fn points(&self, column: Column) -> Result<Vec<(u32, u64)>> {
        self.rows
            .iter()
            .map(|row| Ok((row.parameter(), self.value_of(row, column)?)))
            .collect()
    }
}

/// The tables loaded for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    pub fifo: Option<FrameTable>,
    pub optimal: Option<FrameTable>,
    pub clock_vary_n: Option<RegisterTable>,
    pub clock_vary_m: Option<ShiftTable>,
}

impl TableSet {
    pub fn fifo(&self) -> Result<&FrameTable> {
        self.fifo.as_ref().ok_or(ReportError::TableNotLoaded {
            family: TableFamily::Fifo,
        })
    }

    pub fn optimal(&self) -> Result<&FrameTable> {
        self.optimal.as_ref().ok_or(ReportError::TableNotLoaded {
            family: TableFamily::Optimal,
        })
    }

    pub fn clock_vary_n(&self) -> Result<&RegisterTable> {
        self.clock_vary_n.as_ref().ok_or(ReportError::TableNotLoaded {
            family: TableFamily::ClockVaryN,
        })
    }

    pub fn clock_vary_m(&self) -> Result<&ShiftTable> {
        self.clock_vary_m.as_ref().ok_or(ReportError::TableNotLoaded {
            family: TableFamily::ClockVaryM,
        })
    }

    /// Series points of `column` from the given family's table.
    pub fn points(&self, family: TableFamily, column: Column) -> Result<Vec<(u32, u64)>> {
        match family {
            TableFamily::Fifo => self.fifo()?.points(column),
            TableFamily::Optimal => self.optimal()?.points(column),
            TableFamily::ClockVaryN => self.clock_vary_n()?.points(column),
            TableFamily::ClockVaryM => self.clock_vary_m()?.points(column),
        }
    }

    /// Loaded families with their row counts, in load order.
    pub fn loaded(&self) -> Vec<(TableFamily, usize)> {
        let mut loaded = Vec::new();
        if let Some(t) = &self.fifo {
            loaded.push((t.family(), t.len()));
        }
        if let Some(t) = &self.optimal {
            loaded.push((t.family(), t.len()));
        }
        if let Some(t) = &self.clock_vary_n {
            loaded.push((t.family(), t.len()));
        }
        if let Some(t) = &self.clock_vary_m {
            loaded.push((t.family(), t.len()));
        }
        loaded
    }
}
