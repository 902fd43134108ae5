//! Metric primitives over experiment tables.
//!
//! All functions are pure and deterministic. Ties in [`extremum`] go to the
//! row that comes first in table order, which is ascending parameter order.

use crate::error::{ReportError, Result};
use crate::models::{Column, ExperimentRow, ExperimentTable};
use serde::{Deserialize, Serialize};

/// Which end of a column to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extremum {
    Min,
    Max,
}

/// Row whose parameter equals `value` exactly.
pub fn row_at<R: ExperimentRow>(table: &ExperimentTable<R>, value: u32) -> Result<&R> {
    table
        .rows()
        .iter()
        .find(|row| row.parameter() == value)
        .ok_or(ReportError::ParameterNotFound {
            family: table.family(),
            value,
        })
}

/// Percentage by which `candidate` improves on `baseline` in `column`.
///
/// Positive when the candidate is lower, zero when equal.
pub fn percent_improvement<R: ExperimentRow>(
    baseline: &R,
    candidate: &R,
    column: Column,
) -> Result<f64> {
    let base = baseline.value(column).ok_or(ReportError::MissingValue { column })?;
    let cand = candidate.value(column).ok_or(ReportError::MissingValue { column })?;

    if base == 0 {
        return Err(ReportError::DivisionByZero { column });
    }

    let base = base as f64;
    Ok((base - cand as f64) * 100.0 / base)
}

/// Row minimizing or maximizing `column`; the first such row wins ties.
pub fn extremum<R: ExperimentRow>(
    table: &ExperimentTable<R>,
    column: Column,
    kind: Extremum,
) -> Result<&R> {
    let mut best: Option<(&R, u64)> = None;

    for row in table.rows() {
        let value = table.value_of(row, column)?;
        let better = match (best, kind) {
            (None, _) => true,
            (Some((_, current)), Extremum::Min) => value < current,
            (Some((_, current)), Extremum::Max) => value > current,
        };
        if better {
            best = Some((row, value));
        }
    }

    best.map(|(row, _)| row).ok_or(ReportError::EmptyTable {
        family: table.family(),
    })
}

/// Arithmetic mean of `column`.
pub fn mean<R: ExperimentRow>(table: &ExperimentTable<R>, column: Column) -> Result<f64> {
    if table.is_empty() {
        return Err(ReportError::EmptyTable {
            family: table.family(),
        });
    }

    let mut sum = 0.0;
    for row in table.rows() {
        sum += table.value_of(row, column)? as f64;
    }

    Ok(sum / table.len() as f64)
}

/// True when `column` never increases along the table.
pub fn is_non_increasing<R: ExperimentRow>(
    table: &ExperimentTable<R>,
    column: Column,
) -> Result<bool> {
    if table.is_empty() {
        return Err(ReportError::EmptyTable {
            family: table.family(),
        });
    }

    let values = table.points(column)?;
    Ok(values.windows(2).all(|pair| pair[1].1 <= pair[0].1))
}
