//! Error types for the report pipeline.
//!
//! Every failure is fatal to a run; callers bubble these up to the
//! entry point, which prints them and exits with code 1.

use crate::models::{Column, TableFamily};
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used across the library.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Everything that can go wrong between reading tables and writing artifacts.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The input table does not exist yet.
    #[error(
        "input table `{family}` not found at {path}\nGenerate it by running the simulator first:\n  {command}"
    )]
    MissingInput {
        family: TableFamily,
        path: PathBuf,
        command: String,
    },

    /// The input table is missing a column its family requires.
    #[error("input table `{family}` ({path}) is missing required column `{column}`")]
    Schema {
        family: TableFamily,
        path: PathBuf,
        column: String,
    },

    /// Two rows share the same parameter value.
    #[error("input table `{family}` has more than one row for parameter value {value}")]
    DuplicateParameter { family: TableFamily, value: u32 },

    /// A row could not be parsed.
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A metric was requested over a table with no rows.
    #[error("table `{family}` has no rows")]
    EmptyTable { family: TableFamily },

    /// A pivot parameter value is absent from the table.
    #[error("table `{family}` has no row for parameter value {value}")]
    ParameterNotFound { family: TableFamily, value: u32 },

    /// Percentage improvement against a zero baseline.
    #[error("cannot compute an improvement over a zero baseline in column `{column}`")]
    DivisionByZero { column: Column },

    /// The table family has no such outcome column.
    #[error("table `{family}` has no `{column}` column")]
    UnsupportedColumn { family: TableFamily, column: Column },

    /// A row lacks the requested outcome column.
    #[error("row has no `{column}` value")]
    MissingValue { column: Column },

    /// A chart or metric needs a table that the run did not load.
    #[error("table `{family}` was not loaded for this run")]
    TableNotLoaded { family: TableFamily },

    /// A chart could not be drawn or placed.
    #[error("failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },

    /// Filesystem failure outside of rendering.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn render(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Render {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error means an input table has to be regenerated.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_names_command() {
        let err = ReportError::MissingInput {
            family: TableFamily::Optimal,
            path: PathBuf::from("results/data/optimal_results.csv"),
            command: "./a3 OPT < Assignment_3_input_file.csv".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("optimal_results"));
        assert!(message.contains("./a3 OPT < Assignment_3_input_file.csv"));
        assert!(err.is_missing_input());
    }

    #[test]
    fn test_schema_error_message() {
        let err = ReportError::Schema {
            family: TableFamily::ClockVaryN,
            path: PathBuf::from("clock_vary_n.csv"),
            column: "n".to_string(),
        };

        assert!(err.to_string().contains("missing required column `n`"));
        assert!(!err.is_missing_input());
    }
}
