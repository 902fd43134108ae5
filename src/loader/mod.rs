//! Table loader for the simulator's CSV output.
//!
//! Each table family lives at a fixed file name inside the data directory.
//! The header is checked against the family's required columns before any
//! row is parsed, so a bad file fails up front instead of on first access.

use crate::config::SimulatorConfig;
use crate::error::{ReportError, Result};
use crate::models::{ExperimentRow, ExperimentTable, TableFamily, TableSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads experiment tables from a data directory.
#[derive(Debug, Clone)]
pub struct TableLoader {
    data_dir: PathBuf,
    simulator: SimulatorConfig,
}

impl TableLoader {
    pub fn new(data_dir: impl Into<PathBuf>, simulator: SimulatorConfig) -> Self {
        Self {
            data_dir: data_dir.into(),
            simulator,
        }
    }

    /// Location of a family's table.
    pub fn path_for(&self, family: TableFamily) -> PathBuf {
        self.data_dir.join(family.file_name())
    }

    /// Command the user should run to produce a missing table.
    pub fn producing_command(&self, family: TableFamily) -> String {
        self.simulator.command_for(family.algorithm_flag())
    }

    /// Load one table with the given row type.
    pub fn load<R: ExperimentRow>(&self, family: TableFamily) -> Result<ExperimentTable<R>> {
        let path = self.path_for(family);
        debug!("Loading {} from {}", family, path.display());

        if !path.is_file() {
            return Err(self.missing(family, path));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|source| self.csv_error(family, &path, source))?;

        let headers = reader
            .headers()
            .map_err(|source| self.csv_error(family, &path, source))?
            .clone();

        for column in family.required_columns() {
            if !headers.iter().any(|h| h == column) {
                return Err(ReportError::Schema {
                    family,
                    path,
                    column: column.to_string(),
                });
            }
        }

        let rows = reader
            .deserialize::<R>()
            .collect::<std::result::Result<Vec<R>, csv::Error>>()
            .map_err(|source| self.csv_error(family, &path, source))?;

        let table = ExperimentTable::new(family, rows)?;
        debug!("Loaded {} rows for {}", table.len(), family);

        Ok(table)
    }

    /// Load a family into the matching slot of `tables`, returning its row count.
    pub fn load_into(&self, family: TableFamily, tables: &mut TableSet) -> Result<usize> {
        let rows = match family {
            TableFamily::Fifo => {
                let table = self.load(family)?;
                let len = table.len();
                tables.fifo = Some(table);
                len
            }
            TableFamily::Optimal => {
                let table = self.load(family)?;
                let len = table.len();
                tables.optimal = Some(table);
                len
            }
            TableFamily::ClockVaryN => {
                let table = self.load(family)?;
                let len = table.len();
                tables.clock_vary_n = Some(table);
                len
            }
            TableFamily::ClockVaryM => {
                let table = self.load(family)?;
                let len = table.len();
                tables.clock_vary_m = Some(table);
                len
            }
        };

        debug!("{} data: {} entries", family.label(), rows);
        Ok(rows)
    }

    fn missing(&self, family: TableFamily, path: PathBuf) -> ReportError {
        ReportError::MissingInput {
            family,
            path,
            command: self.producing_command(family),
        }
    }

    fn csv_error(&self, family: TableFamily, path: &Path, source: csv::Error) -> ReportError {
        // The file can vanish between the existence check and the open.
        if let csv::ErrorKind::Io(io) = source.kind() {
            if io.kind() == std::io::ErrorKind::NotFound {
                return self.missing(family, path.to_path_buf());
            }
        }

        ReportError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Column, FrameRow, RegisterRow, ShiftRow};
    use tempfile::TempDir;

    fn loader_with(files: &[(&str, &str)]) -> (TempDir, TableLoader) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let loader = TableLoader::new(dir.path(), SimulatorConfig::default());
        (dir, loader)
    }

    #[test]
    fn test_load_frame_table() {
        let (_dir, loader) = loader_with(&[(
            "fifo_results.csv",
            "Frames,PageFaults,WriteBack\n2,300,90\n1,400,100\n3,250,80\n",
        )]);

        let table = loader.load::<FrameRow>(TableFamily::Fifo).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[0].frames, 1);
        assert_eq!(table.rows()[0].page_faults, 400);
        assert_eq!(table.rows()[2].write_backs, 80);
    }

    #[test]
    fn test_load_ignores_extra_columns_and_whitespace() {
        let (_dir, loader) = loader_with(&[(
            "clock_vary_n.csv",
            "n, PageFaults, WriteBack\n1, 900, 12\n8, 850, 11\n",
        )]);

        let table = loader.load::<RegisterRow>(TableFamily::ClockVaryN).unwrap();
        assert_eq!(
            table.points(Column::PageFaults).unwrap(),
            vec![(1, 900), (8, 850)]
        );
    }

    #[test]
    fn test_missing_file_names_command() {
        let (_dir, loader) = loader_with(&[]);

        let err = loader.load::<FrameRow>(TableFamily::Optimal).unwrap_err();
        match err {
            ReportError::MissingInput { family, command, .. } => {
                assert_eq!(family, TableFamily::Optimal);
                assert_eq!(command, "./a3 OPT < Assignment_3_input_file.csv");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let (_dir, loader) = loader_with(&[("clock_vary_m.csv", "m,Faults\n1,10\n")]);

        let err = loader.load::<ShiftRow>(TableFamily::ClockVaryM).unwrap_err();
        match err {
            ReportError::Schema { column, .. } => assert_eq!(column, "PageFaults"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_value_is_csv_error() {
        let (_dir, loader) = loader_with(&[(
            "optimal_results.csv",
            "Frames,PageFaults,WriteBack\n1,lots,3\n",
        )]);

        let err = loader.load::<FrameRow>(TableFamily::Optimal).unwrap_err();
        assert!(matches!(err, ReportError::Csv { .. }));
    }

    #[test]
    fn test_header_only_loads_empty_table() {
        let (_dir, loader) = loader_with(&[("clock_vary_m.csv", "m,PageFaults\n")]);

        let table = loader.load::<ShiftRow>(TableFamily::ClockVaryM).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_into_fills_slot() {
        let (_dir, loader) = loader_with(&[("clock_vary_m.csv", "m,PageFaults\n1,10\n2,9\n")]);
        let mut tables = TableSet::default();

        let rows = loader
            .load_into(TableFamily::ClockVaryM, &mut tables)
            .unwrap();

        assert_eq!(rows, 2);
        assert!(tables.clock_vary_m.is_some());
        assert!(tables.fifo.is_none());
    }
}
