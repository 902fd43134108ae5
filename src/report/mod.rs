//! Report generation and artifact writing.

pub mod composer;

pub use composer::{compose_report, format_sweep_statistics, ReportComposer};

use crate::error::{ReportError, Result};
use std::io::Write;
use std::path::Path;

/// Replace `path` with `contents` without ever leaving a partial file.
///
/// The data goes to a temporary file in the same directory first, which is
/// then renamed over the destination.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staging = tempfile::NamedTempFile::new_in(dir).map_err(|e| ReportError::io(dir, e))?;
    staging
        .write_all(contents)
        .and_then(|_| staging.flush())
        .map_err(|e| ReportError::io(path, e))?;
    staging
        .persist(path)
        .map_err(|e| ReportError::io(path, e.error))?;

    Ok(())
}
