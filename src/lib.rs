//! PageReport - charts and observations for page-replacement experiments.
//!
//! Loads the result tables written by the page-replacement simulator,
//! derives comparison metrics, renders a fixed catalog of SVG charts and
//! composes a deterministic text report from the computed numbers.

pub mod analysis;
pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod progress;
pub mod report;

pub use error::{ReportError, Result};
pub use pipeline::{Pipeline, RunSummary, Selection};
