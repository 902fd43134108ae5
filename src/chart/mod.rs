//! Chart rendering.
//!
//! The catalog is fixed: five templates, each naming its series, styling and
//! output file. The renderer turns a template plus loaded tables into an SVG.

pub mod catalog;
pub mod renderer;
pub mod style;

pub use catalog::{ChartId, ChartTemplate, SeriesSpec};
pub use renderer::{ChartArtifact, ChartRenderer};
pub use style::ChartStyle;
