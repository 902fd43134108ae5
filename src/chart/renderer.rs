//! SVG rendering of chart templates.
//!
//! Each chart is drawn into a temporary file next to its destination and
//! then renamed over it, so a chart on disk is always complete.

use super::catalog::{ChartId, ChartTemplate, SeriesSpec};
use super::style::{ChartStyle, LineKind, Marker};
use crate::error::{ReportError, Result};
use crate::models::TableSet;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// A chart written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartArtifact {
    pub id: ChartId,
    pub path: PathBuf,
}

/// Draws catalog templates into a plots directory.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    style: ChartStyle,
    plots_dir: PathBuf,
}

impl ChartRenderer {
    pub fn new(style: ChartStyle, plots_dir: impl Into<PathBuf>) -> Self {
        Self {
            style,
            plots_dir: plots_dir.into(),
        }
    }

    /// Fixed destination of a chart.
    pub fn output_path(&self, id: ChartId) -> PathBuf {
        self.plots_dir.join(id.file_name())
    }

    /// Render one chart from the loaded tables, replacing any previous file.
    pub fn render(&self, id: ChartId, tables: &TableSet) -> Result<ChartArtifact> {
        let template = id.template();
        let path = self.output_path(id);

        let series = template
            .series
            .iter()
            .map(|spec| {
                let points = tables
                    .points(spec.family, spec.column)?
                    .into_iter()
                    .map(|(x, y)| (x as f64, y as f64))
                    .collect();
                Ok((spec, points))
            })
            .collect::<Result<Vec<(&SeriesSpec, Vec<(f64, f64)>)>>>()?;

        let staging = tempfile::Builder::new()
            .prefix(".plot")
            .suffix(".svg")
            .tempfile_in(&self.plots_dir)
            .map_err(|e| ReportError::io(&self.plots_dir, e))?
            .into_temp_path();

        self.draw(&template, &series, &staging)
            .map_err(|e| ReportError::render(&path, e))?;

        staging
            .persist(&path)
            .map_err(|e| ReportError::render(&path, e))?;

        debug!("Rendered {} to {}", id, path.display());
        Ok(ChartArtifact { id, path })
    }

    fn draw(
        &self,
        template: &ChartTemplate,
        series: &[(&SeriesSpec, Vec<(f64, f64)>)],
        target: &Path,
    ) -> DrawResult {
        let style = &self.style;
        let font = style.font_family.as_str();

        let root = SVGBackend::new(target, style.dimensions(template.canvas)).into_drawing_area();
        root.fill(&WHITE)?;

        let (x_range, y_range) = axis_ranges(series);

        let mut chart = ChartBuilder::on(&root)
            .caption(template.title, (font, style.title_size))
            .margin(20)
            .x_label_area_size(style.label_size * 3)
            .y_label_area_size(style.label_size * 4)
            .build_cartesian_2d(x_range, y_range)?;

        let whole = |v: &f64| format!("{:.0}", v);
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(template.x_label)
            .y_desc(template.y_label)
            .axis_desc_style((font, style.label_size))
            .label_style((font, style.legend_size))
            .x_label_formatter(&whole)
            .y_label_formatter(&whole)
            .bold_line_style(BLACK.mix(style.grid_opacity))
            .light_line_style(BLACK.mix(style.grid_opacity / 3.0));
        if let Some(count) = template.x_label_count {
            mesh.x_labels(count);
        }
        mesh.draw()?;

        for (spec, points) in series {
            let color = spec.style.color.mix(spec.style.opacity);
            let line = color.stroke_width(style.line_width);
            let fill = color.filled();
            let size = spec.style.marker_size as i32;

            let anno = match spec.style.line {
                LineKind::Solid => chart.draw_series(LineSeries::new(points.iter().copied(), line))?,
                LineKind::Dashed => chart.draw_series(DashedLineSeries::new(
                    points.iter().copied(),
                    10u32,
                    6u32,
                    line,
                ))?,
            };
            if let Some(label) = spec.label {
                anno.label(label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line));
            }

            match spec.style.marker {
                Marker::Circle => {
                    chart.draw_series(points.iter().map(|&p| Circle::new(p, size, fill)))?;
                }
                Marker::Square => {
                    chart.draw_series(points.iter().map(|&p| {
                        EmptyElement::at(p) + Rectangle::new([(-size, -size), (size, size)], fill)
                    }))?;
                }
            }
        }

        if template.has_legend() {
            chart
                .configure_series_labels()
                .label_font((font, style.legend_size))
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

/// Axis ranges covering every point, with the y axis anchored at zero.
fn axis_ranges(series: &[(&SeriesSpec, Vec<(f64, f64)>)]) -> (Range<f64>, Range<f64>) {
    let mut points = series.iter().flat_map(|(_, pts)| pts.iter());

    let Some(&(first_x, first_y)) = points.next() else {
        return (0.0..1.0, 0.0..1.0);
    };

    let (x_min, x_max, y_max) = points.fold((first_x, first_x, first_y), |(lo, hi, top), &(x, y)| {
        (lo.min(x), hi.max(x), top.max(y))
    });

    let x_range = if x_min < x_max {
        x_min..x_max
    } else {
        (x_min - 1.0)..(x_max + 1.0)
    };
    let y_range = 0.0..(y_max * 1.05).max(1.0);

    (x_range, y_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperimentTable, FrameRow, RegisterRow, TableFamily};
    use tempfile::TempDir;

    fn tables() -> TableSet {
        let frames = |scale: u64, family| {
            ExperimentTable::new(
                family,
                (1..=5)
                    .map(|f| FrameRow {
                        frames: f * 10,
                        page_faults: scale * 100 / f as u64,
                        write_backs: scale * 20 / f as u64,
                    })
                    .collect(),
            )
            .unwrap()
        };

        TableSet {
            fifo: Some(frames(12, TableFamily::Fifo)),
            optimal: Some(frames(10, TableFamily::Optimal)),
            clock_vary_n: Some(
                ExperimentTable::new(
                    TableFamily::ClockVaryN,
                    vec![
                        RegisterRow { n: 1, page_faults: 900 },
                        RegisterRow { n: 8, page_faults: 850 },
                        RegisterRow { n: 32, page_faults: 870 },
                    ],
                )
                .unwrap(),
            ),
            clock_vary_m: None,
        }
    }

    #[test]
    fn test_render_writes_svg() {
        let dir = TempDir::new().unwrap();
        let renderer = ChartRenderer::new(ChartStyle::default(), dir.path());

        let artifact = renderer.render(ChartId::Combined, &tables()).unwrap();

        assert_eq!(artifact.path, dir.path().join("plot3_combined.svg"));
        let svg = std::fs::read_to_string(&artifact.path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Combined Performance Metrics"));
        assert!(svg.contains("Optimal - Write-backs"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let renderer = ChartRenderer::new(ChartStyle::default(), dir.path());

        let first = renderer.render(ChartId::RegisterSize, &tables()).unwrap();
        let before = std::fs::read(&first.path).unwrap();
        let second = renderer.render(ChartId::RegisterSize, &tables()).unwrap();
        let after = std::fs::read(&second.path).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_render_leaves_no_staging_files() {
        let dir = TempDir::new().unwrap();
        let renderer = ChartRenderer::new(ChartStyle::default(), dir.path());

        renderer.render(ChartId::PageFaults, &tables()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_render_missing_table() {
        let dir = TempDir::new().unwrap();
        let renderer = ChartRenderer::new(ChartStyle::default(), dir.path());

        let err = renderer.render(ChartId::ShiftInterval, &tables()).unwrap_err();
        assert!(matches!(err, ReportError::TableNotLoaded { .. }));
        assert!(!renderer.output_path(ChartId::ShiftInterval).exists());
    }

    #[test]
    fn test_render_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let renderer = ChartRenderer::new(ChartStyle::default(), dir.path().join("absent"));

        assert!(renderer.render(ChartId::PageFaults, &tables()).is_err());
    }

    #[test]
    fn test_axis_ranges_single_point() {
        let spec = ChartId::RegisterSize.template().series[0].clone();
        let series = vec![(&spec, vec![(8.0, 850.0)])];

        let (x, y) = axis_ranges(&series);
        assert_eq!(x, 7.0..9.0);
        assert_eq!(y.start, 0.0);
        assert!(y.end > 850.0);
    }
}
