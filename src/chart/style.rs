//! Chart styling.
//!
//! [`ChartStyle`] is built once from the `[chart]` config section and then
//! only read. Per-series looks live in [`SeriesStyle`] on each template.

use crate::config::ChartConfig;
use plotters::style::RGBColor;

pub const FIFO_RED: RGBColor = RGBColor(0xE7, 0x4C, 0x3C);
pub const OPTIMAL_BLUE: RGBColor = RGBColor(0x34, 0x98, 0xDB);
pub const REGISTER_PURPLE: RGBColor = RGBColor(0x9B, 0x59, 0xB6);
pub const SHIFT_GREEN: RGBColor = RGBColor(0x16, 0xA0, 0x85);

/// Canvas-wide styling shared by every chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub wide_width: u32,
    pub wide_height: u32,
    pub font_family: String,
    pub title_size: u32,
    pub label_size: u32,
    pub legend_size: u32,
    pub line_width: u32,
    pub grid_opacity: f64,
}

impl From<&ChartConfig> for ChartStyle {
    fn from(config: &ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            wide_width: config.wide_width,
            wide_height: config.wide_height,
            font_family: config.font_family.clone(),
            title_size: config.title_size,
            label_size: config.label_size,
            legend_size: config.legend_size,
            line_width: config.line_width,
            grid_opacity: config.grid_opacity.clamp(0.0, 1.0),
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from(&ChartConfig::default())
    }
}

impl ChartStyle {
    /// Pixel size of a canvas.
    pub fn dimensions(&self, canvas: Canvas) -> (u32, u32) {
        match canvas {
            Canvas::Standard => (self.width, self.height),
            Canvas::Wide => (self.wide_width, self.wide_height),
        }
    }
}

/// Canvas size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canvas {
    Standard,
    Wide,
}

/// Point marker shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
}

/// Line stroke pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    Dashed,
}

/// Look of a single series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub color: RGBColor,
    pub marker: Marker,
    pub marker_size: u32,
    pub line: LineKind,
    pub opacity: f64,
}

impl SeriesStyle {
    pub const fn solid(color: RGBColor, marker: Marker, marker_size: u32) -> Self {
        Self {
            color,
            marker,
            marker_size,
            line: LineKind::Solid,
            opacity: 1.0,
        }
    }

    /// Dashed and faded, for secondary metrics drawn next to primary ones.
    pub const fn muted(color: RGBColor, marker: Marker, marker_size: u32) -> Self {
        Self {
            color,
            marker,
            marker_size,
            line: LineKind::Dashed,
            opacity: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_config() {
        let mut config = ChartConfig::default();
        config.width = 640;
        config.grid_opacity = 3.0;

        let style = ChartStyle::from(&config);
        assert_eq!(style.dimensions(Canvas::Standard), (640, 700));
        assert_eq!(style.dimensions(Canvas::Wide), (1400, 800));
        assert_eq!(style.grid_opacity, 1.0);
    }

    #[test]
    fn test_muted_series() {
        let style = SeriesStyle::muted(FIFO_RED, Marker::Circle, 3);
        assert_eq!(style.line, LineKind::Dashed);
        assert!(style.opacity < 1.0);
    }
}
