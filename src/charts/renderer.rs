//! Static Chart Renderer
//! Renders the benchmark bar chart to a PNG file using plotters.
//!
//! Layout:
//! 1. Title centered on top
//! 2. Y-axis labeled with the time unit
//! 3. One bar per benchmark, x labels rotated below the axis

use crate::charts::ChartData;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const BAR: RGBColor = RGBColor(52, 152, 219);
const LABEL_FONT_SIZE: u32 = 14;
const LABEL_CHAR_WIDTH: u32 = 8;
const MIN_LABEL_AREA: u32 = 40;
const MAX_LABEL_AREA: u32 = 320;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `chart` as a PNG of `size` pixels at `path`.
    pub fn save_png(chart: &ChartData, path: &Path, size: (u32, u32)) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let n = chart.bars.len().max(1);
        let (y_min, y_max) = chart.value_range();

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(Self::x_label_area(chart))
            .y_label_area_size(80)
            .build_cartesian_2d((0..n).into_segmented(), y_min..y_max)
            .map_err(draw_err)?;

        let labels = chart.labels();
        let label_for = |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).map(|s| s.to_string()).unwrap_or_default(),
            _ => String::new(),
        };

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&label_for)
            .x_label_style(
                ("sans-serif", LABEL_FONT_SIZE)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_desc(chart.y_label.as_str())
            .axis_desc_style(("sans-serif", 16))
            .draw()
            .map_err(draw_err)?;

        ctx.draw_series(
            Histogram::vertical(&ctx)
                .style(BAR.filled())
                .margin(8)
                .data(
                    chart
                        .drawable_bars()
                        .map(|b| (b.position as usize, b.height)),
                ),
        )
        .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        info!(path = %path.display(), bars = chart.bars.len(), "chart image saved");
        Ok(())
    }

    /// Pixels reserved under the x axis for vertical labels.
    fn x_label_area(chart: &ChartData) -> u32 {
        let longest = chart
            .bars
            .iter()
            .map(|b| b.label.chars().count() as u32)
            .max()
            .unwrap_or(0);
        (longest * LABEL_CHAR_WIDTH + 20).clamp(MIN_LABEL_AREA, MAX_LABEL_AREA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BenchmarkRow;

    fn chart_with_labels(labels: &[&str]) -> ChartData {
        let rows: Vec<BenchmarkRow> = labels
            .iter()
            .map(|l| BenchmarkRow {
                name: l.to_string(),
                real_time: 1.0,
            })
            .collect();
        ChartData::from_rows(&rows, "bench", "nanoseconds")
    }

    #[test]
    fn label_area_grows_with_longest_label() {
        let short = StaticChartRenderer::x_label_area(&chart_with_labels(&["a"]));
        let long = StaticChartRenderer::x_label_area(&chart_with_labels(&[
            "a",
            "BM_vector_push_back/1024",
        ]));

        assert_eq!(short, MIN_LABEL_AREA);
        assert_eq!(long, 24 * LABEL_CHAR_WIDTH + 20);
    }

    #[test]
    fn label_area_is_capped() {
        let huge = "x".repeat(500);
        let area = StaticChartRenderer::x_label_area(&chart_with_labels(&[huge.as_str()]));
        assert_eq!(area, MAX_LABEL_AREA);
    }

    #[test]
    fn empty_chart_reserves_minimum_area() {
        let chart = ChartData::from_rows(&[], "bench", "nanoseconds");
        assert_eq!(StaticChartRenderer::x_label_area(&chart), MIN_LABEL_AREA);
    }
}
