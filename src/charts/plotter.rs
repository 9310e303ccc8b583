//! Chart Plotter Module
//! Builds the bar chart model and draws it interactively using egui_plot.

use crate::data::BenchmarkRow;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Pos2, Sense, Vec2};
use egui_plot::{Bar, BarChart, Plot, PlotPoint};

/// Bar fill color
pub const BAR_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

const BAR_WIDTH: f64 = 0.8;
const LABEL_FONT_SIZE: f32 = 12.0;
const LABEL_PADDING: f32 = 4.0;
const MIN_PLOT_HEIGHT: f32 = 200.0;

/// A single bar: one benchmark case.
#[derive(Debug, Clone, PartialEq)]
pub struct BarData {
    /// X position, equal to the row index
    pub position: f64,
    pub label: String,
    pub height: f64,
}

/// Bar chart of benchmark timings, one bar per row in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub y_label: String,
    pub bars: Vec<BarData>,
}

impl ChartData {
    pub fn from_rows(
        rows: &[BenchmarkRow],
        title: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        let bars = rows
            .iter()
            .enumerate()
            .map(|(i, row)| BarData {
                position: i as f64,
                label: row.name.clone(),
                height: row.real_time,
            })
            .collect();

        Self {
            title: title.into(),
            y_label: y_label.into(),
            bars,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.label.as_str()).collect()
    }

    /// Bars that can actually be drawn (finite height).
    pub fn drawable_bars(&self) -> impl Iterator<Item = &BarData> {
        self.bars.iter().filter(|b| b.height.is_finite())
    }

    /// Y range covering zero and every drawable bar, with headroom on top.
    pub fn value_range(&self) -> (f64, f64) {
        let (min, max) = self
            .drawable_bars()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), b| (lo.min(b.height), hi.max(b.height)));

        let top = if max > 0.0 { max * 1.1 } else { 1.0 };
        let bottom = if min < 0.0 { min * 1.1 } else { 0.0 };
        (bottom, top)
    }
}

/// Draws the benchmark bar chart using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw the bar chart with rotated tick labels painted below the plot.
    ///
    /// `rotation_deg` rotates labels counter-clockwise.
    pub fn draw_bar_chart(ui: &mut egui::Ui, chart: &ChartData, rotation_deg: f32) {
        // egui angles are clockwise in screen space
        let angle = -rotation_deg.to_radians();
        let text_color = ui.visuals().text_color();
        let font_id = FontId::proportional(LABEL_FONT_SIZE);

        let galleys: Vec<_> = chart
            .bars
            .iter()
            .map(|bar| {
                ui.painter()
                    .layout_no_wrap(bar.label.clone(), font_id.clone(), text_color)
            })
            .collect();
        let max_label = galleys
            .iter()
            .fold(Vec2::ZERO, |acc, g| acc.max(g.size()));
        let band_height = Self::label_band_height(max_label, angle);

        let plot_height = (ui.available_height() - band_height).max(MIN_PLOT_HEIGHT);
        let last_x = chart.bars.len().max(1) as f64 - 0.5;

        let bars: Vec<Bar> = chart
            .drawable_bars()
            .map(|b| {
                Bar::new(b.position, b.height)
                    .name(&b.label)
                    .width(BAR_WIDTH)
                    .fill(BAR_COLOR)
            })
            .collect();

        let response = Plot::new(format!("bars_{}", chart.title))
            .height(plot_height)
            .y_axis_label(chart.y_label.clone())
            .show_axes([false, true])
            .include_x(-0.5)
            .include_x(last_x)
            .include_y(0.0)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(BAR_COLOR)
                        .name("real_time")
                        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
                            format!("{}\n{:.3}", bar.name, bar.value)
                        })),
                );
            });

        let frame = *response.transform.frame();
        let (band, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), band_height),
            Sense::hover(),
        );
        let painter = ui.painter();

        for (bar, galley) in chart.bars.iter().zip(galleys) {
            let tick = response
                .transform
                .position_from_point(&PlotPoint::new(bar.position, 0.0));
            if tick.x < frame.left() || tick.x > frame.right() {
                continue;
            }
            let anchor = Self::label_anchor(tick.x, band.top(), galley.size(), angle);
            painter.add(TextShape::new(anchor, galley, text_color).with_angle(angle));
        }
    }

    /// Height needed below the plot for labels of at most `max_label` size.
    pub fn label_band_height(max_label: Vec2, angle: f32) -> f32 {
        2.0 * LABEL_PADDING + max_label.x * angle.sin().abs() + max_label.y
    }

    /// Top-left anchor of a label rotated by `angle` so that its center
    /// sits under `tick_x`, just clear of `top`.
    pub fn label_anchor(tick_x: f32, top: f32, size: Vec2, angle: f32) -> Pos2 {
        let (sin, cos) = angle.sin_cos();
        let dir = egui::vec2(cos, sin);
        let normal = egui::vec2(-sin, cos);
        let rise = size.x / 2.0 * sin.abs();
        let center = egui::pos2(tick_x, top + LABEL_PADDING + rise + size.y / 2.0);
        center - dir * (size.x / 2.0) - normal * (size.y / 2.0)
    }
}
