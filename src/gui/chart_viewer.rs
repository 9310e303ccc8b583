//! Chart Viewer Widget
//! Central panel hosting the interactive benchmark bar chart.

use crate::charts::{ChartData, ChartPlotter};
use egui::{Color32, RichText};

/// Displays one benchmark chart filling the available space.
pub struct ChartViewer {
    pub chart: ChartData,
    /// Counter-clockwise tick label rotation, in degrees
    pub label_rotation_deg: f32,
}

impl ChartViewer {
    pub fn new(chart: ChartData, label_rotation_deg: f32) -> Self {
        Self {
            chart,
            label_rotation_deg,
        }
    }

    pub fn bar_count(&self) -> usize {
        self.chart.bars.len()
    }

    /// Draw the chart. An empty result set still draws the axes.
    pub fn show(&self, ui: &mut egui::Ui) {
        if self.chart.bars.is_empty() {
            ui.label(
                RichText::new("Benchmark produced no rows")
                    .size(14.0)
                    .color(Color32::GRAY),
            );
        }

        ChartPlotter::draw_bar_chart(ui, &self.chart, self.label_rotation_deg);
    }
}
