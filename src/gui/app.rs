//! Benchplot Main Application
//! Window with a toolbar and the benchmark chart viewer.

use crate::charts::{ChartData, StaticChartRenderer};
use crate::gui::ChartViewer;
use crate::settings::ChartSettings;
use egui::{Color32, RichText, TopBottomPanel};
use tracing::warn;

/// Main application window.
pub struct BenchPlotApp {
    chart_viewer: ChartViewer,
    export_size: (u32, u32),
    status: String,
}

impl BenchPlotApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        chart: ChartData,
        settings: &ChartSettings,
    ) -> Self {
        Self {
            chart_viewer: ChartViewer::new(chart, settings.label_rotation_deg),
            export_size: (settings.export_size[0], settings.export_size[1]),
            status: "Ready".to_string(),
        }
    }

    /// Handle PNG export - ask for a path and render the chart there
    fn handle_export_png(&mut self) {
        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("benchmark.png")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match StaticChartRenderer::save_png(
            &self.chart_viewer.chart,
            &output_path,
            self.export_size,
        ) {
            Ok(()) => {
                self.status = format!("Saved {}", output_path.display());
            }
            Err(e) => {
                warn!(error = %e, "chart export failed");
                self.status = format!("Export error: {}", e);
            }
        }
    }
}

impl eframe::App for BenchPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut export_requested = false;

        TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("📊 {}", self.chart_viewer.chart.title))
                        .size(18.0)
                        .color(Color32::from_rgb(100, 149, 237)),
                );
                ui.label(
                    RichText::new(format!("{} benchmarks", self.chart_viewer.bar_count()))
                        .size(12.0)
                        .color(Color32::GRAY),
                );
                ui.separator();
                if ui.button("💾 Save PNG").clicked() {
                    export_requested = true;
                }
                ui.label(RichText::new(&self.status).size(12.0));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });

        if export_requested {
            self.handle_export_png();
        }
    }
}
