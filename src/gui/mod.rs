//! GUI module - User interface components

mod app;
mod chart_viewer;

pub use app::BenchPlotApp;
pub use chart_viewer::ChartViewer;
