//! Benchplot - Benchmark Runner & Timing Bar Chart Viewer
//!
//! Runs a benchmark executable with CSV output enabled, keeps the output in an
//! intermediate file and shows a bar chart of each case's `real_time`.

mod bench;
mod charts;
mod data;
mod gui;
mod settings;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use bench::{BenchRunner, RunnerError};
use charts::{ChartData, StaticChartRenderer};
use clap::Parser;
use data::{DataLoader, DataProcessor};
use eframe::egui;
use gui::BenchPlotApp;
use settings::ChartSettings;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Exit status when the benchmark command fails (255 on Unix).
const BENCHMARK_FAILED_EXIT: i32 = -1;
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Parser)]
#[command(
    name = "benchplot",
    version,
    about = "Run a benchmark executable and chart its real_time results",
    long_about = None
)]
struct Cli {
    /// Benchmark executable to run with `--benchmark_format=csv`
    #[arg(value_name = "BENCHMARK")]
    benchmark: PathBuf,

    /// Also render the chart to a PNG file
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Do not open the chart window
    #[arg(long)]
    no_window: bool,

    /// JSON file with chart settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Extra arguments for the benchmark, given after `--`
    #[arg(last = true, value_name = "ARGS")]
    bench_args: Vec<OsString>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli) {
        Err(err) if err.is::<RunnerError>() => {
            debug!(error = ?err, "benchmark command failed");
            eprintln!("Error occurred: {err}");
            std::process::exit(BENCHMARK_FAILED_EXIT);
        }
        result => result,
    }
}

fn init_tracing() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// Execute, load, render. Only the execute step has a recognized failure.
fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => ChartSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ChartSettings::default(),
    };

    let output = settings.intermediate_path.clone();
    BenchRunner::new(&cli.benchmark, settings.format_flag.clone())
        .with_args(cli.bench_args.iter().cloned())
        .run(&output)?;

    let chart = load_chart(&output, &settings, &cli.benchmark)?;

    if let Some(path) = &cli.save {
        let size = (settings.export_size[0], settings.export_size[1]);
        StaticChartRenderer::save_png(&chart, path, size)
            .with_context(|| format!("saving chart to {}", path.display()))?;
    }

    if cli.no_window {
        info!(bars = chart.bars.len(), "window disabled, done");
        return Ok(());
    }

    show_window(chart, &settings)
}

fn load_chart(path: &Path, settings: &ChartSettings, program: &Path) -> anyhow::Result<ChartData> {
    let mut loader = DataLoader::new();
    loader
        .load_csv(path)
        .with_context(|| format!("reading benchmark output {}", path.display()))?;
    debug!(
        columns = ?loader.get_columns(),
        rows = loader.get_row_count(),
        "benchmark table"
    );
    let df = loader.get_dataframe()?;

    let rows = DataProcessor::extract_rows(df)
        .with_context(|| format!("extracting benchmark rows from {}", path.display()))?;
    let y_label = settings
        .y_label
        .clone()
        .unwrap_or_else(|| DataProcessor::time_label(df));

    info!(rows = rows.len(), y_label = %y_label, "benchmark rows loaded");
    Ok(ChartData::from_rows(
        &rows,
        settings.resolve_title(program),
        y_label,
    ))
}

/// Blocks until the window is closed.
fn show_window(chart: ChartData, settings: &ChartSettings) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(settings.window_size)
            .with_min_inner_size([640.0, 400.0])
            .with_title(format!("Benchplot - {}", chart.title)),
        ..Default::default()
    };

    let settings = settings.clone();
    eframe::run_native(
        "Benchplot",
        options,
        Box::new(move |cc| Ok(Box::new(BenchPlotApp::new(cc, chart, &settings)))),
    )
    .map_err(|e| anyhow::anyhow!("chart window failed: {e}"))
}
