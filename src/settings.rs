//! Chart Settings Module
//! Run and display settings with defaults, optionally loaded from JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Flag that asks the benchmark to print CSV on stdout.
pub const DEFAULT_FORMAT_FLAG: &str = "--benchmark_format=csv";
/// Intermediate artifact, relative to the working directory.
pub const DEFAULT_INTERMEDIATE_PATH: &str = "output.csv";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for one benchmark run and its chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub format_flag: String,
    pub intermediate_path: PathBuf,
    /// Chart title; the benchmark file name when unset
    pub title: Option<String>,
    /// Y-axis label; detected from the `time_unit` column when unset
    pub y_label: Option<String>,
    /// Counter-clockwise rotation of the x tick labels, in degrees
    pub label_rotation_deg: f32,
    pub window_size: [f32; 2],
    pub export_size: [u32; 2],
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            format_flag: DEFAULT_FORMAT_FLAG.to_string(),
            intermediate_path: PathBuf::from(DEFAULT_INTERMEDIATE_PATH),
            title: None,
            y_label: None,
            label_rotation_deg: 15.0,
            window_size: [1200.0, 700.0],
            export_size: [1600, 900],
        }
    }
}

impl ChartSettings {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Resolve the chart title against the benchmark program path.
    pub fn resolve_title(&self, program: &Path) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| program.to_string_lossy().to_string())
    }
}
