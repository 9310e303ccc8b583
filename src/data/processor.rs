//! Data Processor Module
//! Extracts ordered benchmark rows and the time unit from a loaded table.

use polars::prelude::*;
use thiserror::Error;
use tracing::warn;

pub const NAME_COL: &str = "name";
pub const REAL_TIME_COL: &str = "real_time";
pub const TIME_UNIT_COL: &str = "time_unit";

/// Y-axis label when the table does not name a single time unit.
pub const DEFAULT_TIME_LABEL: &str = "nanoseconds";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Benchmark output has no `{0}` column")]
    MissingColumn(String),
    #[error("Column `{column}` holds non-numeric values")]
    InvalidValue { column: String },
}

/// One benchmark case as reported by the benchmark executable.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRow {
    pub name: String,
    /// NaN when the benchmark left the cell empty (e.g. an errored case)
    pub real_time: f64,
}

/// Handles the conversion from a raw table to benchmark rows.
pub struct DataProcessor;

impl DataProcessor {
    /// Extract rows in table order. Duplicate names are kept.
    pub fn extract_rows(df: &DataFrame) -> Result<Vec<BenchmarkRow>, ProcessorError> {
        let name_col = Self::require_column(df, NAME_COL)?;
        let time_col = Self::require_column(df, REAL_TIME_COL)?;

        let names = name_col.cast(&DataType::String)?;
        let names = names.str()?;

        let times = time_col.cast(&DataType::Float64)?;
        // A non-strict cast turns unparsable cells into nulls
        if times.null_count() > time_col.null_count() {
            return Err(ProcessorError::InvalidValue {
                column: REAL_TIME_COL.to_string(),
            });
        }
        let times = times.f64()?;

        let rows: Vec<BenchmarkRow> = names
            .into_iter()
            .zip(times.into_iter())
            .map(|(name, real_time)| BenchmarkRow {
                name: name.unwrap_or_default().to_string(),
                real_time: real_time.unwrap_or(f64::NAN),
            })
            .collect();

        let missing = rows.iter().filter(|r| r.real_time.is_nan()).count();
        if missing > 0 {
            warn!(missing, "benchmark rows without real_time will have no bar");
        }

        Ok(rows)
    }

    /// Long name of the time unit shared by every row, if there is exactly one.
    pub fn detect_time_unit(df: &DataFrame) -> Option<&'static str> {
        let col = df.column(TIME_UNIT_COL).ok()?;
        let units = col.cast(&DataType::String).ok()?;
        let units = units.str().ok()?;

        let mut found: Option<&'static str> = None;
        for unit in units.into_iter().flatten() {
            let long = Self::unit_long_name(unit.trim())?;
            match found {
                Some(prev) if prev != long => return None,
                _ => found = Some(long),
            }
        }
        found
    }

    /// Y-axis label for the table: the shared time unit or nanoseconds.
    pub fn time_label(df: &DataFrame) -> String {
        Self::detect_time_unit(df)
            .unwrap_or(DEFAULT_TIME_LABEL)
            .to_string()
    }

    fn unit_long_name(unit: &str) -> Option<&'static str> {
        match unit {
            "ns" => Some("nanoseconds"),
            "us" => Some("microseconds"),
            "ms" => Some("milliseconds"),
            "s" => Some("seconds"),
            _ => None,
        }
    }

    fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ProcessorError> {
        df.column(name)
            .map_err(|_| ProcessorError::MissingColumn(name.to_string()))
    }
}
