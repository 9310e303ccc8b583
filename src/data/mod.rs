//! Data module - CSV loading and row extraction

mod loader;
mod processor;

pub use loader::DataLoader;
pub use processor::{BenchmarkRow, DataProcessor};
