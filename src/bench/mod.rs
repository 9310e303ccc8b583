//! Bench module - External benchmark execution

mod runner;

pub use runner::{BenchRunner, RunnerError};
