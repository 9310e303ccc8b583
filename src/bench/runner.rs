//! Benchmark Runner Module
//! Spawns the benchmark executable and captures its CSV output to a file.

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;
use tracing::{debug, info};

/// Every variant means the benchmark command failed; no retry is attempted.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to create {}: {source}", path.display())]
    Artifact {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },
    #[error("{} exited with {status}", program.display())]
    Failed { program: PathBuf, status: ExitStatus },
}

/// Runs a benchmark executable with the CSV format flag.
#[derive(Debug, Clone)]
pub struct BenchRunner {
    program: PathBuf,
    format_flag: String,
    extra_args: Vec<OsString>,
}

impl BenchRunner {
    pub fn new(program: impl Into<PathBuf>, format_flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            format_flag: format_flag.into(),
            extra_args: Vec::new(),
        }
    }

    /// Arguments passed after the format flag.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Build the command without a shell; the program path is never
    /// interpolated into a command line.
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(&self.format_flag).args(&self.extra_args);
        cmd
    }

    /// Run the benchmark to completion, truncating `output` and filling it
    /// with the benchmark's stdout. Stderr stays attached to ours.
    pub fn run(&self, output: &Path) -> Result<(), RunnerError> {
        let artifact = File::create(output).map_err(|source| RunnerError::Artifact {
            path: output.to_path_buf(),
            source,
        })?;

        info!(
            program = %self.program.display(),
            flag = %self.format_flag,
            extra_args = self.extra_args.len(),
            "running benchmark"
        );

        let status = self
            .command()
            .stdin(Stdio::null())
            .stdout(Stdio::from(artifact))
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| RunnerError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        debug!(%status, output = %output.display(), "benchmark finished");

        if !status.success() {
            return Err(RunnerError::Failed {
                program: self.program.clone(),
                status,
            });
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_support::{csv_benchmark, fake_benchmark, spawn_lock, CASES_CSV};
    use std::fs;

    #[test]
    fn captures_stdout_into_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.csv");
        let _guard = spawn_lock();
        let bench = csv_benchmark(dir.path(), "bench", CASES_CSV);

        BenchRunner::new(&bench, "--benchmark_format=csv")
            .run(&output)
            .unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), CASES_CSV);
    }

    #[test]
    fn passes_format_flag_before_extra_args() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.csv");
        let _guard = spawn_lock();
        let bench = fake_benchmark(dir.path(), "bench", r#"printf '%s\n' "$@""#);

        BenchRunner::new(&bench, "--benchmark_format=csv")
            .with_args(["--benchmark_filter=BM_one", "it's; rm -rf /"])
            .run(&output)
            .unwrap();

        let args: Vec<String> = fs::read_to_string(&output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(
            args,
            vec![
                "--benchmark_format=csv",
                "--benchmark_filter=BM_one",
                "it's; rm -rf /"
            ]
        );
    }

    #[test]
    fn non_zero_exit_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.csv");
        let _guard = spawn_lock();
        let bench = fake_benchmark(dir.path(), "bench", "echo partial\nexit 7");

        let err = BenchRunner::new(&bench, "--benchmark_format=csv")
            .run(&output)
            .unwrap_err();

        match err {
            RunnerError::Failed { status, .. } => assert_eq!(status.code(), Some(7)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_program_is_a_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.csv");
        let _guard = spawn_lock();

        let err = BenchRunner::new(dir.path().join("no_such_bench"), "--benchmark_format=csv")
            .run(&output)
            .unwrap_err();

        assert!(matches!(err, RunnerError::Spawn { .. }));
    }

    #[test]
    fn unwritable_artifact_fails_before_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing_dir").join("output.csv");
        let _guard = spawn_lock();
        let marker = dir.path().join("ran");
        let bench = fake_benchmark(
            dir.path(),
            "bench",
            &format!("touch '{}'", marker.display()),
        );

        let err = BenchRunner::new(&bench, "--benchmark_format=csv")
            .run(&output)
            .unwrap_err();

        assert!(matches!(err, RunnerError::Artifact { .. }));
        assert!(!marker.exists());
    }

    #[test]
    fn rerun_overwrites_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.csv");
        fs::write(&output, "stale,stale,stale\nleftover rows that are longer\n").unwrap();
        let _guard = spawn_lock();
        let bench = csv_benchmark(dir.path(), "bench", CASES_CSV);
        let runner = BenchRunner::new(&bench, "--benchmark_format=csv");

        runner.run(&output).unwrap();
        let first = fs::read_to_string(&output).unwrap();
        runner.run(&output).unwrap();
        let second = fs::read_to_string(&output).unwrap();

        assert_eq!(first, CASES_CSV);
        assert_eq!(first, second);
    }
}
