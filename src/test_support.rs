//! Shared helpers for unit tests: fake benchmark executables and CSV fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static SPAWN_LOCK: Mutex<()> = Mutex::new(());

/// Serializes script creation and process spawning across test threads.
///
/// A child forked while another thread still holds a freshly written script
/// open for writing makes `exec` fail with ETXTBSY.
pub fn spawn_lock() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write an executable `/bin/sh` script that behaves like a benchmark binary.
#[cfg(unix)]
pub fn fake_benchmark(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write fake benchmark");
    let mut perms = fs::metadata(&path).expect("stat fake benchmark").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod fake benchmark");
    path
}

/// A benchmark that refuses to run without the CSV flag and then prints `csv`.
#[cfg(unix)]
pub fn csv_benchmark(dir: &Path, name: &str, csv: &str) -> PathBuf {
    let body = format!(
        "[ \"$1\" = \"--benchmark_format=csv\" ] || exit 3\ncat <<'EOF'\n{}EOF",
        csv
    );
    fake_benchmark(dir, name, &body)
}

pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write csv fixture");
    path
}

pub const CASES_CSV: &str = "name,real_time\ncase_a,120.5\ncase_b,98.2\ncase_c,150.0\n";
