use std::{path::PathBuf, sync::Mutex};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh data home for one test.
pub fn isolated_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let home = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    home
}

/// The CLI in script mode, writing under `home`.
pub fn script_cli(home: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("execution_report_cli").expect("binary built");
    cmd.env("EXECUTION_REPORT_CLI_SCRIPT", "1")
        .env("EXECUTION_REPORT_HOME", home)
        .env_remove("RUST_LOG");
    cmd
}
