use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_help_lists_flags() {
    let mut cmd = Command::new(cargo_bin!("bankdesk"));
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--data-dir"))
        .stdout(predicate::str::contains("--run-for"));
}

#[test]
fn test_bounded_run_creates_data_files() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("bank_data");

    let mut cmd = Command::new(cargo_bin!("bankdesk"));
    cmd.arg("--data-dir").arg(&data_dir).arg("--run-for").arg("1");

    let output = cmd.output().expect("failed to execute bankdesk");
    assert!(output.status.success());

    // Snapshot files are materialized at startup even before any
    // mutation; the transaction log appears on first append only.
    let payments = std::fs::read_to_string(data_dir.join("payments.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&payments).unwrap();
    assert!(parsed.as_array().unwrap().is_empty());
    assert!(data_dir.join("alerts.json").exists());
}
