// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! End-to-end tests for the `compare_runs` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn compare_runs_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_compare_runs"))
}

fn write_artifacts(dir: &Path, id: &str, stdout: &str, application_secs: Option<f64>) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(format!("test_{id}.out")), stdout).unwrap();
    let stderr = match application_secs {
        Some(secs) => format!("Timings:\nTotals:\nApplication - {secs:.2}s\n===\n"),
        None => "no telemetry".to_string(),
    };
    fs::write(dir.join(format!("test_{id}.err")), stderr).unwrap();
}

#[test]
fn reports_common_tests_with_deltas() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("base");
    let cand = temp.path().join("cand");

    // ids {a,b,c} vs {b,c,d}: common set is {b,c}
    write_artifacts(&base, "a", "x", Some(1.0));
    write_artifacts(&base, "b", "same", Some(10.0));
    write_artifacts(&base, "c", "left", Some(2.0));
    write_artifacts(&cand, "b", "same", Some(11.0));
    write_artifacts(&cand, "c", "right", None);
    write_artifacts(&cand, "d", "x", Some(1.0));

    let output = Command::new(compare_runs_bin())
        .args([&base, &cand])
        .output()
        .expect("failed to run compare_runs");

    assert!(output.status.success(), "expected success: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines[0], "2 tests common to both runs");

    assert!(lines[1].starts_with("b "), "line: {}", lines[1]);
    assert!(lines[1].contains("OK"), "line: {}", lines[1]);
    assert!(lines[1].contains("+10.00%"), "line: {}", lines[1]);

    assert!(lines[2].starts_with("c "), "line: {}", lines[2]);
    assert!(lines[2].contains("DIFFER"), "line: {}", lines[2]);
    // candidate c has no telemetry: all three columns placeholder
    assert!(lines[2].contains("Application      ---"), "line: {}", lines[2]);
    assert!(lines[2].contains("Parse      ---"), "line: {}", lines[2]);
    assert!(lines[2].contains("Eval      ---"), "line: {}", lines[2]);
}

#[test]
fn report_goes_to_stdout_only() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("base");
    let cand = temp.path().join("cand");
    write_artifacts(&base, "t", "x", None);
    write_artifacts(&cand, "t", "x", None);

    let output = Command::new(compare_runs_bin())
        .args([&base, &cand])
        .output()
        .expect("failed to run compare_runs");

    assert!(output.status.success());
    assert!(output.stderr.is_empty(), "stderr: {output:?}");
    assert!(!output.stdout.is_empty());
}

#[test]
fn missing_run_directory_is_fatal() {
    let temp = TempDir::new().unwrap();
    assert_cmd::Command::new(compare_runs_bin())
        .args([temp.path().join("nope"), temp.path().join("also-nope")])
        .assert()
        .failure()
        .stderr(predicates::str::contains("nope"));
}
