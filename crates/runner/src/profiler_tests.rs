// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn tool_on_path_finds_a_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("opcontrol"), b"").unwrap();
    assert!(tool_on_path(
        "opcontrol",
        std::iter::once(temp.path().to_path_buf())
    ));
}

#[test]
fn tool_on_path_misses_absent_tool() {
    let temp = TempDir::new().unwrap();
    assert!(!tool_on_path(
        "opcontrol",
        std::iter::once(temp.path().to_path_buf())
    ));
}

#[test]
fn tool_on_path_skips_directories() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("opcontrol")).unwrap();
    assert!(!tool_on_path(
        "opcontrol",
        std::iter::once(temp.path().to_path_buf())
    ));
}

#[test]
fn none_resolves_without_probing() {
    assert_eq!(Instrumentation::None.resolve(), Instrumentation::None);
}

#[test]
fn sampler_prefix_names_the_profile_artifact() {
    let temp = TempDir::new().unwrap();
    let profiler = Profiler::new(
        Instrumentation::Sampler,
        &temp.path().join("subject"),
        temp.path(),
    );
    let prefix = profiler.launcher_prefix("t1");
    assert_eq!(prefix[0], "shark");
    assert!(prefix[2].ends_with("prof_t1"));
    assert_eq!(&prefix[3..], ["-G", "-i", "-1", "-c", "13"]);
}

#[test]
fn timer_prefix_names_the_timer_artifact() {
    let temp = TempDir::new().unwrap();
    let profiler = Profiler::new(
        Instrumentation::Time,
        &temp.path().join("subject"),
        temp.path(),
    );
    let prefix = profiler.launcher_prefix("t1");
    assert_eq!(prefix[..3], ["time", "-v", "-o"]);
    assert!(prefix[3].ends_with("time_t1"));
}

#[test]
fn uninstrumented_modes_have_no_prefix() {
    let temp = TempDir::new().unwrap();
    for mode in [Instrumentation::None, Instrumentation::Oprofile] {
        let profiler = Profiler::new(mode, &temp.path().join("subject"), temp.path());
        assert!(profiler.launcher_prefix("t1").is_empty());
    }
}

#[tokio::test]
async fn collect_report_is_none_when_uninstrumented() {
    let temp = TempDir::new().unwrap();
    let profiler = Profiler::new(
        Instrumentation::None,
        &temp.path().join("subject"),
        temp.path(),
    );
    assert!(profiler.collect_report().await.is_none());
}
