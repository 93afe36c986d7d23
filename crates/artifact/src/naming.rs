// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact filename scheme.
//!
//! A test id maps to a fixed set of filenames inside the run directory.
//! A repeated id in a script overwrites the earlier files; ids are not
//! validated unique anywhere.

/// Captured stdout: `test_<id>.out`. Presence of this file marks the test
/// as completed for discovery purposes.
pub fn output_name(id: &str) -> String {
    format!("test_{id}.out")
}

/// Captured stderr: `test_<id>.err`.
pub fn stderr_name(id: &str) -> String {
    format!("test_{id}.err")
}

/// Post-run profiler report: `oprofile_<id>.out`.
pub fn oprofile_name(id: &str) -> String {
    format!("oprofile_{id}.out")
}

/// Sampling-profiler output file: `prof_<id>`. Written by the sampler
/// itself, not by the runner.
pub fn profile_name(id: &str) -> String {
    format!("prof_{id}")
}

/// Resource-timer output file: `time_<id>`. Written by the timer itself.
pub fn timer_name(id: &str) -> String {
    format!("time_{id}")
}

/// Extract the test id from a completed-output filename.
///
/// Returns `None` for anything that is not a `test_<id>.out` name.
pub fn id_from_output_name(name: &str) -> Option<&str> {
    let id = name.strip_prefix("test_")?.strip_suffix(".out")?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
