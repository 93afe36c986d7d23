// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Timing telemetry extraction.
//!
//! The subject reports wall-clock sections on stderr:
//!
//! ```text
//! Timings:
//!   ...per-block detail...
//! Totals:
//! Application - 10.00s
//! Parse - 1.25s
//! Eval - 3.50s
//! ===
//! ```
//!
//! Only the lines after `Totals:` are authoritative. Lines without a
//! `<name> - <value>s` payload (the trailing footer, separators) are
//! skipped; a missing marker yields an empty map, never an error. Stats are
//! recomputed from the artifact on every read; nothing parsed is persisted.

use std::collections::BTreeMap;

/// Metric name → elapsed seconds.
pub type TimingStats = BTreeMap<String, f64>;

/// The metrics compared between runs, in report order.
pub const COMPARED_METRICS: [&str; 3] = ["Application", "Parse", "Eval"];

pub fn parse_timings(stderr: &[u8]) -> TimingStats {
    let text = String::from_utf8_lossy(stderr);
    let mut lines = text.lines();

    if !lines.any(|line| line.trim() == "Timings:") {
        return TimingStats::new();
    }
    if !lines.any(|line| line.trim() == "Totals:") {
        return TimingStats::new();
    }

    let mut stats = TimingStats::new();
    for line in lines {
        let Some((name, value)) = line.split_once(" - ") else {
            continue;
        };
        let Some(seconds) = value.trim().strip_suffix('s') else {
            continue;
        };
        if let Ok(seconds) = seconds.trim().parse::<f64>() {
            stats.insert(name.trim().to_string(), seconds);
        }
    }
    stats
}

#[cfg(test)]
#[path = "telemetry_tests.rs"]
mod tests;
