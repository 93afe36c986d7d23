// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-test comparison and report rendering.
//!
//! Correctness oracle is byte-equality of the two runs' captured stdout;
//! timing movement is reported as signed percentage deltas. A metric absent
//! on either side renders the fixed placeholder rather than a number, so a
//! run without telemetry still compares cleanly.

use crate::telemetry::{self, COMPARED_METRICS};
use regress_artifact::{ArtifactError, RunDir};
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rendered in place of a delta when a side lacks the metric.
pub const DELTA_PLACEHOLDER: &str = "---";

/// One test's comparison across the two runs.
#[derive(Debug, PartialEq)]
pub struct ComparisonResult {
    pub test_id: String,
    pub stdout_equal: bool,
    /// Deltas in [`COMPARED_METRICS`] order; `None` when either side lacks
    /// the metric.
    pub deltas: [Option<f64>; 3],
}

/// `(candidate - baseline) / baseline * 100`, or `None` when either side
/// is missing or the baseline is zero (never a NaN).
pub fn percent_delta(baseline: Option<f64>, candidate: Option<f64>) -> Option<f64> {
    match (baseline, candidate) {
        (Some(b), Some(c)) if b != 0.0 => Some((c - b) / b * 100.0),
        _ => None,
    }
}

pub fn format_delta(delta: Option<f64>) -> String {
    match delta {
        Some(d) => format!("{d:+.2}%"),
        None => DELTA_PLACEHOLDER.to_string(),
    }
}

/// Compare one common test id across the two run directories.
pub fn compare_test(
    id: &str,
    baseline: &RunDir,
    candidate: &RunDir,
) -> Result<ComparisonResult, CompareError> {
    let base_out = baseline.read_output(id)?;
    let cand_out = candidate.read_output(id)?;
    let base_stats = telemetry::parse_timings(&baseline.read_stderr_or_empty(id));
    let cand_stats = telemetry::parse_timings(&candidate.read_stderr_or_empty(id));

    let deltas = COMPARED_METRICS.map(|metric| {
        percent_delta(
            base_stats.get(metric).copied(),
            cand_stats.get(metric).copied(),
        )
    });

    Ok(ComparisonResult {
        test_id: id.to_string(),
        stdout_equal: base_out == cand_out,
        deltas,
    })
}

pub fn render_line(result: &ComparisonResult) -> String {
    let flag = if result.stdout_equal { "OK" } else { "DIFFER" };
    let mut line = format!("{:<24} {:<6}", result.test_id, flag);
    for (metric, delta) in COMPARED_METRICS.iter().zip(result.deltas) {
        line.push_str(&format!("  {} {:>8}", metric, format_delta(delta)));
    }
    line
}

/// Full report: common-id count, then one line per test in sorted order.
pub fn write_report<W: Write>(
    baseline: &RunDir,
    candidate: &RunDir,
    out: &mut W,
) -> Result<(), CompareError> {
    let base_ids = baseline.completed_ids()?;
    let cand_ids = candidate.completed_ids()?;
    let common: Vec<&String> = base_ids.intersection(&cand_ids).collect();

    writeln!(out, "{} tests common to both runs", common.len())?;
    for id in common {
        let result = compare_test(id, baseline, candidate)?;
        writeln!(out, "{}", render_line(&result))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
