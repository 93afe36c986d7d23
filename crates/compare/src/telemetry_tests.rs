// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use yare::parameterized;

const FULL: &[u8] = b"\
Parse time 1.25 seconds
Eval time 3.50 seconds
Timings:
 intersect - 2.10s
 classify - 0.80s
Totals:
Application - 10.00s
Parse - 1.25s
Eval - 3.50s
===
";

#[test]
fn parses_totals_section() {
    let stats = parse_timings(FULL);
    assert_eq!(stats.get("Application"), Some(&10.00));
    assert_eq!(stats.get("Parse"), Some(&1.25));
    assert_eq!(stats.get("Eval"), Some(&3.50));
}

#[test]
fn per_block_detail_before_totals_is_ignored() {
    let stats = parse_timings(FULL);
    assert_eq!(stats.get("intersect"), None);
    assert_eq!(stats.get("classify"), None);
}

#[test]
fn footer_line_is_excluded() {
    let stats = parse_timings(FULL);
    assert_eq!(stats.len(), 3);
}

#[parameterized(
    no_markers = { b"just ordinary stderr\n".as_slice() },
    empty = { b"".as_slice() },
    timings_without_totals = { b"Timings:\n something - 1.0s\n".as_slice() },
    totals_without_timings = { b"Totals:\nApplication - 1.0s\n".as_slice() },
)]
fn missing_markers_yield_empty_map(stderr: &[u8]) {
    assert!(parse_timings(stderr).is_empty());
}

#[test]
fn totals_marker_must_follow_timings_marker() {
    let stats = parse_timings(b"Totals:\nApplication - 1.0s\nTimings:\n");
    assert!(stats.is_empty());
}

#[test]
fn malformed_value_lines_are_skipped() {
    let stderr = b"Timings:\nTotals:\nApplication - ten seconds\nParse - 1.25s\n";
    let stats = parse_timings(stderr);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats.get("Parse"), Some(&1.25));
}

#[test]
fn markers_tolerate_surrounding_whitespace() {
    let stats = parse_timings(b"  Timings:  \n  Totals:  \nEval - 2.00s\n");
    assert_eq!(stats.get("Eval"), Some(&2.00));
}

#[test]
fn non_utf8_bytes_do_not_panic() {
    let mut stderr = b"Timings:\nTotals:\nApplication - 1.00s\n".to_vec();
    stderr.extend_from_slice(&[0xff, 0xfe, b'\n']);
    let stats = parse_timings(&stderr);
    assert_eq!(stats.get("Application"), Some(&1.00));
}
