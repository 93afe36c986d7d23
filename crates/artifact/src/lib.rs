// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared artifact layout for regression runs.
//!
//! `run_tests` persists one artifact set per test into a target directory;
//! `compare_runs` reads two such directories back. This crate is the only
//! coupling between the two tools: the filename scheme, the per-test
//! [`RunArtifact`] record, and run-directory discovery.

mod naming;
mod store;

pub use naming::{
    id_from_output_name, output_name, oprofile_name, profile_name, stderr_name, timer_name,
};
pub use store::{ArtifactError, RunArtifact, RunDir};
