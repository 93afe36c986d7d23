// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run-directory I/O: artifact persistence and discovery.

use crate::naming;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot list run directory {dir}: {source}")]
    ListDir {
        dir: PathBuf,
        source: std::io::Error,
    },
}

/// One test's captured outputs, created once per execution and immutable.
///
/// Only the output blobs are persisted; the exit code lives in the suite
/// report, not on disk.
#[derive(Debug)]
pub struct RunArtifact {
    pub test_id: String,
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Profiler report content, when the run was instrumented with a
    /// post-run collector.
    pub profile: Option<Vec<u8>>,
}

/// A target directory holding per-test artifacts for one suite run.
#[derive(Clone, Debug)]
pub struct RunDir {
    root: PathBuf,
}

impl RunDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the directory if absent. Called once, before the first test.
    pub fn create(&self) -> Result<(), ArtifactError> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output_path(&self, id: &str) -> PathBuf {
        self.root.join(naming::output_name(id))
    }

    pub fn stderr_path(&self, id: &str) -> PathBuf {
        self.root.join(naming::stderr_name(id))
    }

    pub fn oprofile_path(&self, id: &str) -> PathBuf {
        self.root.join(naming::oprofile_name(id))
    }

    pub fn profile_path(&self, id: &str) -> PathBuf {
        self.root.join(naming::profile_name(id))
    }

    pub fn timer_path(&self, id: &str) -> PathBuf {
        self.root.join(naming::timer_name(id))
    }

    /// Persist an artifact set, unconditionally overwriting existing files
    /// for the same id.
    pub fn persist(&self, artifact: &RunArtifact) -> Result<(), ArtifactError> {
        fs::write(self.output_path(&artifact.test_id), &artifact.stdout)?;
        fs::write(self.stderr_path(&artifact.test_id), &artifact.stderr)?;
        if let Some(ref report) = artifact.profile {
            fs::write(self.oprofile_path(&artifact.test_id), report)?;
        }
        Ok(())
    }

    /// Read a test's captured stdout.
    pub fn read_output(&self, id: &str) -> Result<Vec<u8>, ArtifactError> {
        Ok(fs::read(self.output_path(id))?)
    }

    /// Read a test's captured stderr, treating a missing or unreadable file
    /// as empty. Telemetry absence is never an error.
    pub fn read_stderr_or_empty(&self, id: &str) -> Vec<u8> {
        fs::read(self.stderr_path(id)).unwrap_or_default()
    }

    /// Ids with a completed `test_<id>.out` in this directory, sorted.
    pub fn completed_ids(&self) -> Result<BTreeSet<String>, ArtifactError> {
        let entries = fs::read_dir(&self.root).map_err(|source| ArtifactError::ListDir {
            dir: self.root.clone(),
            source,
        })?;

        let mut ids = BTreeSet::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            if let Some(id) = name.to_str().and_then(naming::id_from_output_name) {
                ids.insert(id.to_string());
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
