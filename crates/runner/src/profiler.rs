// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Instrumentation strategies wrapping each subject invocation.
//!
//! One strategy is chosen per run and injected at orchestrator
//! construction. `oprofile` brackets the suite with control-tool calls and
//! collects a per-test report; `sampler` and `time` prepend a launcher to
//! the subject argv and let the tool write its own file. A missing control
//! tool degrades the whole run to `none` with a single warning, never
//! fatal. Control-tool invocations themselves are fire-and-forget; only
//! availability is probed.

use crate::output::print_warning;
use crate::process::{self, RunOutcome};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Instrumentation {
    /// No instrumentation.
    None,
    /// opcontrol-driven system-wide sampling profiler.
    Oprofile,
    /// High-level sampling profiler launched per test.
    Sampler,
    /// Resource-usage timer (`time -v`) launched per test.
    Time,
}

impl Instrumentation {
    /// Tool whose presence on `PATH` the strategy depends on.
    fn control_tool(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Oprofile => Some("opcontrol"),
            Self::Sampler => Some("shark"),
            Self::Time => Some("time"),
        }
    }

    /// Probe the execution path once; degrade to `None` with one warning
    /// when the control tool is absent.
    pub fn resolve(self) -> Self {
        let Some(tool) = self.control_tool() else {
            return self;
        };
        let path = std::env::var_os("PATH").unwrap_or_default();
        if tool_on_path(tool, std::env::split_paths(&path)) {
            self
        } else {
            print_warning(format!("could not find {tool}; disabling instrumentation"));
            Self::None
        }
    }
}

/// Search the given directories for an executable file named `tool`.
pub fn tool_on_path(tool: &str, dirs: impl Iterator<Item = PathBuf>) -> bool {
    dirs.map(|dir| dir.join(tool)).any(|p| p.is_file())
}

/// Per-run profiler state: the resolved strategy plus the paths its
/// reports are scoped to.
pub struct Profiler {
    mode: Instrumentation,
    /// Absolute subject path; the post-run report is restricted to this
    /// binary's image.
    subject: PathBuf,
    target: PathBuf,
}

impl Profiler {
    pub fn new(mode: Instrumentation, subject: &Path, target: &Path) -> Self {
        let subject = std::fs::canonicalize(subject).unwrap_or_else(|_| subject.to_path_buf());
        Self {
            mode,
            subject,
            target: target.to_path_buf(),
        }
    }

    pub fn mode(&self) -> Instrumentation {
        self.mode
    }

    /// Launcher argv prefix placed ahead of the subject, if the strategy
    /// uses one.
    pub fn launcher_prefix(&self, id: &str) -> Vec<String> {
        match self.mode {
            Instrumentation::Sampler => {
                let out = self.target.join(regress_artifact::profile_name(id));
                vec![
                    "shark".to_string(),
                    "-o".to_string(),
                    out.to_string_lossy().into_owned(),
                    "-G".to_string(),
                    "-i".to_string(),
                    "-1".to_string(),
                    "-c".to_string(),
                    "13".to_string(),
                ]
            }
            Instrumentation::Time => {
                let out = self.target.join(regress_artifact::timer_name(id));
                vec![
                    "time".to_string(),
                    "-v".to_string(),
                    "-o".to_string(),
                    out.to_string_lossy().into_owned(),
                ]
            }
            Instrumentation::None | Instrumentation::Oprofile => Vec::new(),
        }
    }

    pub async fn start_suite(&self) {
        if self.mode == Instrumentation::Oprofile {
            self.opcontrol("--start").await;
        }
    }

    /// Reset profiler state ahead of one test.
    pub async fn before_test(&self) {
        if self.mode == Instrumentation::Oprofile {
            self.opcontrol("--reset").await;
        }
    }

    /// Collect the post-run report scoped to the subject image. When the
    /// report is empty but an error stream exists, the error text becomes
    /// the artifact content with an `ERROR:` marker.
    pub async fn collect_report(&self) -> Option<Vec<u8>> {
        if self.mode != Instrumentation::Oprofile {
            return None;
        }
        let argv = vec![
            "opreport".to_string(),
            "-l".to_string(),
            self.subject.to_string_lossy().into_owned(),
        ];
        match process::run(&argv, None).await {
            Ok(RunOutcome::Completed(captured)) => {
                if captured.stdout.is_empty() && !captured.stderr.is_empty() {
                    let mut content = b"ERROR:\n".to_vec();
                    content.extend_from_slice(&captured.stderr);
                    Some(content)
                } else {
                    Some(captured.stdout)
                }
            }
            Ok(RunOutcome::TimedOut { .. }) => None,
            Err(e) => {
                print_warning(format!("opreport failed: {e}"));
                None
            }
        }
    }

    pub async fn shutdown(&self) {
        if self.mode == Instrumentation::Oprofile {
            self.opcontrol("--shutdown").await;
        }
    }

    async fn opcontrol(&self, arg: &str) {
        let argv = vec![
            "sudo".to_string(),
            "opcontrol".to_string(),
            arg.to_string(),
        ];
        let _ = process::run(&argv, None).await;
    }
}

#[cfg(test)]
#[path = "profiler_tests.rs"]
mod tests;
