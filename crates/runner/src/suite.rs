// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite orchestration.
//!
//! Sequences directives strictly in file order on one control thread:
//! progress line, argv assembly, subject execution, artifact persistence,
//! PASS/FAIL/TIMEOUT verdict. A failing test never aborts the suite;
//! collected script errors are reported after the last test.

use crate::output::{print_error, print_warning};
use crate::process::{self, ProcessError, RunOutcome};
use crate::profiler::{Instrumentation, Profiler};
use crate::script::{ParsedScript, TestDirective};
use regress_artifact::{ArtifactError, RunArtifact, RunDir};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuiteError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Per-run configuration, fixed before the first test.
#[derive(Debug)]
pub struct SuiteConfig {
    pub subject: PathBuf,
    pub target: PathBuf,
    /// Already resolved against the execution path; see
    /// [`Instrumentation::resolve`].
    pub instrumentation: Instrumentation,
    /// Per-test deadline. `None` preserves the historical behavior of
    /// blocking forever on a hung subject.
    pub deadline: Option<Duration>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestStatus {
    Pass,
    Fail,
    Timeout,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => f.write_str("PASS"),
            TestStatus::Fail => f.write_str("FAIL"),
            TestStatus::Timeout => f.write_str("TIMEOUT"),
        }
    }
}

#[derive(Debug, Default)]
pub struct SuiteSummary {
    pub passed: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub script_errors: usize,
}

impl SuiteSummary {
    /// True when every directive parsed and every test passed.
    pub fn clean(&self) -> bool {
        self.failed == 0 && self.timed_out == 0 && self.script_errors == 0
    }

    fn count(&mut self, status: TestStatus) {
        match status {
            TestStatus::Pass => self.passed += 1,
            TestStatus::Fail => self.failed += 1,
            TestStatus::Timeout => self.timed_out += 1,
        }
    }
}

/// Run every directive, then report collected script errors.
///
/// Only infrastructure failures (target directory creation) abort; per-test
/// trouble is folded into the summary.
pub async fn run_suite(
    config: &SuiteConfig,
    script: &ParsedScript,
) -> Result<SuiteSummary, SuiteError> {
    let run_dir = RunDir::new(&config.target);
    run_dir.create()?;

    let profiler = Profiler::new(config.instrumentation, &config.subject, run_dir.root());
    profiler.start_suite().await;

    let mut summary = SuiteSummary::default();
    for directive in &script.directives {
        eprint!("{} ... ", directive.id);
        let status = run_one(config, &run_dir, &profiler, directive).await;
        eprintln!("{status}");
        summary.count(status);
    }

    profiler.shutdown().await;

    for error in &script.errors {
        print_error(error);
    }
    summary.script_errors = script.errors.len();
    Ok(summary)
}

async fn run_one(
    config: &SuiteConfig,
    run_dir: &RunDir,
    profiler: &Profiler,
    directive: &TestDirective,
) -> TestStatus {
    let mut argv = profiler.launcher_prefix(&directive.id);
    argv.push(config.subject.to_string_lossy().into_owned());
    argv.extend(directive.args.iter().cloned());
    argv.push(directive.operation.clone());

    profiler.before_test().await;

    let (artifact, status) = match process::run(&argv, config.deadline).await {
        Ok(RunOutcome::Completed(captured)) => {
            let status = if captured.exit_code == 0 {
                TestStatus::Pass
            } else {
                TestStatus::Fail
            };
            let artifact = RunArtifact {
                test_id: directive.id.clone(),
                exit_code: captured.exit_code,
                stdout: captured.stdout,
                stderr: captured.stderr,
                profile: profiler.collect_report().await,
            };
            (artifact, status)
        }
        Ok(RunOutcome::TimedOut { stdout, stderr }) => {
            let artifact = RunArtifact {
                test_id: directive.id.clone(),
                exit_code: 124,
                stdout,
                stderr,
                profile: profiler.collect_report().await,
            };
            (artifact, TestStatus::Timeout)
        }
        Err(ProcessError::Launch { command, source }) => {
            print_warning(format!("cannot launch {command}: {source}"));
            let artifact = RunArtifact {
                test_id: directive.id.clone(),
                exit_code: 127,
                stdout: Vec::new(),
                stderr: format!("cannot launch {command}: {source}\n").into_bytes(),
                profile: None,
            };
            (artifact, TestStatus::Fail)
        }
        Err(e) => {
            print_warning(format!("capture failed for {}: {e}", directive.id));
            let artifact = RunArtifact {
                test_id: directive.id.clone(),
                exit_code: 1,
                stdout: Vec::new(),
                stderr: Vec::new(),
                profile: None,
            };
            (artifact, TestStatus::Fail)
        }
    };

    if let Err(e) = run_dir.persist(&artifact) {
        print_warning(format!("cannot persist artifacts for {}: {e}", directive.id));
        return TestStatus::Fail;
    }
    status
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
