// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `run_tests` binary entry point.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use regress_runner::profiler::Instrumentation;
use regress_runner::script;
use regress_runner::suite::{self, SuiteConfig};

#[derive(Parser, Debug)]
#[command(
    name = "run_tests",
    about = "Drive a subject executable through a regression-test script"
)]
struct Args {
    /// Subject executable under test
    subject: PathBuf,

    /// Test script to execute
    script: PathBuf,

    /// Directory receiving per-test artifacts (created if absent)
    target_dir: PathBuf,

    /// Instrumentation strategy for the whole run
    #[arg(long, value_enum, default_value = "none")]
    instrument: Instrumentation,

    /// Per-test deadline in seconds; a test exceeding it is killed and
    /// reported as TIMEOUT
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Exit non-zero when any test fails or any directive fails to parse
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("cannot read script {}", args.script.display()))?;
    let parsed = script::parse(&source);

    let config = SuiteConfig {
        subject: args.subject,
        target: args.target_dir,
        instrumentation: args.instrument.resolve(),
        deadline: args.timeout.map(Duration::from_secs),
    };

    let summary = suite::run_suite(&config, &parsed).await?;

    if args.strict && !summary.clean() {
        std::process::exit(1);
    }
    Ok(())
}
