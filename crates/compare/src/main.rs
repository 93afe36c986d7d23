// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `compare_runs` binary entry point.

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use regress_artifact::RunDir;
use regress_compare::report;

#[derive(Parser, Debug)]
#[command(
    name = "compare_runs",
    about = "Compare two regression-run artifact directories"
)]
struct Args {
    /// Baseline run directory
    #[arg(value_name = "RUN_DIR_1")]
    baseline: PathBuf,

    /// Candidate run directory
    #[arg(value_name = "RUN_DIR_2")]
    candidate: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let baseline = RunDir::new(args.baseline);
    let candidate = RunDir::new(args.candidate);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::write_report(&baseline, &candidate, &mut out)?;
    out.flush()?;
    Ok(())
}
