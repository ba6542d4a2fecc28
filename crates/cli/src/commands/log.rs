// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wdb log <run-number>` — dump a run's Job logfile, highlighting
//! lines that look like errors (spec §6).

use crate::config::WdbConfig;
use crate::error::CliError;
use wdb_registry::AppContext;
use wdb_storage::WorkloadPaths;

pub fn handle(ctx: &AppContext, config: &WdbConfig, run_number: usize) -> Result<(), CliError> {
    let exp_folder = super::current_exp_folder()?;
    let exp = super::load_experiment(ctx, &exp_folder)?;
    let workload_dir = WorkloadPaths::workload_dir(&config.workloads_root, &exp.workload_name());
    let logfile = WorkloadPaths::job_log(&workload_dir, run_number);

    let text = std::fs::read_to_string(&logfile).map_err(|source| CliError::Io { path: logfile.clone(), source })?;
    for line in text.lines() {
        if looks_like_error(line) {
            println!("{}", crate::color::status(&format!("failed {line}")));
        } else {
            println!("{line}");
        }
    }
    Ok(())
}

fn looks_like_error(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("error") || lower.contains("panic") || lower.contains("failed")
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
