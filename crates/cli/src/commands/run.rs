// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wdb run` — execute the experiment rooted at `.`, or (with `--job`)
//! act as the child-bootstrap entry point a spawned job/container-exec
//! re-invokes the binary as (spec §4.6).

use crate::config::WdbConfig;
use crate::error::CliError;
use std::sync::Arc;
use wdb_core::SystemClock;
use wdb_engine::{JobSpawner, ProcessSpawner, RunOptions};
use wdb_registry::AppContext;
use wdb_storage::WorkloadPaths;

#[allow(clippy::too_many_arguments)]
pub fn handle(
    ctx: &AppContext,
    config: &WdbConfig,
    runs: Option<String>,
    numjobs: Option<usize>,
    buildjobs: Option<u32>,
    force: bool,
    job: Option<usize>,
    from: Option<String>,
    to: Option<String>,
    no_pre: bool,
    no_post: bool,
    debug: bool,
) -> Result<(), CliError> {
    let exp_folder = super::current_exp_folder()?;
    let exp = super::load_experiment(ctx, &exp_folder)?;

    if let Some(jobid) = job {
        let _ = (from, to); // carried on the command line for `ps`/log visibility; the child re-reads its task from the persisted Job record.
        let workload_dir = WorkloadPaths::workload_dir(&config.workloads_root, &exp.workload_name());
        wdb_engine::run_job::execute_job(&exp_folder, &workload_dir, jobid, &exp.algorithm, &exp.params, &SystemClock)?;
        return Ok(());
    }

    let mut exp = exp;
    let runs_filter = match &runs {
        Some(spec) => Some(super::parse_runs_spec(spec)?),
        None => None,
    };

    let options = RunOptions {
        force,
        numjobs: numjobs.unwrap_or(config.default_numjobs),
        run_from_step: from,
        no_pre,
        no_post,
        buildjobs,
        debug_in_process: debug,
        runs_filter,
    };

    let engine_binary = std::env::current_exe().map_err(|source| CliError::Io {
        path: std::path::PathBuf::from("<current exe>"),
        source,
    })?;
    let spawner: Arc<dyn JobSpawner> = Arc::new(ProcessSpawner::new(engine_binary));

    wdb_engine::run_experiment(&mut exp, options, &config.workloads_root, spawner, SystemClock)?;

    println!("{} experiment {} finished in state {}", crate::color::header("==>"), exp.name, crate::color::status(&exp.state.to_string()));
    if exp.state == wdb_core::ExperimentState::Failed {
        return Err(CliError::Usage(format!(
            "experiment failed at {}",
            exp.failed_step.as_deref().unwrap_or("unknown step")
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
