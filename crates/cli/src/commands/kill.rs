// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wdb kill` — kill one running job, or (with `-f`) every job in the
//! current experiment's workload (spec §6, §4.6's kill-tree semantics).

use crate::config::WdbConfig;
use crate::error::CliError;
use wdb_engine::{Job, JobStatus};
use wdb_registry::AppContext;
use wdb_storage::WorkloadPaths;

pub fn handle(ctx: &AppContext, config: &WdbConfig, job: Option<usize>, force: bool) -> Result<(), CliError> {
    let exp_folder = super::current_exp_folder()?;
    let exp = super::load_experiment(ctx, &exp_folder)?;
    let workload_dir = WorkloadPaths::workload_dir(&config.workloads_root, &exp.workload_name());

    let running = running_jobs(&workload_dir);

    let to_kill: Vec<Job> = match (job, force) {
        (Some(jobid), _) => running.into_iter().filter(|j| j.jobid == jobid).collect(),
        (None, true) => running,
        (None, false) => {
            return Err(CliError::Usage("kill requires --job K or -f to kill the whole experiment".to_string()));
        }
    };

    if to_kill.is_empty() {
        return Err(CliError::Usage("no running job found to kill".to_string()));
    }

    for job in &to_kill {
        let Some(pid) = job.pid else { continue };
        println!("{} killing job {} (pid {})", crate::color::header("==>"), job.jobid, pid);
        kill_tree(pid);
    }
    Ok(())
}

fn running_jobs(workload_dir: &std::path::Path) -> Vec<Job> {
    let jobs_dir = WorkloadPaths::jobs_dir(workload_dir);
    let Ok(entries) = std::fs::read_dir(&jobs_dir) else {
        return Vec::new();
    };
    entries
        .flatten()
        .filter_map(|entry| wdb_storage::StateStore::load::<Job>(&entry.path()).ok())
        .filter(|job| job.status == JobStatus::Running)
        .collect()
}

#[cfg(target_os = "linux")]
fn kill_tree(pid: u32) {
    if let Ok(pid) = i32::try_from(pid) {
        let _ = wdb_adapters::process::kill_tree(pid);
    }
}

#[cfg(not(target_os = "linux"))]
fn kill_tree(_pid: u32) {}

#[cfg(test)]
#[path = "kill_tests.rs"]
mod tests;
