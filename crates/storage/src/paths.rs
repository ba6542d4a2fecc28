// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Folder-layout constants mirroring the original's `ExpRelPaths`, plus
//! the transient workload layout under the user's home directory.

use std::path::{Path, PathBuf};

/// Paths rooted at `<exp_folder>`.
pub struct ExpPaths;

impl ExpPaths {
    pub fn wildebeest_dir(exp_folder: &Path) -> PathBuf {
        exp_folder.join(".wildebeest")
    }

    pub fn exp_yaml(exp_folder: &Path) -> PathBuf {
        Self::wildebeest_dir(exp_folder).join("exp.yaml")
    }

    pub fn runstates_dir(exp_folder: &Path) -> PathBuf {
        Self::wildebeest_dir(exp_folder).join("runstates")
    }

    pub fn run_yaml(exp_folder: &Path, run_number: usize) -> PathBuf {
        Self::runstates_dir(exp_folder).join(format!("run{run_number}.run.yaml"))
    }

    pub fn source_dir(exp_folder: &Path) -> PathBuf {
        exp_folder.join("source")
    }

    pub fn build_dir(exp_folder: &Path) -> PathBuf {
        exp_folder.join("build")
    }

    pub fn rundata_dir(exp_folder: &Path, run_number: usize) -> PathBuf {
        exp_folder.join("rundata").join(format!("run{run_number}"))
    }

    pub fn expdata_dir(exp_folder: &Path) -> PathBuf {
        exp_folder.join("expdata")
    }
}

/// Paths rooted at `<home>/.wildebeest/workloads/<workload>.workload/`.
/// Reset at the start of every `JobRunner` invocation.
pub struct WorkloadPaths;

impl WorkloadPaths {
    pub fn workload_dir(workloads_root: &Path, workload_name: &str) -> PathBuf {
        workloads_root.join(format!("{workload_name}.workload"))
    }

    pub fn jobs_dir(workload_dir: &Path) -> PathBuf {
        workload_dir.join("jobs")
    }

    pub fn job_yaml(workload_dir: &Path, jobid: usize) -> PathBuf {
        Self::jobs_dir(workload_dir).join(format!("job{jobid}.yaml"))
    }

    pub fn logs_dir(workload_dir: &Path) -> PathBuf {
        workload_dir.join("logs")
    }

    pub fn job_log(workload_dir: &Path, jobid: usize) -> PathBuf {
        Self::logs_dir(workload_dir).join(format!("job{jobid}.log"))
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
