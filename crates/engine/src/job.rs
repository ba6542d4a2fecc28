// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One OS-level execution unit: a supervised run of one contiguous,
//! same-phase (docker|host) slice of one [`Run`](wdb_core::Run) (spec
//! §4.7). Transient: a `Job` lives only while a `JobRunner` invocation
//! owns its workload folder, and is regenerated fresh on every
//! invocation (spec §9 Open Question 3).

use crate::error::RunnerError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wdb_storage::{StateStore, WorkloadPaths};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Ready,
    Running,
    Failed,
    Finished,
}

wdb_core::simple_display! {
    JobStatus {
        Ready => "ready",
        Running => "running",
        Failed => "failed",
        Finished => "finished",
    }
}

/// Which contiguous algorithm slice of which run this job executes.
/// `jobid` is always `run_number` (spec §9 Open Question 3); the pair is
/// kept distinct on the struct because an external caller should name
/// the field it means.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTask {
    pub run_number: usize,
    pub run_name: String,
    pub from_step: String,
    pub to_step: String,
}

/// Persisted record of one job. Per the single-writer invariant (spec
/// §3), this file is written only by the supervising `JobRunner` during
/// state transitions, and by the child job exactly at start (to record
/// `starttime`/`pid`) and at exit (to record `finishtime`/`error_msg`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub jobid: usize,
    pub task: JobTask,
    pub workload_dir: PathBuf,
    pub logfile: PathBuf,
    pub status: JobStatus,
    pub pid: Option<u32>,
    pub starttime: Option<u64>,
    pub finishtime: Option<u64>,
    /// Set only by the supervisor as the job transitions phases; never
    /// read by the job's own process logic.
    pub running_in_docker: bool,
    pub error_msg: Option<String>,
}

impl Job {
    pub fn new(jobid: usize, task: JobTask, workload_dir: PathBuf) -> Self {
        let logfile = WorkloadPaths::job_log(&workload_dir, jobid);
        Self {
            jobid,
            task,
            workload_dir,
            logfile,
            status: JobStatus::Ready,
            pid: None,
            starttime: None,
            finishtime: None,
            running_in_docker: false,
            error_msg: None,
        }
    }

    pub fn yaml_path(&self) -> PathBuf {
        WorkloadPaths::job_yaml(&self.workload_dir, self.jobid)
    }

    pub fn save(&self) -> Result<(), RunnerError> {
        StateStore::save(self, &self.yaml_path())?;
        Ok(())
    }

    pub fn load(workload_dir: &Path, jobid: usize) -> Result<Self, RunnerError> {
        Ok(StateStore::load(&WorkloadPaths::job_yaml(workload_dir, jobid))?)
    }

    /// Transition Ready -> Running, recording the spawned pid and the
    /// phase's docker/host polarity. Called by the supervisor.
    pub fn mark_running(&mut self, pid: u32, running_in_docker: bool) -> Result<(), RunnerError> {
        self.status = JobStatus::Running;
        self.pid = Some(pid);
        self.running_in_docker = running_in_docker;
        self.save()
    }

    /// Called by the child at entry, before it starts executing steps.
    pub fn mark_started(&mut self, now_ms: u64) -> Result<(), RunnerError> {
        self.starttime = Some(now_ms);
        self.save()
    }

    /// Called by the child on success, or by the supervisor when it
    /// observes a subprocess exit with status 0.
    pub fn mark_finished(&mut self, now_ms: u64) -> Result<(), RunnerError> {
        self.status = JobStatus::Finished;
        self.finishtime = Some(now_ms);
        self.save()
    }

    /// Called by the child on failure, or by the supervisor for the
    /// last-resort "externally killed" path (spec §4.6).
    pub fn mark_failed(&mut self, error_msg: impl Into<String>, now_ms: u64) -> Result<(), RunnerError> {
        self.status = JobStatus::Failed;
        self.error_msg = Some(error_msg.into());
        self.finishtime = Some(now_ms);
        self.save()
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
