// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel supervisor: maintains ready/running/failed/finished queues,
//! dispatches each job as a subprocess or container-exec (or, in
//! `debug_in_process` mode, inline), polls completion every ~250ms, and
//! reschedules each run's next phase until every run has finished or
//! failed (spec §4.6 — "the core of the core"). Grounded in
//! `original_source/wildebeest/jobrunner.py`'s `JobRunner`/`RunTask`.

use crate::error::RunnerError;
use crate::job::{Job, JobStatus, JobTask};
use crate::run_job;
use crate::spawner::{JobSpawner, SpawnSpec};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{fs, thread, time::Duration};
use wdb_core::{Algorithm, Clock, ParamMap, Run};
use wdb_storage::{ExpPaths, StateStore, WorkloadPaths};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One Run's worth of work, as handed to the runner by the experiment
/// lifecycle controller.
#[derive(Debug, Clone)]
pub struct RunnerTask {
    pub run_number: usize,
    pub run_name: String,
    /// Resume point for this run; `None` starts from the algorithm's
    /// first run-step.
    pub run_from_step: Option<String>,
}

/// A run that ended in `Failed`, surfaced for the experiment-wide
/// failure report (spec §4.6, §6).
#[derive(Debug, Clone)]
pub struct FailedRun {
    pub run_number: usize,
    pub run_name: String,
    pub error_msg: String,
}

struct RunningJob {
    job: Job,
    child: Box<dyn crate::spawner::SpawnedChild>,
}

pub struct JobRunner<C: Clock> {
    name: String,
    exp_folder: PathBuf,
    workload_dir: PathBuf,
    numjobs: usize,
    debug_in_process: bool,
    algorithm: Arc<Algorithm>,
    experiment_params: ParamMap,
    spawner: Arc<dyn JobSpawner>,
    clock: C,
    ready: Vec<Job>,
    running: Vec<RunningJob>,
    failed: Vec<Job>,
    finished: Vec<Job>,
}

impl<C: Clock> JobRunner<C> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        exp_folder: impl Into<PathBuf>,
        workloads_root: &Path,
        numjobs: usize,
        debug_in_process: bool,
        algorithm: Arc<Algorithm>,
        experiment_params: ParamMap,
        spawner: Arc<dyn JobSpawner>,
        clock: C,
    ) -> Self {
        let name = name.into();
        let workload_dir = WorkloadPaths::workload_dir(workloads_root, &name);
        Self {
            name,
            exp_folder: exp_folder.into(),
            workload_dir,
            numjobs: if debug_in_process { 1 } else { numjobs.max(1) },
            debug_in_process,
            algorithm,
            experiment_params,
            spawner,
            clock,
            ready: Vec::new(),
            running: Vec::new(),
            failed: Vec::new(),
            finished: Vec::new(),
        }
    }

    pub fn workload_dir(&self) -> &Path {
        &self.workload_dir
    }

    /// Runs every task to completion, blocking the calling thread.
    /// Returns the runs that ended `Failed`.
    pub fn run(&mut self, tasks: Vec<RunnerTask>) -> Result<Vec<FailedRun>, RunnerError> {
        self.reset_workload_folder()?;
        self.ready = tasks.into_iter().map(|t| self.first_job_for(t)).collect::<Result<_, _>>()?;

        let max_jobs = self.numjobs.min(self.ready.len().max(1));
        tracing::info!(
            workload = %self.name,
            ready = self.ready.len(),
            max_jobs,
            "starting job runner"
        );

        while !self.ready.is_empty() {
            self.fill_to_cap(max_jobs)?;
            if !self.running.is_empty() {
                self.wait_for_any_finish()?;
            }
        }
        while !self.running.is_empty() {
            self.wait_for_any_finish()?;
        }

        Ok(self
            .failed
            .iter()
            .map(|j| FailedRun {
                run_number: j.task.run_number,
                run_name: j.task.run_name.clone(),
                error_msg: j.error_msg.clone().unwrap_or_default(),
            })
            .collect())
    }

    fn first_job_for(&self, task: RunnerTask) -> Result<Job, RunnerError> {
        let from_idx = task
            .run_from_step
            .as_deref()
            .and_then(|s| self.algorithm.run_step_index_of(s))
            .unwrap_or(0);
        Ok(self.job_for_phase(task.run_number, task.run_name, from_idx))
    }

    fn job_for_phase(&self, run_number: usize, run_name: String, from_idx: usize) -> Job {
        let to_idx = self.algorithm.phase_end(from_idx);
        let task = JobTask {
            run_number,
            run_name,
            from_step: self.algorithm.run_steps[from_idx].name.clone(),
            to_step: self.algorithm.run_steps[to_idx].name.clone(),
        };
        Job::new(run_number, task, self.workload_dir.clone())
    }

    fn reset_workload_folder(&self) -> Result<(), RunnerError> {
        let io_err = |source: std::io::Error| RunnerError::SpawnJob {
            jobid: 0,
            workload_dir: self.workload_dir.clone(),
            source,
        };
        if self.workload_dir.exists() {
            fs::remove_dir_all(&self.workload_dir).map_err(io_err)?;
        }
        fs::create_dir_all(WorkloadPaths::jobs_dir(&self.workload_dir)).map_err(io_err)?;
        fs::create_dir_all(WorkloadPaths::logs_dir(&self.workload_dir)).map_err(io_err)?;
        Ok(())
    }

    fn run_yaml(&self, run_number: usize) -> PathBuf {
        ExpPaths::run_yaml(&self.exp_folder, run_number)
    }

    fn load_run(&self, run_number: usize) -> Result<Run, RunnerError> {
        Ok(StateStore::load(&self.run_yaml(run_number))?)
    }

    fn save_run(&self, run: &Run) -> Result<(), RunnerError> {
        StateStore::save(run, &self.run_yaml(run.number))?;
        Ok(())
    }

    fn fill_to_cap(&mut self, max_jobs: usize) -> Result<(), RunnerError> {
        while !self.ready.is_empty() && self.running.len() < max_jobs {
            let job = self.ready.remove(0);
            self.start_job(job)?;
        }
        Ok(())
    }

    fn run_in_docker_for(&self, step_name: &str) -> bool {
        self.algorithm
            .run_step_index_of(step_name)
            .map(|idx| self.algorithm.run_steps[idx].run_in_docker)
            .unwrap_or(false)
    }

    fn start_job(&mut self, mut job: Job) -> Result<(), RunnerError> {
        let run_in_docker = self.run_in_docker_for(&job.task.from_step);

        if self.debug_in_process {
            tracing::info!(job = job.jobid, run = %job.task.run_name, "running job in process (debug)");
            job.mark_running(std::process::id(), run_in_docker)?;
            let result = run_job::execute_job(
                &self.exp_folder,
                &self.workload_dir,
                job.jobid,
                &self.algorithm,
                &self.experiment_params,
                &self.clock,
            );
            // `run_job::execute_job` writes the job's final status itself;
            // reload so `handle_job_outcome` doesn't clobber it.
            let job = Job::load(&self.workload_dir, job.jobid).unwrap_or(job);
            return self.handle_job_outcome(job, result.is_err());
        }

        let run = self.load_run(job.task.run_number)?;
        let container_name = run.container_name.clone().filter(|_| run_in_docker);

        job.save()?;
        let logfile = job.logfile.clone();
        let spec = SpawnSpec {
            cwd: &self.exp_folder,
            logfile: &logfile,
            jobid: job.jobid,
            from_step: &job.task.from_step,
            to_step: &job.task.to_step,
            container_name: container_name.as_deref(),
        };
        let child = self.spawner.spawn(&spec)?;
        job.mark_running(child.pid(), run_in_docker)?;
        tracing::info!(
            job = job.jobid,
            run = %job.task.run_name,
            pid = child.pid(),
            docker = run_in_docker,
            "started job"
        );
        self.running.push(RunningJob { job, child });
        Ok(())
    }

    /// Polls every running job once; on the first completed job, applies
    /// its outcome and returns. Blocks, sleeping `POLL_INTERVAL` between
    /// sweeps, until at least one job exits.
    fn wait_for_any_finish(&mut self) -> Result<(), RunnerError> {
        loop {
            for idx in 0..self.running.len() {
                let exit_code = self.running[idx].child.try_wait().map_err(|source| RunnerError::SpawnJob {
                    jobid: self.running[idx].job.jobid,
                    workload_dir: self.workload_dir.clone(),
                    source,
                })?;
                if let Some(code) = exit_code {
                    let running = self.running.remove(idx);
                    return self.on_job_exited(running, code);
                }
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn on_job_exited(&mut self, running: RunningJob, exit_code: i32) -> Result<(), RunnerError> {
        let RunningJob { job, .. } = running;
        // Reload: the child writes its own final status/error_msg to this
        // file before exiting (spec §3 single-writer invariant).
        let job = Job::load(&self.workload_dir, job.jobid).unwrap_or(job);
        self.handle_job_outcome(job, exit_code != 0)
    }

    fn handle_job_outcome(&mut self, mut job: Job, failed: bool) -> Result<(), RunnerError> {
        let now = self.clock.epoch_ms();

        if failed {
            // Last-resort path: the child may have been killed
            // externally without writing a final record (spec §4.6/§7).
            if job.status != JobStatus::Failed {
                job.mark_failed(job.error_msg.clone().unwrap_or_else(|| "killed".to_string()), now)?;
            }
            if let Ok(mut run) = self.load_run(job.task.run_number) {
                if !run.is_failed() {
                    let err = job.error_msg.clone().unwrap_or_else(|| "killed".to_string());
                    run.mark_failed(job.task.to_step.clone(), err);
                    self.save_run(&run)?;
                }
            }
            tracing::error!(job = job.jobid, run = %job.task.run_name, err = ?job.error_msg, "job failed");
            self.failed.push(job);
            return Ok(());
        }

        if job.status != JobStatus::Finished {
            job.mark_finished(now)?;
        }

        let run = self.load_run(job.task.run_number)?;
        let last_step = self.algorithm.run_steps.last().map(|s| s.name.as_str());
        if run.last_completed_step.as_deref() == last_step {
            tracing::info!(job = job.jobid, run = %job.task.run_name, "run finished");
            self.finished.push(job);
            return Ok(());
        }

        tracing::info!(job = job.jobid, run = %job.task.run_name, "advancing to next phase");
        let next_idx = run
            .last_completed_step
            .as_deref()
            .and_then(|s| self.algorithm.run_step_index_of(s))
            .map(|i| i + 1)
            .unwrap_or(0);
        let next_job = self.job_for_phase(job.task.run_number, job.task.run_name.clone(), next_idx);
        self.start_job(next_job)
    }
}

/// Context exit, clean or exceptional, must not leave children running
/// (spec §4.6 *Cancellation*, §5): `run()` can return early via `?` with
/// jobs still in `self.running`, and a plain `std::process::Child` does
/// not kill its process on drop. Kill-tree every still-running job so no
/// orphaned compiler/docker-exec survives the supervisor.
impl<C: Clock> Drop for JobRunner<C> {
    fn drop(&mut self) {
        for running in &mut self.running {
            tracing::warn!(job = running.job.jobid, run = %running.job.task.run_name, "killing job on runner exit");
            running.child.kill();
        }
    }
}

#[cfg(test)]
#[path = "job_runner_tests.rs"]
mod tests;
