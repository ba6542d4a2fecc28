// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The child side of one `Job`: load the `Job` and `Run` this process
//! was invoked for, run the requested step range through
//! [`executor::execute_from`](crate::executor::execute_from), and
//! persist the outcome back onto both records. Used identically by the
//! subprocess bootstrapped via `wdb run --job`/`docker exec` and by
//! `debug_in_process` mode, which calls this in the supervisor's own
//! process instead of spawning anything (spec §4.6).

use crate::error::RunnerError;
use crate::job::Job;
use std::path::Path;
use wdb_core::{Algorithm, Clock, ParamMap, Run, RunError};
use wdb_storage::{ExpPaths, StateStore};

/// Executes `job.task.from_step..=job.task.to_step` against the job's
/// run, recording start/finish times on the `Job` record and the
/// step-by-step progress on the `Run` record.
pub fn execute_job(
    exp_folder: &Path,
    workload_dir: &Path,
    jobid: usize,
    algorithm: &Algorithm,
    experiment_params: &ParamMap,
    clock: &impl Clock,
) -> Result<(), RunnerError> {
    let mut job = Job::load(workload_dir, jobid)?;
    job.mark_started(clock.epoch_ms())?;

    let run_yaml = ExpPaths::run_yaml(exp_folder, jobid);
    let mut run: Run = StateStore::load(&run_yaml)?;

    let persist = |r: &Run| -> Result<(), RunError> {
        StateStore::save(r, &run_yaml).map_err(|e| RunError::Persist(e.to_string()))
    };

    let from_step = job.task.from_step.clone();
    let to_step = job.task.to_step.clone();
    let result = crate::executor::execute_from(
        &mut run,
        algorithm,
        experiment_params,
        &from_step,
        Some(&to_step),
        clock,
        persist,
    );

    match result {
        Ok(()) => {
            job.mark_finished(clock.epoch_ms())?;
            Ok(())
        }
        Err(err) => {
            job.mark_failed(err.to_string(), clock.epoch_ms())?;
            Err(RunnerError::Run(err))
        }
    }
}

#[cfg(test)]
#[path = "run_job_tests.rs"]
mod tests;
