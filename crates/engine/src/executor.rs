// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process sequential execution of a contiguous run-step range
//! against one [`Run`]. Grounded in the original's
//! `experimentalgorithm.py::execute_from` /
//! `is_valid_experiment`/`validate_execute_from`.

use tracing::{debug, error, info};
use wdb_core::{merge_params, Algorithm, Clock, ParamMap, Run, RunError, RunStatus};

/// Runs `algorithm.run_steps[from_idx..=to_idx]` against `run`,
/// persisting after every mutation via `persist`. Returns `Ok(())` on
/// success (the run may still be `Running` if `to_step` stopped short
/// of the final step) and `Err` the moment a step fails — sibling runs
/// are never affected, per spec: one failing run does not cancel others.
pub fn execute_from(
    run: &mut Run,
    algorithm: &Algorithm,
    experiment_params: &ParamMap,
    from_step: &str,
    to_step: Option<&str>,
    clock: &impl Clock,
    mut persist: impl FnMut(&Run) -> Result<(), RunError>,
) -> Result<(), RunError> {
    let from_idx = algorithm
        .run_step_index_of(from_step)
        .ok_or_else(|| RunError::UnknownStep(from_step.to_string()))?;
    let to_idx = match to_step {
        Some(name) => algorithm
            .run_step_index_of(name)
            .ok_or_else(|| RunError::UnknownStep(name.to_string()))?,
        None => algorithm.run_steps.len() - 1,
    };
    if from_idx > to_idx {
        return Err(RunError::FromAfterTo {
            from: from_step.to_string(),
            to: to_step.unwrap_or(from_step).to_string(),
        });
    }
    if from_idx > 0 {
        let expected = algorithm.run_steps[from_idx - 1].name.clone();
        if run.last_completed_step.as_deref() != Some(expected.as_str()) {
            return Err(RunError::NotResumable {
                from_step: from_step.to_string(),
                last_completed: run.last_completed_step.clone(),
                expected,
            });
        }
    } else {
        run.outputs.clear();
        run.last_completed_step = None;
    }

    run.failed_step = None;
    run.error_msg = None;
    run.status = RunStatus::Running;
    persist(run)?;

    for step in &algorithm.run_steps[from_idx..=to_idx] {
        let now_ms = clock.epoch_ms();
        run.mark_step_started(&step.name, now_ms);
        persist(run)?;

        let merged_params = merge_params(experiment_params, &step.params);
        info!(run = %run.name, step = %step.name, "executing step");
        let result = (step.process)(run, &merged_params, &run.outputs.clone());
        let now_ms = clock.epoch_ms();

        match result {
            Ok(output) => {
                run.mark_step_finished(&step.name, output, now_ms);
                debug!(run = %run.name, step = %step.name, "step finished");
                persist(run)?;
            }
            Err(step_err) => {
                run.record_step_runtime(&step.name, now_ms);
                run.mark_failed(step.name.clone(), step_err.message.clone());
                error!(run = %run.name, step = %step.name, err = %step_err, "step failed");
                persist(run)?;
                return Err(RunError::Step(step_err));
            }
        }
    }

    if run.last_completed_step.as_deref() == algorithm.run_steps.last().map(|s| s.name.as_str()) {
        run.status = RunStatus::Finished;
        persist(run)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
