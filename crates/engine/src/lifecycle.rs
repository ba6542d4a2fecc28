// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full `Experiment::run()` orchestration: validate, (re)generate or
//! reload the run matrix, preprocess, dispatch the job runner,
//! postprocess, and carry the experiment through its state machine.
//! Lives here rather than on `wdb_core::Experiment` because it needs
//! the job runner, which needs `wdb-storage`/`wdb-adapters`. Grounded
//! in `original_source/wildebeest/experiment.py::run`/`clean`.

use crate::default_algorithm::derive_container_name;
use crate::error::RunnerError;
use crate::job_runner::{JobRunner, RunnerTask};
use crate::spawner::JobSpawner;
use std::path::Path;
use std::sync::Arc;
use wdb_adapters::BuildSystemDriver;
use wdb_core::recipe::BuildStepContext;
use wdb_core::{merge_params, Clock, Experiment, ExperimentState, OutputMap, Run};
use wdb_registry::Registry;
use wdb_storage::{ExpPaths, StateStore};

/// Mirrors `experiment.py::run`'s keyword arguments.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub force: bool,
    pub numjobs: usize,
    pub run_from_step: Option<String>,
    pub no_pre: bool,
    pub no_post: bool,
    pub buildjobs: Option<u32>,
    pub debug_in_process: bool,
    /// Restricts dispatch to these run numbers (CLI `run [runs]` spec,
    /// e.g. `"1,3-5,8"`); `None` runs the whole matrix.
    pub runs_filter: Option<Vec<usize>>,
}

impl RunOptions {
    pub fn new(numjobs: usize) -> Self {
        Self {
            numjobs,
            ..Default::default()
        }
    }
}

fn save_exp(exp: &Experiment) -> Result<(), RunnerError> {
    StateStore::save(exp, &ExpPaths::exp_yaml(&exp.exp_folder))?;
    Ok(())
}

fn set_state(exp: &mut Experiment, state: ExperimentState) -> Result<(), RunnerError> {
    exp.state = state;
    save_exp(exp)
}

/// Reads every persisted `run<N>.run.yaml` fresh from disk, sorted by
/// run number. This is the authoritative live view of run state — the
/// `Experiment.runs` field an in-memory `Experiment` carries can go
/// stale the moment a job runner updates a run's file out from under
/// it — so read-only CLI commands (`status`, `info`, `ls alg`, `clean`)
/// call this instead of trusting a loaded `Experiment`'s own `runs`.
pub fn load_runs(exp_folder: &Path) -> Result<Vec<Run>, RunnerError> {
    let dir = ExpPaths::runstates_dir(exp_folder);
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut runs = Vec::new();
    for entry in std::fs::read_dir(&dir).map_err(|source| RunnerError::SpawnJob {
        jobid: 0,
        workload_dir: dir.clone(),
        source,
    })? {
        let entry = entry.map_err(|source| RunnerError::SpawnJob {
            jobid: 0,
            workload_dir: dir.clone(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("yaml") {
            runs.push(StateStore::load(&path)?);
        }
    }
    runs.sort_by_key(|r: &Run| r.number);
    Ok(runs)
}

/// Runs a sequence of experiment-scoped steps in order, persisting the
/// experiment after a failure. Returns `Ok(None)` if a step failed
/// (already recorded on `exp`), `Ok(Some(outputs))` on full success.
fn run_exp_steps(
    exp: &mut Experiment,
    steps: &[wdb_core::ExpStep],
    fail_label: &str,
) -> Result<Option<OutputMap>, RunnerError> {
    let mut outputs = OutputMap::new();
    for step in steps {
        let merged = merge_params(&exp.params, &step.params);
        match (step.process)(exp, &merged, &outputs) {
            Ok(out) => {
                outputs.insert(step.name.clone(), out);
            }
            Err(err) => {
                tracing::error!(step = %step.name, %err, "experiment step failed");
                exp.mark_failed(fail_label);
                save_exp(exp)?;
                return Ok(None);
            }
        }
    }
    Ok(Some(outputs))
}

/// Drives `exp` through its full lifecycle: validate → (re)generate or
/// reload the run matrix → preprocess → job runner → postprocess. On
/// return, `exp.state` reflects the outcome (`Finished` or `Failed`);
/// an `Err` is only returned for genuine infrastructure failures
/// (storage, registry, process spawn), never for a step/run failure,
/// which is instead recorded on the experiment per spec §4.5/§6.
#[allow(clippy::too_many_arguments)]
pub fn run_experiment<C: Clock>(
    exp: &mut Experiment,
    options: RunOptions,
    workloads_root: &Path,
    spawner: Arc<dyn JobSpawner>,
    clock: C,
) -> Result<(), RunnerError> {
    if let Some(step) = &options.run_from_step {
        if !exp.algorithm.has_run_step(step) {
            return Err(RunnerError::UnknownStep(step.clone()));
        }
    }

    exp.failed_step = None;

    // Spec §4.5 step 2: only generate a fresh matrix when neither a resume
    // point nor an explicit run subset was given. An explicit `run_list`
    // (e.g. `run "2,4"` after an earlier `run "1,3"`) must reuse the
    // already-generated runs, or a later invocation would re-validate
    // `generate_runs` against runs that have already made progress.
    exp.runs = if options.run_from_step.is_some() || options.runs_filter.is_some() {
        let runs = load_runs(&exp.exp_folder)?;
        if runs.is_empty() {
            return Err(RunnerError::NoExistingRuns);
        }
        runs
    } else {
        exp.generate_runs(options.force)?;
        for run in &exp.runs {
            StateStore::save(run, &ExpPaths::run_yaml(&exp.exp_folder, run.number))?;
        }
        exp.runs.clone()
    };

    if let Some(buildjobs) = options.buildjobs {
        for run in &mut exp.runs {
            if run.config.num_build_jobs != buildjobs {
                run.config = run.config.with_num_build_jobs(buildjobs);
                StateStore::save(run, &ExpPaths::run_yaml(&exp.exp_folder, run.number))?;
            }
        }
    }

    let workload_id = exp.generate_workload_id();
    for run in &mut exp.runs {
        let container_name = derive_container_name(&workload_id, run.number, &run.build.recipe.name, &run.config.name);
        if run.container_name.as_deref() != Some(container_name.as_str()) {
            run.container_name = Some(container_name);
            run.workload_id = Some(workload_id.clone());
            StateStore::save(run, &ExpPaths::run_yaml(&exp.exp_folder, run.number))?;
        }
    }

    if !options.no_pre {
        set_state(exp, ExperimentState::Preprocess)?;
        let pre_steps = exp.algorithm.pre_steps.clone();
        match run_exp_steps(exp, &pre_steps, "preprocessing")? {
            Some(outputs) => exp.preprocess_outputs = outputs,
            None => return Ok(()),
        }
        save_exp(exp)?;
    }

    set_state(exp, ExperimentState::Running)?;
    let tasks: Vec<RunnerTask> = exp
        .runs
        .iter()
        .filter(|r| match &options.runs_filter {
            Some(numbers) => numbers.contains(&r.number),
            None => true,
        })
        .map(|r| RunnerTask {
            run_number: r.number,
            run_name: r.name.clone(),
            run_from_step: options.run_from_step.clone(),
        })
        .collect();
    let workload_name = exp.workload_name();
    tracing::info!(workload = %workload_name, "experiment workload name");

    let mut runner = JobRunner::new(
        workload_name,
        exp.exp_folder.clone(),
        workloads_root,
        options.numjobs,
        options.debug_in_process,
        exp.algorithm.clone(),
        exp.params.clone(),
        spawner,
        clock,
    );
    exp.workload_folder = Some(runner.workload_dir().to_path_buf());
    save_exp(exp)?;

    let failed = runner.run(tasks)?;
    if !failed.is_empty() {
        tracing::error!(count = failed.len(), total = exp.runs.len(), "runs failed");
        exp.mark_failed("run");
        save_exp(exp)?;
        return Ok(());
    }

    if !options.no_post {
        set_state(exp, ExperimentState::PostProcess)?;
        std::fs::create_dir_all(ExpPaths::expdata_dir(&exp.exp_folder)).map_err(|source| RunnerError::SpawnJob {
            jobid: 0,
            workload_dir: ExpPaths::expdata_dir(&exp.exp_folder),
            source,
        })?;
        let post_steps = exp.algorithm.post_steps.clone();
        match run_exp_steps(exp, &post_steps, "postprocess")? {
            Some(outputs) => exp.postprocess_outputs = outputs,
            None => return Ok(()),
        }
    }

    set_state(exp, ExperimentState::Finished)?;
    Ok(())
}

/// Runs a build-system clean across every run in a loaded experiment
/// (`original_source/wildebeest/experiment.py::clean`). Not part of the
/// algorithm pipeline itself: explicitly invoked by the CLI's `clean`
/// subcommand since it's destructive.
pub fn clean_experiment(exp: &Experiment, drivers: &Registry<Arc<dyn BuildSystemDriver>>) -> Result<(), RunnerError> {
    for run in &exp.runs {
        let driver = drivers.get(&run.build.recipe.build_system)?;
        let ctx = BuildStepContext {
            run_config: &run.config,
            build: &run.build,
            num_build_jobs: None,
        };
        driver
            .clean(&ctx)
            .map_err(|e| RunnerError::Run(wdb_core::RunError::Step(e)))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
