// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations. Every command except `create`/`dashboard`
//! operates on the experiment rooted at the current working directory,
//! mirroring the original script's assumption that `wdb` is invoked
//! from inside an experiment folder.

pub mod clean;
pub mod create;
pub mod docker_shell;
pub mod dashboard;
pub mod info;
pub mod kill;
pub mod ls;
pub mod log;
pub mod rm;
pub mod run;
pub mod runtimes;
pub mod status;

use crate::error::CliError;
use std::path::{Path, PathBuf};
use wdb_core::Experiment;
use wdb_registry::AppContext;
use wdb_storage::{ExpPaths, StateStore};

pub fn current_exp_folder() -> Result<PathBuf, CliError> {
    std::env::current_dir().map_err(|source| CliError::Io {
        path: PathBuf::from("."),
        source,
    })
}

/// Loads the experiment rooted at `exp_folder`, re-derives its
/// transient `algorithm` by looking `experiment_type` up in the
/// `experiments` registry (the field the serialized record cannot
/// carry — see `wdb_core::Experiment::algorithm`), and refreshes `runs`
/// from the individual `run<N>.run.yaml` files rather than trusting
/// `exp.yaml`'s own copy, which goes stale the moment a job runner
/// updates a run out from under it.
pub fn load_experiment(ctx: &AppContext, exp_folder: &Path) -> Result<Experiment, CliError> {
    let mut exp: Experiment = StateStore::load(&ExpPaths::exp_yaml(exp_folder))?;
    rebase_if_moved(&mut exp, exp_folder)?;
    let factory = ctx.experiments.get(&exp.experiment_type)?;
    let rebuilt = factory.build(exp_folder.to_path_buf(), exp.projectlist.clone(), exp.params.clone());
    exp.algorithm = rebuilt.algorithm;
    exp.runs = wdb_engine::load_runs(exp_folder)?;
    Ok(exp)
}

/// If the experiment's stored `exp_folder` no longer matches the folder
/// it was actually loaded from (the folder was moved on disk since the
/// last save), rewrites every stored path — on the experiment record and
/// on every persisted run — to the new root, and persists the rebased
/// records before anything else reads them (spec §4.5 rebase-on-load,
/// §8 invariant 3).
fn rebase_if_moved(exp: &mut Experiment, actual_folder: &Path) -> Result<(), CliError> {
    if exp.exp_folder == actual_folder {
        return Ok(());
    }
    let old_root = exp.exp_folder.clone();
    exp.rebase(&old_root, actual_folder);
    StateStore::save(exp, &ExpPaths::exp_yaml(actual_folder))?;

    for mut run in wdb_engine::load_runs(actual_folder)? {
        run.rebase(&old_root, actual_folder);
        StateStore::save(&run, &ExpPaths::run_yaml(actual_folder, run.number))?;
    }
    Ok(())
}

/// Parses a run-number spec like `"1,3-5,8"` into a sorted, deduplicated
/// list of run numbers (spec §6 `run [runs]`).
pub fn parse_runs_spec(spec: &str) -> Result<Vec<usize>, CliError> {
    let mut numbers = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some((start, end)) = part.split_once('-') {
            let start: usize = start
                .trim()
                .parse()
                .map_err(|_| CliError::InvalidRunSpec(spec.to_string(), format!("bad range start {start:?}")))?;
            let end: usize = end
                .trim()
                .parse()
                .map_err(|_| CliError::InvalidRunSpec(spec.to_string(), format!("bad range end {end:?}")))?;
            if start > end {
                return Err(CliError::InvalidRunSpec(spec.to_string(), format!("range {start}-{end} is backwards")));
            }
            numbers.extend(start..=end);
        } else {
            let n: usize = part
                .parse()
                .map_err(|_| CliError::InvalidRunSpec(spec.to_string(), format!("not a number: {part:?}")))?;
            numbers.push(n);
        }
    }
    numbers.sort_unstable();
    numbers.dedup();
    if numbers.is_empty() {
        return Err(CliError::InvalidRunSpec(spec.to_string(), "no run numbers given".to_string()));
    }
    Ok(numbers)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
