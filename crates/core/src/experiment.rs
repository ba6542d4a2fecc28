// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregate: matrix of runs, global params, lifecycle, folder layout,
//! rebase-on-move.
//!
//! The full `run()` lifecycle (pre-steps → `JobRunner` → post-steps)
//! lives in `wdb-engine`, since it needs the job runner; this module
//! owns the data the lifecycle mutates plus the parts that are pure
//! functions of that data: matrix generation, workload-id derivation,
//! and rebase.

use crate::algorithm::Algorithm;
use crate::build::{rebase_path, ProjectBuild};
use crate::error::ExperimentError;
use crate::outputs::{OutputMap, ParamMap};
use crate::recipe::ProjectRecipe;
use crate::run::Run;
use crate::runconfig::RunConfig;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentState {
    Ready,
    Preprocess,
    Running,
    PostProcess,
    Finished,
    Failed,
}

crate::simple_display! {
    ExperimentState {
        Ready => "ready",
        Preprocess => "preprocess",
        Running => "running",
        PostProcess => "postprocess",
        Finished => "finished",
        Failed => "failed",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    pub name: String,
    /// Registry key this experiment was created from. `algorithm` is
    /// transient (spec §9: live objects embedding callables are never
    /// serialized), so a freshly loaded `Experiment` re-derives it by
    /// looking this key up in the `experiments` registry rather than
    /// storing the algorithm itself.
    #[serde(default)]
    pub experiment_type: String,
    #[serde(skip)]
    pub algorithm: Arc<Algorithm>,
    pub runconfigs: Vec<RunConfig>,
    pub projectlist: Vec<ProjectRecipe>,
    pub exp_folder: PathBuf,
    #[serde(default)]
    pub params: ParamMap,
    pub state: ExperimentState,
    pub failed_step: Option<String>,
    #[serde(default)]
    pub preprocess_outputs: OutputMap,
    #[serde(default)]
    pub postprocess_outputs: OutputMap,
    #[serde(default)]
    pub runs: Vec<Run>,
    /// Transient: set by the engine while a `run()` invocation is active.
    #[serde(skip)]
    pub workload_folder: Option<PathBuf>,
}

impl Experiment {
    pub fn new(
        name: impl Into<String>,
        algorithm: Arc<Algorithm>,
        runconfigs: Vec<RunConfig>,
        projectlist: Vec<ProjectRecipe>,
        exp_folder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            experiment_type: String::new(),
            algorithm,
            runconfigs,
            projectlist,
            exp_folder: exp_folder.into(),
            params: ParamMap::new(),
            state: ExperimentState::Ready,
            failed_step: None,
            preprocess_outputs: OutputMap::new(),
            postprocess_outputs: OutputMap::new(),
            runs: Vec::new(),
            workload_folder: None,
        }
    }

    pub fn with_experiment_type(mut self, experiment_type: impl Into<String>) -> Self {
        self.experiment_type = experiment_type.into();
        self
    }

    /// Materializes the full `recipes × runconfigs` cross product in
    /// row-major order (recipes outer loop). Refuses to clobber runs that
    /// have made progress unless `force` is set.
    pub fn generate_runs(&mut self, force: bool) -> Result<(), ExperimentError> {
        if !force && self.runs.iter().any(|r| r.last_completed_step.is_some()) {
            return Err(ExperimentError::RunsAlreadyStarted);
        }
        if has_duplicate_names(self.runconfigs.iter().map(|c| c.name.as_str())) {
            let dup = first_duplicate(self.runconfigs.iter().map(|c| c.name.clone()));
            return Err(ExperimentError::DuplicateRunConfigName(dup));
        }

        let mut runs = Vec::with_capacity(self.projectlist.len() * self.runconfigs.len());
        let mut number = 1usize;
        for recipe in &self.projectlist {
            for config in &self.runconfigs {
                let name = if self.runconfigs.len() > 1 {
                    format!("{} - {}", recipe.name, config.name)
                } else {
                    recipe.name.clone()
                };
                let build = ProjectBuild::new(&self.exp_folder, number, recipe.clone());
                runs.push(Run::new(name, number, &self.exp_folder, build, config.clone()));
                number += 1;
            }
        }
        self.runs = runs;
        Ok(())
    }

    /// Pure function of `exp_folder`: SHA1 hex digest, first 8 characters.
    pub fn generate_workload_id(&self) -> String {
        workload_id_for(&self.exp_folder)
    }

    /// `"{name}-{8-hex-of-sha1(exp_folder)}"`, the deterministic workload
    /// name handed to `JobRunner`.
    pub fn workload_name(&self) -> String {
        format!("{}-{}", self.name, self.generate_workload_id())
    }

    pub fn mark_failed(&mut self, failed_step: impl Into<String>) {
        self.state = ExperimentState::Failed;
        self.failed_step = Some(failed_step.into());
    }

    /// Rewrites `exp_folder` and every contained `Run` when the
    /// experiment folder has moved from `old_root` to `new_root`.
    pub fn rebase(&mut self, old_root: &Path, new_root: &Path) {
        self.exp_folder = rebase_path(&self.exp_folder, old_root, new_root);
        for run in &mut self.runs {
            run.rebase(old_root, new_root);
        }
    }
}

pub fn workload_id_for(exp_folder: &Path) -> String {
    let mut hasher = Sha1::new();
    hasher.update(exp_folder.to_string_lossy().as_bytes());
    let digest = hasher.finalize();
    let hex = hex_encode(&digest);
    hex[..8].to_string()
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

fn has_duplicate_names<'a>(names: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = std::collections::HashSet::new();
    names.into_iter().any(|n| !seen.insert(n))
}

fn first_duplicate(names: impl Iterator<Item = String>) -> String {
    let mut seen = std::collections::HashSet::new();
    for n in names {
        if !seen.insert(n.clone()) {
            return n;
        }
    }
    String::new()
}

#[cfg(test)]
#[path = "experiment_tests.rs"]
mod tests;
