// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mutable per-cell state: one instance of the pipeline applied to one
//! recipe with one run configuration.

use crate::build::{rebase_path, ProjectBuild};
use crate::outputs::{OutputMap, StepOutput};
use crate::runconfig::RunConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Ready,
    Running,
    Failed,
    Finished,
}

crate::simple_display! {
    RunStatus {
        Ready => "ready",
        Running => "running",
        Failed => "failed",
        Finished => "finished",
    }
}

/// One cell of the `recipe × runconfig` cross product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub name: String,
    /// 1-based, stable within the experiment.
    pub number: usize,
    pub exp_root: PathBuf,
    pub build: ProjectBuild,
    pub config: RunConfig,
    pub status: RunStatus,
    pub current_step: Option<String>,
    pub last_completed_step: Option<String>,
    pub failed_step: Option<String>,
    pub error_msg: Option<String>,
    #[serde(default)]
    pub outputs: OutputMap,
    pub starttime: Option<u64>,
    pub runtime: Option<u64>,
    #[serde(default)]
    pub step_starttimes: IndexMap<String, u64>,
    #[serde(default)]
    pub step_runtimes: IndexMap<String, u64>,
    pub workload_id: Option<String>,
    pub container_name: Option<String>,
}

impl Run {
    pub fn new(name: impl Into<String>, number: usize, exp_root: impl Into<PathBuf>, build: ProjectBuild, config: RunConfig) -> Self {
        Self {
            name: name.into(),
            number,
            exp_root: exp_root.into(),
            build,
            config,
            status: RunStatus::Ready,
            current_step: None,
            last_completed_step: None,
            failed_step: None,
            error_msg: None,
            outputs: OutputMap::new(),
            starttime: None,
            runtime: None,
            step_starttimes: IndexMap::new(),
            step_runtimes: IndexMap::new(),
            workload_id: None,
            container_name: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == RunStatus::Finished
    }

    pub fn is_failed(&self) -> bool {
        self.status == RunStatus::Failed
    }

    /// Invariant (b): if Failed, `failed_step` and `error_msg` are both set.
    pub fn mark_failed(&mut self, step_name: impl Into<String>, error_msg: impl Into<String>) {
        self.status = RunStatus::Failed;
        self.failed_step = Some(step_name.into());
        self.error_msg = Some(error_msg.into());
    }

    pub fn mark_step_started(&mut self, step_name: &str, now_ms: u64) {
        self.current_step = Some(step_name.to_string());
        self.step_starttimes.insert(step_name.to_string(), now_ms);
        if self.starttime.is_none() {
            self.starttime = Some(now_ms);
        }
    }

    pub fn mark_step_finished(&mut self, step_name: &str, output: StepOutput, now_ms: u64) {
        self.record_step_runtime(step_name, now_ms);
        self.outputs.insert(step_name.to_string(), output);
        self.last_completed_step = Some(step_name.to_string());
    }

    /// Records a step's runtime without recording an output or advancing
    /// `last_completed_step`; used for the step that failed, which
    /// still gets a `step_runtimes` entry but no output.
    pub fn record_step_runtime(&mut self, step_name: &str, now_ms: u64) {
        let started = self.step_starttimes.get(step_name).copied().unwrap_or(now_ms);
        self.step_runtimes
            .insert(step_name.to_string(), now_ms.saturating_sub(started));
    }

    pub fn rebase(&mut self, old_root: &Path, new_root: &Path) {
        self.exp_root = rebase_path(&self.exp_root, old_root, new_root);
        self.build.rebase(old_root, new_root);
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
