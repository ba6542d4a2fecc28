// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run-step and exp-step contracts (spec §4.3).
//!
//! A step's `process` callable is a pure-ish function: given the entity
//! it operates on, the merged parameter map, and the outputs of every
//! step completed so far in the current scope, it returns a
//! [`StepOutput`] or fails. Any error it raises is the step failing;
//! steps never return error codes.

use crate::experiment::Experiment;
use crate::outputs::{OutputMap, ParamMap, StepOutput};
use crate::run::Run;
use crate::error::StepError;
use std::sync::Arc;

pub type RunStepFn =
    Arc<dyn Fn(&Run, &ParamMap, &OutputMap) -> Result<StepOutput, StepError> + Send + Sync>;

pub type ExpStepFn =
    Arc<dyn Fn(&Experiment, &ParamMap, &OutputMap) -> Result<StepOutput, StepError> + Send + Sync>;

/// One unit of work against a single [`Run`], optionally containerized.
#[derive(Clone)]
pub struct RunStep {
    pub name: String,
    pub process: RunStepFn,
    pub params: ParamMap,
    /// Reserved; unused by the current engine (spec §3).
    pub do_not_parallelize: bool,
    pub run_in_docker: bool,
}

impl RunStep {
    pub fn new(name: impl Into<String>, run_in_docker: bool, process: RunStepFn) -> Self {
        Self {
            name: name.into(),
            process,
            params: ParamMap::new(),
            do_not_parallelize: false,
            run_in_docker,
        }
    }

    pub fn with_params(mut self, params: ParamMap) -> Self {
        self.params = params;
        self
    }
}

impl std::fmt::Debug for RunStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunStep")
            .field("name", &self.name)
            .field("run_in_docker", &self.run_in_docker)
            .field("do_not_parallelize", &self.do_not_parallelize)
            .finish_non_exhaustive()
    }
}

/// One unit of work against the whole [`Experiment`] (pre- or post-step).
#[derive(Clone)]
pub struct ExpStep {
    pub name: String,
    pub process: ExpStepFn,
    pub params: ParamMap,
    pub do_not_parallelize: bool,
}

impl ExpStep {
    pub fn new(name: impl Into<String>, process: ExpStepFn) -> Self {
        Self {
            name: name.into(),
            process,
            params: ParamMap::new(),
            do_not_parallelize: false,
        }
    }

    pub fn with_params(mut self, params: ParamMap) -> Self {
        self.params = params;
        self
    }
}

impl std::fmt::Debug for ExpStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpStep")
            .field("name", &self.name)
            .field("do_not_parallelize", &self.do_not_parallelize)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
