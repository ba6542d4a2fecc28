// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable pipeline description: pre-steps, run-steps, post-steps.

use crate::error::{AlgorithmError, StepKind};
use crate::step::{ExpStep, RunStep};
use std::collections::HashSet;

/// Three ordered sequences of steps: experiment-scoped steps that run
/// once before the matrix (`pre_steps`), per-run steps that make up the
/// bulk of the pipeline (`run_steps`), and experiment-scoped steps that
/// run once after every run finishes (`post_steps`).
#[derive(Debug, Default, Clone)]
pub struct Algorithm {
    pub pre_steps: Vec<ExpStep>,
    pub run_steps: Vec<RunStep>,
    pub post_steps: Vec<ExpStep>,
}

impl Algorithm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pre_step(&self, name: &str) -> bool {
        self.pre_steps.iter().any(|s| s.name == name)
    }

    pub fn has_run_step(&self, name: &str) -> bool {
        self.run_steps.iter().any(|s| s.name == name)
    }

    pub fn has_post_step(&self, name: &str) -> bool {
        self.post_steps.iter().any(|s| s.name == name)
    }

    pub fn run_step_index_of(&self, name: &str) -> Option<usize> {
        self.run_steps.iter().position(|s| s.name == name)
    }

    pub fn pre_step_index_of(&self, name: &str) -> Option<usize> {
        self.pre_steps.iter().position(|s| s.name == name)
    }

    pub fn post_step_index_of(&self, name: &str) -> Option<usize> {
        self.post_steps.iter().position(|s| s.name == name)
    }

    pub fn insert_run_step_before(&mut self, anchor: &str, step: RunStep) -> Result<(), AlgorithmError> {
        let idx = self
            .run_step_index_of(anchor)
            .ok_or_else(|| AlgorithmError::UnknownStep(anchor.to_string()))?;
        self.run_steps.insert(idx, step);
        Ok(())
    }

    pub fn insert_run_step_after(&mut self, anchor: &str, step: RunStep) -> Result<(), AlgorithmError> {
        let idx = self
            .run_step_index_of(anchor)
            .ok_or_else(|| AlgorithmError::UnknownStep(anchor.to_string()))?;
        self.run_steps.insert(idx + 1, step);
        Ok(())
    }

    pub fn insert_pre_step_before(&mut self, anchor: &str, step: ExpStep) -> Result<(), AlgorithmError> {
        let idx = self
            .pre_step_index_of(anchor)
            .ok_or_else(|| AlgorithmError::UnknownStep(anchor.to_string()))?;
        self.pre_steps.insert(idx, step);
        Ok(())
    }

    pub fn insert_post_step_after(&mut self, anchor: &str, step: ExpStep) -> Result<(), AlgorithmError> {
        let idx = self
            .post_step_index_of(anchor)
            .ok_or_else(|| AlgorithmError::UnknownStep(anchor.to_string()))?;
        self.post_steps.insert(idx + 1, step);
        Ok(())
    }

    fn has_unique_names<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name) {
                return Some(name.to_string());
            }
        }
        None
    }

    pub fn has_unique_stepnames(&self) -> bool {
        self.duplicate_stepname().is_none()
    }

    fn duplicate_stepname(&self) -> Option<(StepKind, String)> {
        if let Some(name) = Self::has_unique_names(self.pre_steps.iter().map(|s| s.name.as_str())) {
            return Some((StepKind::Pre, name));
        }
        if let Some(name) = Self::has_unique_names(self.run_steps.iter().map(|s| s.name.as_str())) {
            return Some((StepKind::Run, name));
        }
        if let Some(name) = Self::has_unique_names(self.post_steps.iter().map(|s| s.name.as_str())) {
            return Some((StepKind::Post, name));
        }
        None
    }

    /// Checked before any execution begins.
    pub fn validate(&self) -> Result<(), AlgorithmError> {
        if let Some((kind, name)) = self.duplicate_stepname() {
            return Err(AlgorithmError::DuplicateStepName { kind, name });
        }
        Ok(())
    }

    /// Index of the last step in the maximal contiguous run of
    /// `run_steps` sharing `run_in_docker` with `run_steps[start_idx]`.
    /// This is the phase-segmentation primitive: it is how the engine
    /// alternates between host and container execution without `Run`/`Job`
    /// needing to model phases explicitly.
    pub fn phase_end(&self, start_idx: usize) -> usize {
        let polarity = self.run_steps[start_idx].run_in_docker;
        let mut end = start_idx;
        while end + 1 < self.run_steps.len() && self.run_steps[end + 1].run_in_docker == polarity {
            end += 1;
        }
        end
    }
}

#[cfg(test)]
#[path = "algorithm_tests.rs"]
mod tests;
