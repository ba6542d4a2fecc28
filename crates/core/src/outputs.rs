// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tagged-variant step output, replacing the untyped `outputs` dict of the
//! original engine.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// What a step's `process` callable hands back on success.
///
/// A step that wants to pass back an arbitrary structured value uses
/// [`StepOutput::Json`]; `List` exists as the fan-out hook mentioned by
/// step contracts, it is not expanded into parallel work by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StepOutput {
    Text(String),
    Paths(Vec<PathBuf>),
    Json(serde_json::Value),
    List(Vec<StepOutput>),
}

impl StepOutput {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_paths(&self) -> Option<&[PathBuf]> {
        match self {
            Self::Paths(p) => Some(p.as_slice()),
            _ => None,
        }
    }
}

/// `step.params` merged with `experiment.params`; step params win on
/// collision.
pub type ParamMap = HashMap<String, StepOutput>;

/// Outputs of previously-completed steps within the current scope, keyed
/// by step name. Ordered so that a step can rely on iteration order
/// matching completion order.
pub type OutputMap = IndexMap<String, StepOutput>;

/// `experiment.params ⊕ step.params`, step wins on key collision.
pub fn merge_params(experiment_params: &ParamMap, step_params: &ParamMap) -> ParamMap {
    let mut merged = experiment_params.clone();
    for (k, v) in step_params {
        merged.insert(k.clone(), v.clone());
    }
    merged
}

#[cfg(test)]
#[path = "outputs_tests.rs"]
mod tests;
