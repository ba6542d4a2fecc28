// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the algorithm/step/run/experiment layers.

use std::fmt;

/// Which of an [`Algorithm`](crate::algorithm::Algorithm)'s three step
/// sequences an error pertains to.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Pre,
    Run,
    Post,
}

crate::simple_display! {
    StepKind {
        Pre => "pre",
        Run => "run",
        Post => "post",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    #[error("duplicate step name {name:?} in the {kind} sequence")]
    DuplicateStepName { kind: StepKind, name: String },
    #[error("unknown step {0:?}")]
    UnknownStep(String),
}

/// The error raised by a step's `process` callable. Any error a step body
/// produces, of any origin, is captured here with its message and
/// (optionally) a chained source error; steps never return error codes.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StepError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StepError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn wrap(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<std::io::Error> for StepError {
    fn from(err: std::io::Error) -> Self {
        Self::wrap(err.to_string(), err)
    }
}

/// Errors raised while sequentially executing a contiguous step range
/// against one [`Run`](crate::run::Run).
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("unknown step {0:?}")]
    UnknownStep(String),
    #[error("from_step {from:?} comes after to_step {to:?}")]
    FromAfterTo { from: String, to: String },
    #[error(
        "cannot start at {from_step:?}: run's last completed step is {last_completed:?}, expected {expected:?}"
    )]
    NotResumable {
        from_step: String,
        last_completed: Option<String>,
        expected: String,
    },
    #[error(transparent)]
    Step(#[from] StepError),
    #[error("failed to persist run state: {0}")]
    Persist(String),
}

/// Errors raised while driving an [`Experiment`](crate::experiment::Experiment)
/// through its lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum ExperimentError {
    #[error("experiment already has runs with completed steps; pass force to regenerate")]
    RunsAlreadyStarted,
    #[error("duplicate run config name {0:?}")]
    DuplicateRunConfigName(String),
    #[error("unknown run number {0}")]
    UnknownRun(usize),
    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error("{failed} of {total} run(s) failed")]
    RunsFailed { failed: usize, total: usize },
}

impl fmt::Debug for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
