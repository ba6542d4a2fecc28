// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level CLI error, composing every lower-crate error and mapping
//! each variant to a process exit code. No `anyhow` dependency: every
//! command function returns a concrete `CliError` so `main()` can
//! decide the exit code without downcasting.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Runner(#[from] wdb_engine::RunnerError),
    #[error(transparent)]
    Storage(#[from] wdb_storage::StorageError),
    #[error(transparent)]
    Registry(#[from] wdb_registry::RegistryError),
    #[error(transparent)]
    Experiment(#[from] wdb_core::ExperimentError),
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid run-number spec {0:?}: {1}")]
    InvalidRunSpec(String, String),
    #[error("invalid param {0:?}: expected key=value")]
    InvalidParam(String),
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Exit code convention (spec §6): 0 success, 1 everything else.
    /// Kept as a method (rather than a blanket `From<CliError> for
    /// ExitError`) since a handful of commands want a distinct exit
    /// code (e.g. `status`/`info` never warrant anything but 0/1, but
    /// this leaves room without relitigating every call site).
    pub fn exit_code(&self) -> i32 {
        1
    }
}
