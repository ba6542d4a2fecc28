// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error(transparent)]
    Run(#[from] wdb_core::RunError),
    #[error(transparent)]
    Storage(#[from] wdb_storage::StorageError),
    #[error(transparent)]
    Registry(#[from] wdb_registry::RegistryError),
    #[error(transparent)]
    Experiment(#[from] wdb_core::ExperimentError),
    #[error("failed to spawn job {jobid} at {workload_dir}: {source}")]
    SpawnJob {
        jobid: usize,
        workload_dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("job {0} disappeared without writing a final record; treated as killed")]
    JobDisappeared(usize),
    #[error("no step named {0:?}")]
    UnknownStep(String),
    #[error("run_from_step given but no existing runs found for this experiment")]
    NoExistingRuns,
}
