// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wdb docker_shell <run-number>` — start/restart the Run's container
//! and attach an interactive shell (spec §6, §4.6 container-name
//! derivation).

use crate::error::CliError;
use std::process::Command;
use wdb_registry::AppContext;
use wdb_storage::{ExpPaths, StateStore};

pub fn handle(ctx: &AppContext, run_number: usize) -> Result<(), CliError> {
    let exp_folder = super::current_exp_folder()?;
    let exp = super::load_experiment(ctx, &exp_folder)?;
    let run: wdb_core::Run = StateStore::load(&ExpPaths::run_yaml(&exp_folder, run_number))?;

    let Some(container_name) = &run.container_name else {
        return Err(CliError::Usage(format!("run {run_number} has no container (not a docker phase, or not yet started)")));
    };

    // `docker start` is a no-op error if already running; ignore its
    // exit code and let the subsequent exec surface any real problem.
    let _ = Command::new("docker").args(["start", container_name]).status();

    let status = Command::new("docker")
        .args(["exec", "-it", container_name, "/bin/bash"])
        .status()
        .map_err(|source| CliError::Io {
            path: std::path::PathBuf::from("docker"),
            source,
        })?;

    if !status.success() {
        return Err(CliError::Usage(format!("docker exec into {container_name} exited with {status}")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "docker_shell_tests.rs"]
mod tests;
