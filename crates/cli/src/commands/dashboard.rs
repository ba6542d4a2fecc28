// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wdb dashboard <parent-folder>` — aggregate status across every
//! experiment folder directly under `parent_folder` (spec §6).

use crate::error::CliError;
use crate::table::{Column, Table};
use std::path::Path;
use wdb_core::{Experiment, RunStatus};
use wdb_storage::{ExpPaths, StateStore};

pub fn handle(parent_folder: &Path) -> Result<(), CliError> {
    let mut table = Table::new(vec![
        Column::left("experiment"),
        Column::status("state"),
        Column::right("finished"),
        Column::right("failed"),
        Column::right("total"),
    ]);

    let entries = std::fs::read_dir(parent_folder).map_err(|source| CliError::Io {
        path: parent_folder.to_path_buf(),
        source,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        let exp_yaml = ExpPaths::exp_yaml(&path);
        if !exp_yaml.exists() {
            continue;
        }
        let Ok(exp) = StateStore::load::<Experiment>(&exp_yaml) else {
            continue;
        };
        // Read runstates fresh off disk rather than trusting exp.yaml's own
        // `runs` snapshot, which is only as current as the last time the
        // experiment's own lifecycle saved it — stale the moment a job
        // runner updates a run mid-experiment (same reasoning as
        // `commands::load_experiment`).
        let runs = wdb_engine::load_runs(&path).unwrap_or_else(|_| exp.runs.clone());
        let finished = runs.iter().filter(|r| r.status == RunStatus::Finished).count();
        let failed = runs.iter().filter(|r| r.status == RunStatus::Failed).count();
        table.row(vec![
            exp.name.clone(),
            exp.state.to_string(),
            finished.to_string(),
            failed.to_string(),
            runs.len().to_string(),
        ]);
    }

    table.render(&mut std::io::stdout());
    Ok(())
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
