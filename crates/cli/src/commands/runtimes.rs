// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wdb runtimes` — per-run, per-step runtime table; highlights the
//! slowest step in each run (spec §6).

use crate::error::CliError;
use crate::table::{Column, Table};
use wdb_registry::AppContext;

pub fn handle(ctx: &AppContext) -> Result<(), CliError> {
    let exp_folder = super::current_exp_folder()?;
    let exp = super::load_experiment(ctx, &exp_folder)?;

    let mut table = Table::new(vec![Column::left("run"), Column::left("step"), Column::right("runtime_ms")]);
    for run in &exp.runs {
        let slowest = run.step_runtimes.iter().max_by_key(|(_, ms)| **ms).map(|(name, _)| name.clone());
        for (step, runtime) in &run.step_runtimes {
            let marker = if Some(step) == slowest.as_ref() { "*" } else { "" };
            table.row(vec![run.name.clone(), format!("{step}{marker}"), runtime.to_string()]);
        }
    }
    table.render(&mut std::io::stdout());
    Ok(())
}

#[cfg(test)]
#[path = "runtimes_tests.rs"]
mod tests;
