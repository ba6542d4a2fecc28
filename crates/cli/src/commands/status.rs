// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wdb status` — per-run status table with color coding (spec §6).

use crate::error::CliError;
use crate::table::{Column, Table};
use wdb_registry::AppContext;

pub fn handle(ctx: &AppContext) -> Result<(), CliError> {
    let exp_folder = super::current_exp_folder()?;
    let exp = super::load_experiment(ctx, &exp_folder)?;

    let mut table = Table::new(vec![
        Column::left("run"),
        Column::status("status"),
        Column::left("current_step"),
        Column::left("last_completed_step"),
    ]);
    for run in &exp.runs {
        table.row(vec![
            run.name.clone(),
            run.status.to_string(),
            run.current_step.clone().unwrap_or_default(),
            run.last_completed_step.clone().unwrap_or_default(),
        ]);
    }
    table.render(&mut std::io::stdout());

    println!(
        "{} experiment {}: {}",
        crate::color::header("==>"),
        exp.name,
        crate::color::status(&exp.state.to_string())
    );
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
