// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wdb clean` — runs a build-system clean on every Run's build
//! (supplements spec §6; grounded on the original implementation's
//! `Experiment.clean()`, which was dropped from the distilled CLI
//! surface but still a useful teardown step between `run` attempts).

use crate::error::CliError;
use wdb_registry::AppContext;

pub fn handle(ctx: &AppContext) -> Result<(), CliError> {
    let exp_folder = super::current_exp_folder()?;
    let exp = super::load_experiment(ctx, &exp_folder)?;

    wdb_engine::clean_experiment(&exp, &ctx.build_system_drivers)?;
    println!("{} cleaned {} run(s)", crate::color::header("==>"), exp.runs.len());
    Ok(())
}

#[cfg(test)]
#[path = "clean_tests.rs"]
mod tests;
