// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wdb info` — algorithm, runconfigs, project list, run count (spec §6).

use crate::error::CliError;
use wdb_registry::AppContext;

pub fn handle(ctx: &AppContext) -> Result<(), CliError> {
    let exp_folder = super::current_exp_folder()?;
    let exp = super::load_experiment(ctx, &exp_folder)?;

    println!("{} {}", crate::color::header("experiment:"), exp.name);
    println!("{} {}", crate::color::header("type:"), exp.experiment_type);
    println!("{} {}", crate::color::header("folder:"), exp.exp_folder.display());
    println!("{} {}", crate::color::header("state:"), crate::color::status(&exp.state.to_string()));

    println!("{}", crate::color::header("algorithm:"));
    println!(
        "  pre={} run={} post={}",
        exp.algorithm.pre_steps.len(),
        exp.algorithm.run_steps.len(),
        exp.algorithm.post_steps.len()
    );

    println!("{}", crate::color::header("projectlist:"));
    for recipe in &exp.projectlist {
        println!("  {} ({})", crate::color::literal(&recipe.name), recipe.build_system);
    }

    println!("{}", crate::color::header("runconfigs:"));
    for config in &exp.runconfigs {
        println!("  {}", crate::color::literal(&config.name));
    }

    println!("{} {}", crate::color::header("runs:"), exp.runs.len());
    Ok(())
}

#[cfg(test)]
#[path = "info_tests.rs"]
mod tests;
