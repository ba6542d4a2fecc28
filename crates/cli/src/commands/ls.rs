// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wdb ls` — list registry contents, or (`ls alg`) the current
//! experiment's algorithm steps.

use crate::cli::LsTarget;
use crate::error::CliError;
use wdb_registry::AppContext;

pub fn handle(ctx: &AppContext, target: LsTarget, list: Option<String>, all: bool) -> Result<(), CliError> {
    match target {
        LsTarget::Lists => {
            for name in ctx.project_lists.names() {
                println!("{}", crate::color::literal(name));
            }
        }
        LsTarget::Recipes => {
            let recipes = match &list {
                Some(list_name) => ctx.resolve_project_list(list_name)?,
                None => {
                    for name in ctx.recipes.names() {
                        println!("{}", crate::color::literal(name));
                    }
                    return Ok(());
                }
            };
            for recipe in &recipes {
                println!("{} ({})", crate::color::literal(&recipe.name), recipe.build_system);
            }
        }
        LsTarget::Exps => {
            for name in ctx.experiments.names() {
                println!("{}", crate::color::literal(name));
            }
        }
        LsTarget::Alg => {
            let exp_folder = super::current_exp_folder()?;
            let exp = super::load_experiment(ctx, &exp_folder)?;
            print_steps("pre", exp.algorithm.pre_steps.iter().map(|s| (s.name.as_str(), None)), all);
            print_steps(
                "run",
                exp.algorithm.run_steps.iter().map(|s| (s.name.as_str(), Some(s.run_in_docker))),
                all,
            );
            print_steps("post", exp.algorithm.post_steps.iter().map(|s| (s.name.as_str(), None)), all);
        }
    }
    Ok(())
}

fn print_steps<'a>(phase: &str, steps: impl Iterator<Item = (&'a str, Option<bool>)>, all: bool) {
    println!("{}", crate::color::header(phase));
    for (name, run_in_docker) in steps {
        match (all, run_in_docker) {
            (true, Some(docker)) => println!("  {} (docker={})", name, docker),
            _ => println!("  {name}"),
        }
    }
}

#[cfg(test)]
#[path = "ls_tests.rs"]
mod tests;
