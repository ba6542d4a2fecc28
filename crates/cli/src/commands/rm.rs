// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wdb rm build` — delete the experiment's build folder after
//! confirmation (spec §6).

use crate::error::CliError;
use std::io::Write;
use wdb_storage::ExpPaths;

pub fn handle_build(force: bool, destroy_repo: bool) -> Result<(), CliError> {
    let exp_folder = super::current_exp_folder()?;
    let build_dir = ExpPaths::build_dir(&exp_folder);

    if !build_dir.exists() {
        println!("{} nothing to remove at {}", crate::color::muted("==>"), build_dir.display());
        return Ok(());
    }

    if !force && !confirm(&format!("remove {}?", build_dir.display()))? {
        println!("{} aborted", crate::color::muted("==>"));
        return Ok(());
    }

    std::fs::remove_dir_all(&build_dir).map_err(|source| CliError::Io {
        path: build_dir.clone(),
        source,
    })?;
    println!("{} removed {}", crate::color::header("==>"), build_dir.display());

    if destroy_repo {
        let source_dir = ExpPaths::source_dir(&exp_folder);
        if source_dir.exists() {
            std::fs::remove_dir_all(&source_dir).map_err(|source| CliError::Io {
                path: source_dir.clone(),
                source,
            })?;
            println!("{} removed {}", crate::color::header("==>"), source_dir.display());
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, CliError> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush().ok();
    let mut line = String::new();
    std::io::stdin().read_line(&mut line).map_err(|source| CliError::Io {
        path: std::path::PathBuf::from("<stdin>"),
        source,
    })?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
#[path = "rm_tests.rs"]
mod tests;
