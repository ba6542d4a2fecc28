// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wdb create` — instantiate a registered experiment at a folder,
//! refusing to clobber an existing one.

use crate::error::CliError;
use std::path::PathBuf;
use wdb_core::{ParamMap, StepOutput};
use wdb_registry::AppContext;
use wdb_storage::{ExpPaths, StateStore};

#[allow(clippy::too_many_arguments)]
pub fn handle(
    ctx: &AppContext,
    exp_name: &str,
    folder: Option<PathBuf>,
    list: Option<String>,
    recipes: Vec<String>,
    params: Vec<(String, String)>,
) -> Result<(), CliError> {
    let folder = folder.unwrap_or_else(|| PathBuf::from(exp_name));
    if folder.exists() {
        return Err(CliError::Usage(format!("{} already exists", folder.display())));
    }

    let projectlist = if !recipes.is_empty() {
        recipes.iter().map(|name| ctx.recipes.get(name).cloned()).collect::<Result<Vec<_>, _>>()?
    } else if let Some(list_name) = &list {
        ctx.resolve_project_list(list_name)?
    } else {
        Vec::new()
    };

    let param_map: ParamMap = params.into_iter().map(|(k, v)| (k, StepOutput::Text(v))).collect();

    let factory = ctx.experiments.get(exp_name)?;
    let exp = factory.build(folder.clone(), projectlist, param_map);

    std::fs::create_dir_all(&folder).map_err(|source| CliError::Io { path: folder.clone(), source })?;
    StateStore::save(&exp, &ExpPaths::exp_yaml(&folder))?;

    println!("{} Created experiment {:?} at {}", crate::color::header("==>"), exp_name, folder.display());
    Ok(())
}

#[cfg(test)]
#[path = "create_tests.rs"]
mod tests;
