// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The explicitly-constructed application context: four registries
//! (recipes, project lists, experiments, build-system drivers) that
//! plugin crates populate at startup instead of relying on package
//! entry-point discovery.

use crate::error::RegistryError;
use crate::registry::Registry;
use std::path::PathBuf;
use std::sync::Arc;
use wdb_adapters::BuildSystemDriver;
use wdb_core::{Experiment, ParamMap, ProjectRecipe};

/// Builds a fully-constructed [`Experiment`] (algorithm and runconfigs
/// already wired up) for a registered experiment name. `projectlist` is
/// the caller-resolved recipe sequence (from `-l`/`-r`, or the
/// factory's own default project list if the caller passes an empty
/// `Vec`), so the CLI's `create` command can override it without this
/// trait depending on the registry that resolves project-list names.
pub trait ExperimentFactory: Send + Sync {
    fn build(&self, exp_folder: PathBuf, projectlist: Vec<ProjectRecipe>, params: ParamMap) -> Experiment;
}

pub struct AppContext {
    pub recipes: Registry<ProjectRecipe>,
    pub project_lists: Registry<Vec<String>>,
    pub experiments: Registry<Arc<dyn ExperimentFactory>>,
    pub build_system_drivers: Registry<Arc<dyn BuildSystemDriver>>,
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            recipes: Registry::new("recipe"),
            project_lists: Registry::new("project list"),
            experiments: Registry::new("experiment"),
            build_system_drivers: Registry::new("build system driver"),
        }
    }

    /// Resolves a registered project-list name into its ordered
    /// `ProjectRecipe` sequence by looking each recipe name up in the
    /// `recipes` registry.
    pub fn resolve_project_list(&self, name: &str) -> Result<Vec<ProjectRecipe>, RegistryError> {
        let recipe_names = self.project_lists.get(name)?;
        recipe_names
            .iter()
            .map(|recipe_name| self.recipes.get(recipe_name).map(|r| r.clone()))
            .collect()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
