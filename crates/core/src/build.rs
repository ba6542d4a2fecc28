// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `(exp_root, project_root, build_folder, recipe)` and the filesystem
//! operations that stitch them together.

use crate::error::StepError;
use crate::recipe::ProjectRecipe;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{fs, io};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectBuild {
    pub exp_root: PathBuf,
    pub project_root: PathBuf,
    pub build_folder: PathBuf,
    pub recipe: ProjectRecipe,
}

impl ProjectBuild {
    pub fn new(exp_root: impl Into<PathBuf>, run_number: usize, recipe: ProjectRecipe) -> Self {
        let exp_root = exp_root.into();
        let project_root = exp_root.join("source").join(recipe.source_folder_name());
        let build_folder = exp_root
            .join("build")
            .join(&recipe.name)
            .join(format!("run{run_number}"));
        Self {
            exp_root,
            project_root,
            build_folder,
            recipe,
        }
    }

    /// Clones (or downloads+extracts) the source tree if it isn't already
    /// present, then ensures the build folder exists when the recipe
    /// supports out-of-tree builds. `fetch_source` is the caller's
    /// `VcsFetcher`-backed closure; `ProjectBuild` itself has no VCS
    /// dependency so `wdb-core` does not need to depend on `wdb-adapters`.
    pub fn init(
        &self,
        fetch_source: impl FnOnce(&ProjectRecipe, &Path) -> Result<(), StepError>,
    ) -> Result<(), StepError> {
        if !self.project_root.exists() {
            fs::create_dir_all(&self.project_root)?;
            fetch_source(&self.recipe, &self.project_root)?;
        }
        if self.recipe.supports_out_of_tree && !self.build_folder.exists() {
            fs::create_dir_all(&self.build_folder)?;
        }
        Ok(())
    }

    /// Rewrites every stored path by substituting `old_root` with
    /// `new_root` as a prefix. Used by `Experiment`'s rebase-on-load.
    pub fn rebase(&mut self, old_root: &Path, new_root: &Path) {
        self.exp_root = rebase_path(&self.exp_root, old_root, new_root);
        self.project_root = rebase_path(&self.project_root, old_root, new_root);
        self.build_folder = rebase_path(&self.build_folder, old_root, new_root);
    }

    /// Deletes the build folder; additionally deletes the cloned source
    /// tree when `destroy_repo` is set.
    pub fn destroy(&self, destroy_repo: bool) -> io::Result<()> {
        if self.build_folder.exists() {
            fs::remove_dir_all(&self.build_folder)?;
        }
        if destroy_repo && self.project_root.exists() {
            fs::remove_dir_all(&self.project_root)?;
        }
        Ok(())
    }
}

pub(crate) fn rebase_path(path: &Path, old_root: &Path, new_root: &Path) -> PathBuf {
    match path.strip_prefix(old_root) {
        Ok(rest) => new_root.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
