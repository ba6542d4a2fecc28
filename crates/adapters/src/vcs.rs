// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source-fetching plugin contract, plus a `git`-backed concrete
//! implementation and a `Fake` implementation for tests.

use crate::process::run_command;
use parking_lot::Mutex;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use wdb_core::recipe::ProjectRecipe;
use wdb_core::StepError;

pub trait VcsFetcher: Send + Sync {
    /// Populates `dest` (already created, empty) with the recipe's
    /// source tree, checking out `git_head` if set.
    fn fetch(&self, recipe: &ProjectRecipe, dest: &Path) -> Result<(), StepError>;
}

pub struct GitFetcher;

impl VcsFetcher for GitFetcher {
    fn fetch(&self, recipe: &ProjectRecipe, dest: &Path) -> Result<(), StepError> {
        run_command("git", &["clone", &recipe.git_remote, "."], dest)
            .map_err(|e| StepError::new(e.to_string()))?;
        if let Some(head) = &recipe.git_head {
            run_command("git", &["checkout", head], dest).map_err(|e| StepError::new(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
pub struct FakeFetcher {
    pub calls: Arc<Mutex<Vec<String>>>,
}

#[cfg(any(test, feature = "test-support"))]
impl FakeFetcher {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Default for FakeFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl VcsFetcher for FakeFetcher {
    fn fetch(&self, recipe: &ProjectRecipe, dest: &Path) -> Result<(), StepError> {
        self.calls.lock().push(recipe.name.clone());
        fs::write(dest.join("WDB_FAKE_CHECKOUT"), &recipe.name).map_err(StepError::from)
    }
}

#[cfg(test)]
#[path = "vcs_tests.rs"]
mod tests;
