// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative project metadata and the per-phase build-step
//! customization hooks a recipe may attach to configure/build/clean.

use crate::build::ProjectBuild;
use crate::error::StepError;
use crate::runconfig::RunConfig;
use serde::{Deserialize, Serialize};

/// Everything a build driver's `configure`/`build`/`clean` method needs.
pub struct BuildStepContext<'a> {
    pub run_config: &'a RunConfig,
    pub build: &'a ProjectBuild,
    pub num_build_jobs: Option<u32>,
}

/// Replaces a driver's default step body outright.
pub trait StepOverride: Send + Sync {
    fn call(&self, ctx: &BuildStepContext<'_>) -> Result<(), StepError>;
}

/// Runs before or after a driver's default (or overridden) step body.
pub trait StepHook: Send + Sync {
    fn call(&self, ctx: &BuildStepContext<'_>) -> Result<(), StepError>;
}

/// Per-phase (configure/build/clean) customization a recipe may apply
/// around the driver's default behavior.
///
/// This is the statically-typed rendering of the original's callable
/// `preprocess`/`override_step`/`postprocess` recipe fields (spec §9):
/// a polymorphic enum stands in for "maybe a callback is set".
pub enum BuildStepOptions {
    /// Run the driver's default body unmodified.
    UseDefault,
    /// Replace the driver's default body entirely.
    Override(Box<dyn StepOverride>),
    /// Run the driver's default body, wrapped by optional pre/post hooks.
    Decorated {
        pre: Option<Box<dyn StepHook>>,
        post: Option<Box<dyn StepHook>>,
    },
}

impl Default for BuildStepOptions {
    fn default() -> Self {
        Self::UseDefault
    }
}

impl std::fmt::Debug for BuildStepOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UseDefault => write!(f, "BuildStepOptions::UseDefault"),
            Self::Override(_) => write!(f, "BuildStepOptions::Override(..)"),
            Self::Decorated { pre, post } => f
                .debug_struct("BuildStepOptions::Decorated")
                .field("pre", &pre.is_some())
                .field("post", &post.is_some())
                .finish(),
        }
    }
}

/// Declarative description of how to obtain and build one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecipe {
    pub name: String,
    /// String key into the build-system driver registry.
    pub build_system: String,
    pub git_remote: String,
    pub git_head: Option<String>,
    pub supports_out_of_tree: bool,
    pub source_languages: Vec<String>,
    pub apt_deps: Vec<String>,
    pub no_cc_wrapper: bool,
    #[serde(skip, default)]
    pub configure_options: SkipBuildStepOptions,
    #[serde(skip, default)]
    pub build_options: SkipBuildStepOptions,
    #[serde(skip, default)]
    pub clean_options: SkipBuildStepOptions,
}

/// Newtype so `BuildStepOptions` (which embeds trait objects and cannot
/// derive `Serialize`/`Deserialize`) can sit in a field the recipe record
/// otherwise serializes; the options themselves are process-local
/// configuration, not persisted state, and are rebuilt by the recipe
/// registry on load.
#[derive(Default)]
pub struct SkipBuildStepOptions(pub BuildStepOptions);

impl std::fmt::Debug for SkipBuildStepOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Clone for SkipBuildStepOptions {
    fn clone(&self) -> Self {
        Self(BuildStepOptions::UseDefault)
    }
}

impl ProjectRecipe {
    pub fn new(name: impl Into<String>, build_system: impl Into<String>, git_remote: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            build_system: build_system.into(),
            git_remote: git_remote.into(),
            git_head: None,
            supports_out_of_tree: false,
            source_languages: Vec::new(),
            apt_deps: Vec::new(),
            no_cc_wrapper: false,
            configure_options: SkipBuildStepOptions::default(),
            build_options: SkipBuildStepOptions::default(),
            clean_options: SkipBuildStepOptions::default(),
        }
    }

    /// Source folder name: `<recipe>[@<head>]`.
    pub fn source_folder_name(&self) -> String {
        match &self.git_head {
            Some(head) => format!("{}@{head}", self.name),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
#[path = "recipe_tests.rs"]
mod tests;
