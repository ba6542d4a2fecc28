// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit registration of the built-in recipes, project lists, build
//! drivers, and experiment factories into a freshly constructed
//! `AppContext` (spec §9: "Replace [entry-point discovery] with an
//! explicit registration call during initialization"). This is `wdb`'s
//! one composition root; a deployment wanting more recipes/experiments
//! would add more `register()` calls here, not a plugin-loader.

use std::path::PathBuf;
use std::sync::Arc;
use wdb_adapters::{FakeDriver, FakeFetcher, GitFetcher, MakeDriver, VcsFetcher};
use wdb_core::{ParamMap, ProjectRecipe, RunConfig, StepOutput};
use wdb_engine::default_algorithm::{default_build_algorithm, docker_build_algorithm};
use wdb_registry::context::ExperimentFactory;
use wdb_registry::{AppContext, Registry};

const TEST_RECIPE_NAME: &str = "test-programs";
const FAKE_RECIPE_NAME: &str = "test-programs-fake";
const DEFAULT_TEST_REMOTE: &str = "git@github.com:lasserre/test-programs.git";

fn test_recipe() -> ProjectRecipe {
    let remote = std::env::var("WDB_TEST_REPO_REMOTE").unwrap_or_else(|_| DEFAULT_TEST_REMOTE.to_string());
    let mut recipe = ProjectRecipe::new(TEST_RECIPE_NAME, "make", remote);
    recipe.source_languages = vec!["c".to_string(), "cpp".to_string()];
    recipe.supports_out_of_tree = true;
    recipe
}

/// Drives the `FakeFetcher`/`FakeDriver` pair so `wdb run --debug` can
/// exercise the full lifecycle without git or a real toolchain
/// installed; this is what the CLI's own black-box tests build on.
fn fake_recipe() -> ProjectRecipe {
    ProjectRecipe::new(FAKE_RECIPE_NAME, "fake", "unused://fake-remote")
}

fn docker_image(params: &ParamMap) -> String {
    match params.get("docker_image").and_then(StepOutput::as_text) {
        Some(image) => image.to_string(),
        None => "ubuntu:22.04".to_string(),
    }
}

struct DefaultBuildFactory;

impl ExperimentFactory for DefaultBuildFactory {
    fn build(&self, exp_folder: PathBuf, projectlist: Vec<ProjectRecipe>, params: ParamMap) -> wdb_core::Experiment {
        let mut drivers: Registry<Arc<dyn wdb_adapters::BuildSystemDriver>> = Registry::new("build system driver");
        let _ = drivers.register("make", Arc::new(MakeDriver) as Arc<dyn wdb_adapters::BuildSystemDriver>);
        let algorithm = default_build_algorithm(Arc::new(GitFetcher) as Arc<dyn VcsFetcher>, Arc::new(drivers), Vec::new(), Vec::new());
        let projectlist = if projectlist.is_empty() { vec![test_recipe()] } else { projectlist };
        let mut exp = wdb_core::Experiment::new("default_build", Arc::new(algorithm), vec![RunConfig::new("default", Default::default(), 1)], projectlist, exp_folder);
        exp.params = params;
        exp.with_experiment_type("default_build")
    }
}

struct DockerBuildFactory;

impl ExperimentFactory for DockerBuildFactory {
    fn build(&self, exp_folder: PathBuf, projectlist: Vec<ProjectRecipe>, params: ParamMap) -> wdb_core::Experiment {
        let mut drivers: Registry<Arc<dyn wdb_adapters::BuildSystemDriver>> = Registry::new("build system driver");
        let _ = drivers.register("make", Arc::new(MakeDriver) as Arc<dyn wdb_adapters::BuildSystemDriver>);
        let image = docker_image(&params);
        let algorithm = match docker_build_algorithm(Arc::new(GitFetcher) as Arc<dyn VcsFetcher>, Arc::new(drivers), image, Vec::new(), Vec::new()) {
            Ok(algorithm) => algorithm,
            Err(e) => unreachable!("built-in docker_build algorithm failed validation: {e}"),
        };
        let projectlist = if projectlist.is_empty() { vec![test_recipe()] } else { projectlist };
        let mut exp = wdb_core::Experiment::new("docker_build", Arc::new(algorithm), vec![RunConfig::new("default", Default::default(), 1)], projectlist, exp_folder);
        exp.params = params;
        exp.with_experiment_type("docker_build")
    }
}

struct FakeBuildFactory;

impl ExperimentFactory for FakeBuildFactory {
    fn build(&self, exp_folder: PathBuf, projectlist: Vec<ProjectRecipe>, params: ParamMap) -> wdb_core::Experiment {
        let mut drivers: Registry<Arc<dyn wdb_adapters::BuildSystemDriver>> = Registry::new("build system driver");
        let _ = drivers.register("fake", Arc::new(FakeDriver::new()) as Arc<dyn wdb_adapters::BuildSystemDriver>);
        let algorithm = default_build_algorithm(Arc::new(FakeFetcher::new()) as Arc<dyn VcsFetcher>, Arc::new(drivers), Vec::new(), Vec::new());
        let projectlist = if projectlist.is_empty() { vec![fake_recipe()] } else { projectlist };
        let mut exp = wdb_core::Experiment::new("fake_build", Arc::new(algorithm), vec![RunConfig::new("default", Default::default(), 1)], projectlist, exp_folder);
        exp.params = params;
        exp.with_experiment_type("fake_build")
    }
}

/// Builds the context every `wdb` subcommand operates against.
pub fn build_context() -> AppContext {
    let mut ctx = AppContext::new();

    let _ = ctx.recipes.register(TEST_RECIPE_NAME, test_recipe());
    let _ = ctx.recipes.register(FAKE_RECIPE_NAME, fake_recipe());
    let _ = ctx.project_lists.register(TEST_RECIPE_NAME, vec![TEST_RECIPE_NAME.to_string()]);
    let _ = ctx.project_lists.register(FAKE_RECIPE_NAME, vec![FAKE_RECIPE_NAME.to_string()]);

    let _ = ctx.build_system_drivers.register("make", Arc::new(MakeDriver) as Arc<dyn wdb_adapters::BuildSystemDriver>);
    let _ = ctx.build_system_drivers.register("fake", Arc::new(FakeDriver::new()) as Arc<dyn wdb_adapters::BuildSystemDriver>);

    let _ = ctx.experiments.register("default_build", Arc::new(DefaultBuildFactory) as Arc<dyn ExperimentFactory>);
    let _ = ctx.experiments.register("docker_build", Arc::new(DockerBuildFactory) as Arc<dyn ExperimentFactory>);
    let _ = ctx.experiments.register("fake_build", Arc::new(FakeBuildFactory) as Arc<dyn ExperimentFactory>);

    ctx
}

#[cfg(test)]
#[path = "builtins_tests.rs"]
mod tests;
