// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The built-in `init → configure → build → reset_data` pipeline most
//! experiments start from, plus a containerized variant that brackets
//! `configure`/`build` with `docker_init`/`docker_cleanup`. Grounded in
//! `original_source/wildebeest/defaultbuildalgorithm.py` and its
//! `preprocessing/repos.py::clone_repos` preprocessing step.

use std::collections::HashMap;
use std::process::Command;
use std::sync::Arc;
use wdb_adapters::{docker, BuildSystemDriver, VcsFetcher};
use wdb_core::recipe::BuildStepContext;
use wdb_core::{
    Algorithm, AlgorithmError, ExpStep, ExpStepFn, ParamMap, RunStep, RunStepFn, ScopedEnv, StepError,
    StepOutput,
};
use wdb_registry::Registry;
use wdb_storage::ExpPaths;

fn resolve_driver(
    drivers: &Registry<Arc<dyn BuildSystemDriver>>,
    name: &str,
) -> Result<Arc<dyn BuildSystemDriver>, StepError> {
    drivers.get(name).map(Arc::clone).map_err(|e| StepError::new(e.to_string()))
}

fn build_jobs_override(params: &ParamMap) -> Option<u32> {
    match params.get("num_build_jobs") {
        Some(StepOutput::Json(v)) => v.as_u64().map(|n| n as u32),
        Some(StepOutput::Text(s)) => s.parse().ok(),
        _ => None,
    }
}

fn run_cmd(cmd: &mut Command) -> Result<(), StepError> {
    let status = cmd.status().map_err(|e| StepError::wrap(e.to_string(), e))?;
    if !status.success() {
        return Err(StepError::new(format!("command exited with {status}")));
    }
    Ok(())
}

/// `clone_repos`: fetches every run's source tree before any run starts
/// building, so two runs sharing a recipe never race on "does the
/// source folder exist yet" (the original's own comment on this step).
fn clone_repos_step(fetcher: Arc<dyn VcsFetcher>) -> ExpStep {
    let process: ExpStepFn = Arc::new(move |exp, _params, _outputs| {
        for run in &exp.runs {
            run.build.init(|recipe, dest| fetcher.fetch(recipe, dest))?;
        }
        Ok(StepOutput::text("cloned"))
    });
    ExpStep::new("clone_repos", process)
}

fn init_step(fetcher: Arc<dyn VcsFetcher>, drivers: Arc<Registry<Arc<dyn BuildSystemDriver>>>) -> RunStep {
    let process: RunStepFn = Arc::new(move |run, _params, _outputs| {
        run.build.init(|recipe, dest| fetcher.fetch(recipe, dest))?;
        resolve_driver(&drivers, &run.build.recipe.build_system)?;
        Ok(StepOutput::text(run.build.recipe.build_system.clone()))
    });
    RunStep::new("init", false, process)
}

fn configure_step(drivers: Arc<Registry<Arc<dyn BuildSystemDriver>>>, run_in_docker: bool) -> RunStep {
    let process: RunStepFn = Arc::new(move |run, params, _outputs| {
        let driver = resolve_driver(&drivers, &run.build.recipe.build_system)?;
        let mut env = HashMap::new();
        run.config.compilation.add_c_cpp_vars_to_env(&mut env);
        let _scoped_env = ScopedEnv::set(env);
        let ctx = BuildStepContext {
            run_config: &run.config,
            build: &run.build,
            num_build_jobs: build_jobs_override(params),
        };
        driver.configure(&ctx)?;
        Ok(StepOutput::text("configured"))
    });
    RunStep::new("configure", run_in_docker, process)
}

fn build_step(drivers: Arc<Registry<Arc<dyn BuildSystemDriver>>>, run_in_docker: bool) -> RunStep {
    let process: RunStepFn = Arc::new(move |run, params, _outputs| {
        let driver = resolve_driver(&drivers, &run.build.recipe.build_system)?;
        let mut env = HashMap::new();
        run.config.compilation.add_c_cpp_vars_to_env(&mut env);
        let _scoped_env = ScopedEnv::set(env);
        let ctx = BuildStepContext {
            run_config: &run.config,
            build: &run.build,
            num_build_jobs: build_jobs_override(params),
        };
        driver.build(&ctx)?;
        Ok(StepOutput::text("built"))
    });
    RunStep::new("build", run_in_docker, process)
}

/// Resets (deletes then recreates) the run's postprocessing data folder,
/// so re-running postprocessing from this point always starts clean.
fn reset_data_step() -> RunStep {
    let process: RunStepFn = Arc::new(move |run, _params, _outputs| {
        let data_dir = ExpPaths::rundata_dir(&run.exp_root, run.number);
        if data_dir.exists() {
            std::fs::remove_dir_all(&data_dir)?;
        }
        std::fs::create_dir_all(&data_dir)?;
        Ok(StepOutput::Paths(vec![data_dir]))
    });
    RunStep::new("reset_data", false, process)
}

/// Creates the run's dedicated container via `docker run -td --name
/// <container_name> <image>`. `run.container_name` must already be set
/// (the experiment lifecycle derives it deterministically before
/// dispatch, spec §4.6).
fn docker_init_step(image: impl Into<String>) -> RunStep {
    let image = image.into();
    let process: RunStepFn = Arc::new(move |run, _params, _outputs| {
        let container_name = run
            .container_name
            .clone()
            .ok_or_else(|| StepError::new("run has no container_name; set one before docker_init"))?;
        run_cmd(&mut docker::docker_run_command(&container_name, &image, &[]))?;
        Ok(StepOutput::text(container_name))
    });
    RunStep::new("docker_init", false, process)
}

/// Tears the run's container down. Inserted immediately after the final
/// docker step, as spec §5 describes.
fn docker_cleanup_step() -> RunStep {
    let process: RunStepFn = Arc::new(move |run, _params, _outputs| {
        let container_name = run
            .container_name
            .clone()
            .ok_or_else(|| StepError::new("run has no container_name"))?;
        run_cmd(&mut docker::docker_rm_command(&container_name))?;
        Ok(StepOutput::text("cleaned"))
    });
    RunStep::new("docker_cleanup", false, process)
}

/// The host-only default pipeline: `clone_repos` (pre) then
/// `init → configure → build → reset_data → [post_build_steps]` (run)
/// then `[postprocess_steps]` (post).
pub fn default_build_algorithm(
    fetcher: Arc<dyn VcsFetcher>,
    drivers: Arc<Registry<Arc<dyn BuildSystemDriver>>>,
    post_build_steps: Vec<RunStep>,
    postprocess_steps: Vec<ExpStep>,
) -> Algorithm {
    let mut run_steps = vec![
        init_step(fetcher.clone(), drivers.clone()),
        configure_step(drivers.clone(), false),
        build_step(drivers, false),
        reset_data_step(),
    ];
    run_steps.extend(post_build_steps);

    Algorithm {
        pre_steps: vec![clone_repos_step(fetcher)],
        run_steps,
        post_steps: postprocess_steps,
    }
}

/// The containerized variant: `configure`/`build` run inside the run's
/// own container, bracketed by `docker_init`/`docker_cleanup` on the
/// host (spec §5 scenario 2: `[init(host), configure(docker),
/// build(docker), docker_cleanup(host), reset_data(host)]`).
pub fn docker_build_algorithm(
    fetcher: Arc<dyn VcsFetcher>,
    drivers: Arc<Registry<Arc<dyn BuildSystemDriver>>>,
    image: impl Into<String>,
    post_build_steps: Vec<RunStep>,
    postprocess_steps: Vec<ExpStep>,
) -> Result<Algorithm, AlgorithmError> {
    let mut algorithm = Algorithm {
        pre_steps: vec![clone_repos_step(fetcher.clone())],
        run_steps: vec![
            init_step(fetcher, drivers.clone()),
            docker_init_step(image),
            configure_step(drivers.clone(), true),
            build_step(drivers, true),
            reset_data_step(),
        ],
        post_steps: postprocess_steps,
    };
    algorithm.insert_run_step_after("build", docker_cleanup_step())?;
    for step in post_build_steps {
        algorithm.run_steps.push(step);
    }
    algorithm.validate()?;
    Ok(algorithm)
}

/// Sanitizes a deterministic container name to Docker's allowed
/// `[a-zA-Z0-9_.-]` charset (spec §4.6: "deterministic from
/// `(workload_id, run.number, recipe.name, config.name)`").
pub fn derive_container_name(workload_id: &str, run_number: usize, recipe_name: &str, config_name: &str) -> String {
    let raw = format!("wdb-{workload_id}-run{run_number}-{recipe_name}-{config_name}");
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' { c } else { '-' })
        .collect()
}

#[cfg(test)]
#[path = "default_algorithm_tests.rs"]
mod tests;
