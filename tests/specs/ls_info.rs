//! `wdb ls`/`wdb info` specs (spec §6).

use crate::prelude::Sandbox;

#[test]
fn ls_exps_lists_builtin_experiment_factories() {
    let sandbox = Sandbox::new();
    sandbox
        .wdb()
        .pwd(sandbox.parent_path())
        .args(&["ls", "exps"])
        .passes()
        .stdout_has("fake_build")
        .stdout_has("default_build")
        .stdout_has("docker_build");
}

#[test]
fn ls_recipes_lists_registered_recipes() {
    let sandbox = Sandbox::new();
    sandbox
        .wdb()
        .pwd(sandbox.parent_path())
        .args(&["ls", "recipes"])
        .passes()
        .stdout_has("test-programs-fake");
}

#[test]
fn ls_lists_lists_registered_project_lists() {
    let sandbox = Sandbox::new();
    sandbox
        .wdb()
        .pwd(sandbox.parent_path())
        .args(&["ls", "lists"])
        .passes()
        .stdout_has("test-programs-fake");
}

#[test]
fn ls_alg_shows_pipeline_steps_for_current_experiment() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["ls", "alg"])
        .passes()
        .stdout_has("init")
        .stdout_has("configure")
        .stdout_has("build")
        .stdout_has("reset_data");
}

#[test]
fn ls_alg_all_shows_docker_polarity() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["ls", "alg", "-a"])
        .passes()
        .stdout_has("docker=false");
}

#[test]
fn info_shows_experiment_summary() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["info"])
        .passes()
        .stdout_has("fake_build")
        .stdout_has("test-programs-fake");
}
