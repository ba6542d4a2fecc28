//! `wdb run` specs (spec §6, §8 end-to-end scenarios), driven through
//! `fake_build` (`FakeFetcher`/`FakeDriver`) so the whole
//! `init → configure → build → reset_data` pipeline runs hermetically
//! with `--debug` and no real git/toolchain/docker.

use crate::prelude::Sandbox;
use std::fs;

#[test]
fn happy_path_single_run_reaches_finished() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["run", "--debug"])
        .passes()
        .stdout_has("finished in state finished");

    let run_yaml = folder.join(".wildebeest/runstates/run1.run.yaml");
    let text = fs::read_to_string(&run_yaml).expect("run1 runstate readable");
    assert!(text.contains("last_completed_step: reset_data"));
    assert!(text.contains("status: finished"));

    let exp_yaml = fs::read_to_string(folder.join(".wildebeest/exp.yaml")).unwrap();
    assert!(exp_yaml.contains("state: finished"));
}

#[test]
fn rerun_without_force_fails() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");

    sandbox.wdb().pwd(&folder).args(&["run", "--debug"]).passes();

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["run", "--debug"])
        .fails();
}

#[test]
fn rerun_with_force_regenerates_and_finishes_again() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");

    sandbox.wdb().pwd(&folder).args(&["run", "--debug"]).passes();
    sandbox.wdb().pwd(&folder).args(&["run", "--debug", "--force"]).passes();
}

#[test]
fn unknown_from_step_fails() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["run", "--debug", "--from", "not_a_real_step"])
        .fails();
}

#[test]
fn from_step_without_existing_runs_fails() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["run", "--debug", "--from", "configure"])
        .fails();
}

#[test]
fn run_outside_an_experiment_folder_fails() {
    let sandbox = Sandbox::new();

    sandbox
        .wdb()
        .pwd(sandbox.parent_path())
        .args(&["run", "--debug"])
        .fails();
}

#[test]
fn invalid_run_spec_fails() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");
    sandbox.wdb().pwd(&folder).args(&["run", "--debug"]).passes();

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["run", "5-2", "--debug", "--force"])
        .fails()
        .stderr_has("backwards");
}
