//! `wdb kill`/`wdb log` specs (spec §6, §4.6 kill-tree semantics).

use crate::prelude::Sandbox;
use std::fs;

#[test]
fn kill_without_job_or_force_fails() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["kill"])
        .fails()
        .stderr_has("--job K or -f");
}

#[test]
fn kill_with_force_and_nothing_running_fails() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["kill", "-f"])
        .fails()
        .stderr_has("no running job");
}

#[test]
fn kill_by_job_id_when_nothing_matches_fails() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["kill", "--job", "7"])
        .fails()
        .stderr_has("no running job");
}

#[test]
fn kill_outside_an_experiment_folder_fails() {
    let sandbox = Sandbox::new();

    sandbox.wdb().pwd(sandbox.parent_path()).args(&["kill", "-f"]).fails();
}

#[test]
fn log_of_a_job_that_never_wrote_a_logfile_fails() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");
    sandbox.wdb().pwd(&folder).args(&["run", "--debug"]).passes();

    // `--debug` runs each job inline instead of spawning a subprocess,
    // so no job ever writes its own logfile.
    sandbox.wdb().pwd(&folder).args(&["log", "1"]).fails();
}

#[test]
fn log_outside_an_experiment_folder_fails() {
    let sandbox = Sandbox::new();

    sandbox.wdb().pwd(sandbox.parent_path()).args(&["log", "1"]).fails();
}

#[test]
fn log_prints_lines_and_highlights_error_like_ones() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");
    sandbox.wdb().pwd(&folder).args(&["run", "--debug"]).passes();

    let logs_dir = single_workload_dir(&sandbox).join("logs");
    fs::create_dir_all(&logs_dir).unwrap();
    fs::write(logs_dir.join("job1.log"), "configuring...\nerror: build step failed\ndone\n").unwrap();

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["log", "1"])
        .passes()
        .stdout_has("configuring...")
        .stdout_has("error: build step failed")
        .stdout_has("done");
}

/// Locates the single `<name>-<hash>.workload` directory a prior `run`
/// created under the sandbox's isolated `$HOME`, without replicating
/// the workload-name hash derivation in the test itself.
fn single_workload_dir(sandbox: &Sandbox) -> std::path::PathBuf {
    let workloads_root = sandbox.home_path().join(".wildebeest").join("workloads");
    fs::read_dir(&workloads_root)
        .expect("workloads root should exist after a run")
        .flatten()
        .next()
        .expect("exactly one workload folder")
        .path()
}
