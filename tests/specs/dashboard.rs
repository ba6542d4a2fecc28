//! `wdb dashboard <parent-folder>` specs (spec §6).

use crate::prelude::Sandbox;
use std::fs;

#[test]
fn aggregates_finished_and_unstarted_experiments_under_one_parent() {
    let sandbox = Sandbox::new();
    let finished = sandbox.create_fake_experiment("finished-one");
    let untouched = sandbox.create_fake_experiment("untouched-one");

    sandbox.wdb().pwd(&finished).args(&["run", "--debug"]).passes();

    sandbox
        .wdb()
        .args(&["dashboard", sandbox.parent_path().to_str().unwrap()])
        .passes()
        .stdout_has("finished-one")
        .stdout_has("untouched-one")
        .stdout_has("ready");

    // Both experiments are rooted directly under the sandbox's parent
    // dir, which is also `untouched`'s own folder name by construction
    // above; the untouched experiment never reaches `finished`, so its
    // row should still report zero completed runs.
    let _ = untouched;
}

#[test]
fn skips_entries_that_are_not_wildebeest_experiments() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");
    fs::create_dir_all(sandbox.parent_path().join("not-an-experiment")).unwrap();

    sandbox
        .wdb()
        .args(&["dashboard", sandbox.parent_path().to_str().unwrap()])
        .passes()
        .stdout_has("exp1");

    let _ = folder;
}

#[test]
fn reports_finished_run_counts_after_a_run() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");
    sandbox.wdb().pwd(&folder).args(&["run", "--debug"]).passes();

    sandbox
        .wdb()
        .args(&["dashboard", sandbox.parent_path().to_str().unwrap()])
        .passes()
        .stdout_has("exp1")
        .stdout_has("finished");
}

#[test]
fn nonexistent_parent_folder_fails() {
    let sandbox = Sandbox::new();
    let missing = sandbox.parent_path().join("does-not-exist");

    sandbox.wdb().args(&["dashboard", missing.to_str().unwrap()]).fails();
}
