//! `wdb rm build`/`wdb clean` specs (spec §6).

use crate::prelude::Sandbox;
use std::fs;

#[test]
fn rm_build_with_nothing_to_remove_succeeds() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["rm", "build", "-f"])
        .passes()
        .stdout_has("nothing to remove");
}

#[test]
fn rm_build_force_removes_existing_build_dir() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");
    let build_dir = folder.join("build");
    fs::create_dir_all(build_dir.join("obj")).unwrap();

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["rm", "build", "-f"])
        .passes()
        .stdout_has("removed");
    assert!(!build_dir.exists());
}

#[test]
fn rm_build_destroy_repo_also_removes_source_dir() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");
    let build_dir = folder.join("build");
    let source_dir = folder.join("source");
    fs::create_dir_all(&build_dir).unwrap();
    fs::create_dir_all(source_dir.join("zlib")).unwrap();

    sandbox.wdb().pwd(&folder).args(&["rm", "build", "-f", "--destroy-repo"]).passes();

    assert!(!build_dir.exists());
    assert!(!source_dir.exists());
}

#[test]
fn rm_outside_an_experiment_folder_fails() {
    let sandbox = Sandbox::new();

    sandbox.wdb().pwd(sandbox.parent_path()).args(&["rm", "build", "-f"]).fails();
}

#[test]
fn clean_with_no_runs_generated_yet_succeeds() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["clean"])
        .passes()
        .stdout_has("cleaned 0 run(s)");
}

#[test]
fn clean_after_a_run_cleans_every_generated_run() {
    let sandbox = Sandbox::new();
    let folder = sandbox.create_fake_experiment("exp1");
    sandbox.wdb().pwd(&folder).args(&["run", "--debug"]).passes();

    sandbox
        .wdb()
        .pwd(&folder)
        .args(&["clean"])
        .passes()
        .stdout_has("cleaned 1 run(s)");
}

#[test]
fn clean_outside_an_experiment_folder_fails() {
    let sandbox = Sandbox::new();

    sandbox.wdb().pwd(sandbox.parent_path()).args(&["clean"]).fails();
}
