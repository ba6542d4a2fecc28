//! `wdb create` specs (spec §6).

use crate::prelude::Sandbox;

#[test]
fn creates_experiment_folder_with_state_file() {
    let sandbox = Sandbox::new();
    let folder = sandbox.exp_path("exp1");

    sandbox
        .wdb()
        .args(&["create", "fake_build", folder.to_str().unwrap(), "-r", "test-programs-fake"])
        .passes()
        .stdout_has("Created experiment");

    assert!(folder.join(".wildebeest").join("exp.yaml").exists());
}

#[test]
fn refuses_to_clobber_an_existing_folder() {
    let sandbox = Sandbox::new();
    sandbox.create_fake_experiment("exp1");

    sandbox
        .wdb()
        .args(&["create", "fake_build", sandbox.exp_path("exp1").to_str().unwrap(), "-r", "test-programs-fake"])
        .fails()
        .stderr_has("already exists");
}

#[test]
fn unknown_experiment_type_fails() {
    let sandbox = Sandbox::new();
    let folder = sandbox.exp_path("exp1");

    sandbox
        .wdb()
        .args(&["create", "not_a_real_experiment", folder.to_str().unwrap()])
        .fails();

    assert!(!folder.exists());
}

#[test]
fn unknown_recipe_name_fails() {
    let sandbox = Sandbox::new();
    let folder = sandbox.exp_path("exp1");

    sandbox
        .wdb()
        .args(&["create", "fake_build", folder.to_str().unwrap(), "-r", "does-not-exist"])
        .fails();
}

#[test]
fn defaults_folder_to_experiment_name_in_cwd() {
    let sandbox = Sandbox::new();

    sandbox
        .wdb()
        .pwd(sandbox.parent_path())
        .args(&["create", "fake_build", "-r", "test-programs-fake"])
        .passes();

    assert!(sandbox.parent_path().join("fake_build").join(".wildebeest").join("exp.yaml").exists());
}
