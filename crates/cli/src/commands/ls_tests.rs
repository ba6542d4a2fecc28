// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::builtins::build_context;
use serial_test::serial;

#[test]
fn lists_registered_experiment_types() {
    let ctx = build_context();
    handle(&ctx, LsTarget::Exps, None, false).unwrap();
}

#[test]
fn lists_registered_recipes() {
    let ctx = build_context();
    handle(&ctx, LsTarget::Recipes, None, false).unwrap();
}

#[test]
fn lists_registered_project_lists() {
    let ctx = build_context();
    handle(&ctx, LsTarget::Lists, None, false).unwrap();
}

#[test]
#[serial]
fn lists_current_experiment_algorithm_steps() {
    let tmp = tempfile::tempdir().unwrap();
    let folder = tmp.path().join("exp1");
    let ctx = build_context();
    super::super::create::handle(&ctx, "fake_build", Some(folder.clone()), None, Vec::new(), Vec::new()).unwrap();

    let prior_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(&folder).unwrap();
    let result = handle(&ctx, LsTarget::Alg, None, true);
    std::env::set_current_dir(prior_dir).unwrap();

    result.unwrap();
}
