// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wdb_core::build::ProjectBuild;
use wdb_core::recipe::ProjectRecipe;
use wdb_core::runconfig::{CompilationSettings, RunConfig};

fn ctx_parts() -> (RunConfig, ProjectBuild) {
    let recipe = ProjectRecipe::new("zlib", "make", "https://example.com/zlib.git");
    let build = ProjectBuild::new("/exp", 1, recipe);
    let run_config = RunConfig::new("c1", CompilationSettings::default(), 2);
    (run_config, build)
}

#[test]
fn fake_driver_records_calls_in_order() {
    let (run_config, build) = ctx_parts();
    let driver = FakeDriver::new();
    let ctx = BuildStepContext {
        run_config: &run_config,
        build: &build,
        num_build_jobs: None,
    };

    driver.configure(&ctx).unwrap();
    driver.build(&ctx).unwrap();
    driver.clean(&ctx).unwrap();

    assert_eq!(*driver.calls.lock(), vec!["configure", "build", "clean"]);
}

#[test]
fn fake_driver_fails_on_configured_phase() {
    let (run_config, build) = ctx_parts();
    let driver = FakeDriver::failing_on("build");
    let ctx = BuildStepContext {
        run_config: &run_config,
        build: &build,
        num_build_jobs: None,
    };

    driver.configure(&ctx).unwrap();
    let err = driver.build(&ctx).unwrap_err();
    assert!(err.message.contains("build"));
}
