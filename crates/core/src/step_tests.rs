// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;

fn noop_run_step_fn() -> RunStepFn {
    Arc::new(|_run, _params, _outputs| Ok(StepOutput::text("ok")))
}

#[test]
fn run_step_carries_docker_polarity() {
    let step = RunStep::new("configure", true, noop_run_step_fn());
    assert!(step.run_in_docker);
    assert_eq!(step.name, "configure");
}

#[test]
fn with_params_overrides_default_empty_map() {
    let mut params = ParamMap::new();
    params.insert("flag".into(), StepOutput::text("1"));
    let step = RunStep::new("build", false, noop_run_step_fn()).with_params(params);
    assert_eq!(step.params.get("flag").unwrap().as_text(), Some("1"));
}
