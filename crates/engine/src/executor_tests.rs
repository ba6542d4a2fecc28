// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use wdb_core::{
    CompilationSettings, FakeClock, ProjectBuild, ProjectRecipe, Run, RunConfig, RunStep, StepError,
    StepOutput,
};

fn test_run() -> Run {
    let recipe = ProjectRecipe::new("zlib", "make", "https://example.com/zlib.git");
    let config = RunConfig::new("c1", CompilationSettings::default(), 1);
    let build = ProjectBuild::new("/tmp/exp", 1, recipe);
    Run::new("zlib-c1", 1, "/tmp/exp", build, config)
}

fn ok_step(name: &str) -> RunStep {
    let text = format!("{name}-out");
    RunStep::new(
        name,
        false,
        Arc::new(move |_run, _params, _outputs| Ok(StepOutput::text(text.clone()))),
    )
}

fn failing_step(name: &str) -> RunStep {
    RunStep::new(name, false, Arc::new(|_run, _params, _outputs| Err(StepError::new("boom"))))
}

fn algorithm_with(steps: Vec<RunStep>) -> Algorithm {
    Algorithm {
        pre_steps: Vec::new(),
        run_steps: steps,
        post_steps: Vec::new(),
    }
}

#[test]
fn runs_full_sequence_and_finishes() {
    let algorithm = algorithm_with(vec![ok_step("configure"), ok_step("build"), ok_step("test")]);
    let mut run = test_run();
    let clock = FakeClock::new();
    let params = ParamMap::new();

    let result = execute_from(&mut run, &algorithm, &params, "configure", None, &clock, |_| Ok(()));

    assert!(result.is_ok());
    assert_eq!(run.status, RunStatus::Finished);
    assert_eq!(run.last_completed_step.as_deref(), Some("test"));
    assert_eq!(run.outputs.get("configure").unwrap().as_text(), Some("configure-out"));
    assert_eq!(run.outputs.len(), 3);
    assert!(run.step_runtimes.contains_key("configure"));
}

#[test]
fn stops_short_leaves_run_running() {
    let algorithm = algorithm_with(vec![ok_step("configure"), ok_step("build"), ok_step("test")]);
    let mut run = test_run();
    let clock = FakeClock::new();
    let params = ParamMap::new();

    execute_from(&mut run, &algorithm, &params, "configure", Some("build"), &clock, |_| Ok(())).unwrap();

    assert_eq!(run.status, RunStatus::Running);
    assert_eq!(run.last_completed_step.as_deref(), Some("build"));
    assert_eq!(run.outputs.len(), 2);
}

#[test]
fn resumes_from_partway_when_predecessor_matches() {
    let algorithm = algorithm_with(vec![ok_step("configure"), ok_step("build"), ok_step("test")]);
    let mut run = test_run();
    let clock = FakeClock::new();
    let params = ParamMap::new();

    execute_from(&mut run, &algorithm, &params, "configure", Some("build"), &clock, |_| Ok(())).unwrap();
    let result = execute_from(&mut run, &algorithm, &params, "test", None, &clock, |_| Ok(()));

    assert!(result.is_ok());
    assert_eq!(run.status, RunStatus::Finished);
    assert_eq!(run.outputs.len(), 3);
}

#[test]
fn resuming_with_wrong_predecessor_is_rejected() {
    let algorithm = algorithm_with(vec![ok_step("configure"), ok_step("build"), ok_step("test")]);
    let mut run = test_run();
    let clock = FakeClock::new();
    let params = ParamMap::new();

    let result = execute_from(&mut run, &algorithm, &params, "test", None, &clock, |_| Ok(()));

    assert!(matches!(result, Err(RunError::NotResumable { .. })));
}

#[test]
fn from_after_to_is_rejected() {
    let algorithm = algorithm_with(vec![ok_step("configure"), ok_step("build")]);
    let mut run = test_run();
    let clock = FakeClock::new();
    let params = ParamMap::new();

    let result = execute_from(&mut run, &algorithm, &params, "build", Some("configure"), &clock, |_| Ok(()));

    assert!(matches!(result, Err(RunError::FromAfterTo { .. })));
}

#[test]
fn unknown_step_name_is_rejected() {
    let algorithm = algorithm_with(vec![ok_step("configure")]);
    let mut run = test_run();
    let clock = FakeClock::new();
    let params = ParamMap::new();

    let result = execute_from(&mut run, &algorithm, &params, "nope", None, &clock, |_| Ok(()));

    assert!(matches!(result, Err(RunError::UnknownStep(name)) if name == "nope"));
}

#[test]
fn failing_step_marks_run_failed_and_records_runtime_without_output() {
    let algorithm = algorithm_with(vec![ok_step("configure"), failing_step("build"), ok_step("test")]);
    let mut run = test_run();
    let clock = FakeClock::new();
    let params = ParamMap::new();

    let result = execute_from(&mut run, &algorithm, &params, "configure", None, &clock, |_| Ok(()));

    assert!(result.is_err());
    assert_eq!(run.status, RunStatus::Failed);
    assert_eq!(run.failed_step.as_deref(), Some("build"));
    assert_eq!(run.error_msg.as_deref(), Some("boom"));
    assert!(run.step_runtimes.contains_key("build"));
    assert!(!run.outputs.contains_key("build"));
    assert_eq!(run.last_completed_step.as_deref(), Some("configure"));
}

#[test]
fn restarting_from_the_first_step_clears_prior_outputs() {
    let algorithm = algorithm_with(vec![ok_step("configure"), ok_step("build")]);
    let mut run = test_run();
    let clock = FakeClock::new();
    let params = ParamMap::new();

    execute_from(&mut run, &algorithm, &params, "configure", None, &clock, |_| Ok(())).unwrap();
    assert_eq!(run.outputs.len(), 2);

    execute_from(&mut run, &algorithm, &params, "configure", Some("configure"), &clock, |_| Ok(())).unwrap();
    assert_eq!(run.outputs.len(), 1);
    assert!(run.last_completed_step.is_some());
}

#[test]
fn persist_failure_propagates() {
    let algorithm = algorithm_with(vec![ok_step("configure")]);
    let mut run = test_run();
    let clock = FakeClock::new();
    let params = ParamMap::new();

    let result = execute_from(&mut run, &algorithm, &params, "configure", None, &clock, |_| {
        Err(RunError::UnknownStep("persist-boom".to_string()))
    });

    assert!(result.is_err());
}
