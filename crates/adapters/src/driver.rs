// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build-system driver plugin contract, plus one concrete example
//! (`MakeDriver`) and a `Fake` implementation for tests.

use crate::process::run_command;
use parking_lot::Mutex;
use std::sync::Arc;
use wdb_core::recipe::BuildStepContext;
use wdb_core::StepError;

/// A driver is registered under a string key (`ProjectRecipe::build_system`)
/// and invoked with the build folder as current directory. The engine
/// applies the recipe's `BuildStepOptions` (preprocess/override/postprocess)
/// around each call and exports the recipe's C/CXX/LD environment
/// variables before invoking it.
pub trait BuildSystemDriver: Send + Sync {
    fn configure(&self, ctx: &BuildStepContext<'_>) -> Result<(), StepError>;
    fn build(&self, ctx: &BuildStepContext<'_>) -> Result<(), StepError>;
    fn clean(&self, ctx: &BuildStepContext<'_>) -> Result<(), StepError>;
}

/// A plain `./configure && make -j<N> && make clean` driver.
pub struct MakeDriver;

impl BuildSystemDriver for MakeDriver {
    fn configure(&self, ctx: &BuildStepContext<'_>) -> Result<(), StepError> {
        let configure_script = ctx.build.project_root.join("configure");
        if configure_script.exists() {
            run_command(
                configure_script.to_string_lossy().as_ref(),
                &[],
                &ctx.build.build_folder,
            )
            .map_err(|e| StepError::new(e.to_string()))?;
        }
        Ok(())
    }

    fn build(&self, ctx: &BuildStepContext<'_>) -> Result<(), StepError> {
        let jobs = ctx.num_build_jobs.unwrap_or(ctx.run_config.num_build_jobs);
        let jobs_arg = jobs.to_string();
        run_command("make", &["-j", &jobs_arg], &ctx.build.build_folder)
            .map_err(|e| StepError::new(e.to_string()))
    }

    fn clean(&self, ctx: &BuildStepContext<'_>) -> Result<(), StepError> {
        run_command("make", &["clean"], &ctx.build.build_folder).map_err(|e| StepError::new(e.to_string()))
    }
}

/// Records every call it receives instead of touching the filesystem;
/// optionally fails a named phase to exercise step-failure handling.
#[cfg(any(test, feature = "test-support"))]
pub struct FakeDriver {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_on: Option<String>,
}

#[cfg(any(test, feature = "test-support"))]
impl FakeDriver {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        }
    }

    pub fn failing_on(phase: impl Into<String>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: Some(phase.into()),
        }
    }

    fn record(&self, phase: &str) -> Result<(), StepError> {
        self.calls.lock().push(phase.to_string());
        if self.fail_on.as_deref() == Some(phase) {
            return Err(StepError::new(format!("fake driver configured to fail on {phase}")));
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Default for FakeDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl BuildSystemDriver for FakeDriver {
    fn configure(&self, _ctx: &BuildStepContext<'_>) -> Result<(), StepError> {
        self.record("configure")
    }

    fn build(&self, _ctx: &BuildStepContext<'_>) -> Result<(), StepError> {
        self.record("build")
    }

    fn clean(&self, _ctx: &BuildStepContext<'_>) -> Result<(), StepError> {
        self.record("clean")
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
