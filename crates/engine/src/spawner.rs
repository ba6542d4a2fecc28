// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Abstraction over "start one OS-level job and poll it to completion",
//! so [`JobRunner`](crate::job_runner::JobRunner) never touches
//! `std::process` directly and its dispatch logic is testable without
//! spawning anything real.

use crate::error::RunnerError;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use wdb_adapters::docker;

/// Everything needed to start one job: which run-step range, where its
/// log goes, and (when the phase is containerized) which container to
/// exec into.
pub struct SpawnSpec<'a> {
    pub cwd: &'a Path,
    pub logfile: &'a Path,
    pub jobid: usize,
    pub from_step: &'a str,
    pub to_step: &'a str,
    pub container_name: Option<&'a str>,
}

/// A running job, polled non-blockingly until it exits.
pub trait SpawnedChild: Send {
    fn pid(&self) -> u32;
    /// `Ok(None)` while still running, `Ok(Some(code))` once it exits.
    fn try_wait(&mut self) -> std::io::Result<Option<i32>>;
    /// Hard-kills the job and everything under it.
    fn kill(&mut self);
}

pub trait JobSpawner: Send + Sync {
    fn spawn(&self, spec: &SpawnSpec<'_>) -> Result<Box<dyn SpawnedChild>, RunnerError>;
}

/// Re-invokes the engine binary itself: `<engine_binary> run --job K
/// --from X --to Y`, either as a direct subprocess or, for a
/// containerized phase, via `docker exec <container>` (spec §4.6's
/// bootstrapping trick — the child reloads all state from disk rather
/// than the supervisor forking in-memory).
pub struct ProcessSpawner {
    pub engine_binary: PathBuf,
}

impl ProcessSpawner {
    pub fn new(engine_binary: impl Into<PathBuf>) -> Self {
        Self {
            engine_binary: engine_binary.into(),
        }
    }
}

struct StdChild(Child);

impl SpawnedChild for StdChild {
    fn pid(&self) -> u32 {
        self.0.id()
    }

    fn try_wait(&mut self) -> std::io::Result<Option<i32>> {
        Ok(self.0.try_wait()?.map(|status| status.code().unwrap_or(-1)))
    }

    fn kill(&mut self) {
        #[cfg(target_os = "linux")]
        if let Ok(pid) = i32::try_from(self.0.id()) {
            let _ = wdb_adapters::process::kill_tree(pid);
        }
        let _ = self.0.kill();
    }
}

impl JobSpawner for ProcessSpawner {
    fn spawn(&self, spec: &SpawnSpec<'_>) -> Result<Box<dyn SpawnedChild>, RunnerError> {
        let spawn_err = |source: std::io::Error| RunnerError::SpawnJob {
            jobid: spec.jobid,
            workload_dir: spec.logfile.to_path_buf(),
            source,
        };

        let stdout = File::create(spec.logfile).map_err(spawn_err)?;
        let stderr = stdout.try_clone().map_err(spawn_err)?;

        let mut cmd = match spec.container_name {
            Some(container) => docker::docker_exec_command(
                container,
                self.engine_binary.to_string_lossy().as_ref(),
                spec.jobid,
                spec.from_step,
                spec.to_step,
            ),
            None => {
                let mut cmd = Command::new(&self.engine_binary);
                cmd.args([
                    "run",
                    "--job",
                    &spec.jobid.to_string(),
                    "--from",
                    spec.from_step,
                    "--to",
                    spec.to_step,
                ]);
                cmd
            }
        };
        cmd.current_dir(spec.cwd)
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr));

        let child = cmd.spawn().map_err(spawn_err)?;
        Ok(Box::new(StdChild(child)))
    }
}

/// Deterministic in-memory spawner for tests: every job "completes"
/// the moment the supervisor first polls it, with an exit code the
/// test controls per jobid (default: success). Mirrors the
/// `FakeDriver`/`FakeFetcher` pattern in `wdb-adapters`.
#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    pub struct RecordedSpawn {
        pub jobid: usize,
        pub from_step: String,
        pub to_step: String,
        pub container_name: Option<String>,
    }

    pub struct FakeSpawner {
        exit_codes: Mutex<HashMap<usize, i32>>,
        hangs: Mutex<HashSet<usize>>,
        killed: Arc<Mutex<Vec<usize>>>,
        pub spawned: Mutex<Vec<RecordedSpawn>>,
    }

    impl FakeSpawner {
        pub fn new() -> Self {
            Self {
                exit_codes: Mutex::new(HashMap::new()),
                hangs: Mutex::new(HashSet::new()),
                killed: Arc::new(Mutex::new(Vec::new())),
                spawned: Mutex::new(Vec::new()),
            }
        }

        pub fn set_exit_code(&self, jobid: usize, code: i32) {
            self.exit_codes.lock().insert(jobid, code);
        }

        /// Marks a job as never finishing on its own, so it stays in
        /// `JobRunner::running` until something kills it — used to
        /// exercise kill-on-drop cleanup.
        pub fn set_hangs(&self, jobid: usize) {
            self.hangs.lock().insert(jobid);
        }

        /// Jobids that have had `kill()` called on their child, in order.
        pub fn killed(&self) -> Vec<usize> {
            self.killed.lock().clone()
        }
    }

    impl Default for FakeSpawner {
        fn default() -> Self {
            Self::new()
        }
    }

    struct FakeChild {
        jobid: usize,
        code: i32,
        hangs: bool,
        killed: Arc<Mutex<Vec<usize>>>,
    }

    impl SpawnedChild for FakeChild {
        fn pid(&self) -> u32 {
            1
        }

        fn try_wait(&mut self) -> std::io::Result<Option<i32>> {
            if self.hangs {
                Ok(None)
            } else {
                Ok(Some(self.code))
            }
        }

        fn kill(&mut self) {
            self.killed.lock().push(self.jobid);
            self.hangs = false;
        }
    }

    impl JobSpawner for FakeSpawner {
        fn spawn(&self, spec: &SpawnSpec<'_>) -> Result<Box<dyn SpawnedChild>, RunnerError> {
            self.spawned.lock().push(RecordedSpawn {
                jobid: spec.jobid,
                from_step: spec.from_step.to_string(),
                to_step: spec.to_step.to_string(),
                container_name: spec.container_name.map(str::to_string),
            });
            let code = self.exit_codes.lock().get(&spec.jobid).copied().unwrap_or(0);
            let hangs = self.hangs.lock().contains(&spec.jobid);
            Ok(Box::new(FakeChild {
                jobid: spec.jobid,
                code,
                hangs,
                killed: self.killed.clone(),
            }))
        }
    }

    pub fn shared() -> Arc<FakeSpawner> {
        Arc::new(FakeSpawner::new())
    }
}

#[cfg(test)]
#[path = "spawner_tests.rs"]
mod tests;
