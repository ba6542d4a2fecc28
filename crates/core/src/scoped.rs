// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped resource guards, replacing the original's `cd`/`env`
//! context-manager decorators. Each guard restores prior state on every
//! exit path, including unwinding.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Changes the process's current directory for the lifetime of the guard,
/// restoring the previous directory on drop.
///
/// The current directory is process-global state; holding two `ScopedDir`
/// guards from different threads at once will race. The engine only ever
/// opens one per in-process step execution, matching the original's
/// single-threaded-per-child assumption (see `wdb-engine`'s `StepExecutor`).
pub struct ScopedDir {
    previous: PathBuf,
}

impl ScopedDir {
    pub fn enter(path: impl AsRef<Path>) -> io::Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(path.as_ref())?;
        Ok(Self { previous })
    }
}

impl Drop for ScopedDir {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.previous);
    }
}

/// Sets a batch of environment variables for the lifetime of the guard,
/// restoring (or unsetting) each one on drop.
pub struct ScopedEnv {
    saved: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    pub fn set<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut saved = Vec::new();
        for (k, v) in vars {
            let k = k.into();
            let v = v.into();
            saved.push((k.clone(), env::var(&k).ok()));
            env::set_var(&k, &v);
        }
        Self { saved }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.saved.drain(..) {
            match v {
                Some(v) => env::set_var(&k, v),
                None => env::remove_var(&k),
            }
        }
    }
}

#[cfg(test)]
#[path = "scoped_tests.rs"]
mod tests;
