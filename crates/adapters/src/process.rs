// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process spawning, a shared `run_command` helper used by the driver
//! and VCS adapters, and Linux `/proc`-based kill-tree support.
//!
//! There is no `psutil`-equivalent process-tree helper in the crates
//! the pack surfaces, so descendant discovery is hand-rolled from a
//! `/proc` walk; this mirrors the original's own Linux-only assumption
//! and pairs with `nix` (already a dependency for signal delivery) for
//! the actual kill.

use crate::error::AdapterError;
use std::path::Path;
use std::process::Command;
use tracing::warn;

/// Runs `program` with `args` in `cwd`, waiting for completion. Any
/// non-zero exit or spawn failure becomes an [`AdapterError`], which
/// callers convert into a `StepError` at the step boundary.
pub fn run_command(program: &str, args: &[&str], cwd: &Path) -> Result<(), AdapterError> {
    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .map_err(|e| AdapterError::Spawn {
            program: program.to_string(),
            cwd: cwd.to_path_buf(),
            source: e,
        })?;

    if !status.success() {
        return Err(AdapterError::NonZeroExit {
            program: program.to_string(),
            cwd: cwd.to_path_buf(),
            code: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}

/// Direct children of `pid`, discovered by scanning `/proc/*/stat`.
#[cfg(target_os = "linux")]
pub fn children_of(pid: i32) -> std::io::Result<Vec<i32>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir("/proc")?.flatten() {
        let Some(candidate_pid) = entry
            .file_name()
            .to_str()
            .and_then(|s| s.parse::<i32>().ok())
        else {
            continue;
        };
        let stat_path = entry.path().join("stat");
        let Ok(stat) = std::fs::read_to_string(&stat_path) else {
            continue;
        };
        if parse_ppid(&stat) == Some(pid) {
            out.push(candidate_pid);
        }
    }
    Ok(out)
}

#[cfg(target_os = "linux")]
fn parse_ppid(stat: &str) -> Option<i32> {
    // Format: "<pid> (<comm>) <state> <ppid> ...". The comm field may
    // itself contain spaces or parens, so split on the last ')'.
    let after_comm = stat.rfind(')')? + 2;
    stat.get(after_comm..)?.split_whitespace().nth(1)?.parse().ok()
}

/// All descendants of `pid` (not including `pid` itself), deepest-first
/// so a caller can kill leaves before their parents.
#[cfg(target_os = "linux")]
pub fn descendants_deepest_first(pid: i32) -> std::io::Result<Vec<i32>> {
    let mut all = Vec::new();
    let mut frontier = vec![pid];
    while let Some(p) = frontier.pop() {
        let children = children_of(p)?;
        for child in children {
            all.push(child);
            frontier.push(child);
        }
    }
    all.reverse();
    Ok(all)
}

/// Kills `pid` and every descendant, descendants first. Tolerates
/// processes that are already gone.
#[cfg(target_os = "linux")]
pub fn kill_tree(pid: i32) -> std::io::Result<()> {
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    let descendants = descendants_deepest_first(pid).unwrap_or_default();
    for p in descendants.into_iter().chain(std::iter::once(pid)) {
        if let Err(err) = signal::kill(Pid::from_raw(p), Signal::SIGKILL) {
            if err != nix::errno::Errno::ESRCH {
                warn!(pid = p, %err, "failed to kill process in tree");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
