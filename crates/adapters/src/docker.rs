// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure command construction for the docker-exec dispatch path. Building
//! the `std::process::Command` here (rather than inline in `wdb-engine`)
//! keeps the exact argument order testable without actually shelling out
//! to `docker`.

use std::process::Command;

/// `docker run -td --name <container_name> <image> ...`, the command a
/// `docker_init` algorithm step shells out to when creating a run's
/// dedicated container.
pub fn docker_run_command(container_name: &str, image: &str, extra_args: &[&str]) -> Command {
    let mut cmd = Command::new("docker");
    cmd.args(["run", "-td", "--name", container_name, image]);
    cmd.args(extra_args);
    cmd
}

/// `docker exec <container_name> <engine_binary> run --job <jobid> --from <from_step> --to <to_step>`.
pub fn docker_exec_command(
    container_name: &str,
    engine_binary: &str,
    jobid: usize,
    from_step: &str,
    to_step: &str,
) -> Command {
    let mut cmd = Command::new("docker");
    cmd.args(["exec", container_name, engine_binary, "run"]);
    cmd.args(["--job", &jobid.to_string()]);
    cmd.args(["--from", from_step, "--to", to_step]);
    cmd
}

/// `docker rm -f <container_name>`, used by the `docker_cleanup` step.
pub fn docker_rm_command(container_name: &str) -> Command {
    let mut cmd = Command::new("docker");
    cmd.args(["rm", "-f", container_name]);
    cmd
}

#[cfg(test)]
#[path = "docker_tests.rs"]
mod tests;
