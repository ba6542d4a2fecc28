// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn args(cmd: &Command) -> Vec<String> {
    cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect()
}

#[test]
fn docker_exec_command_has_expected_argument_order() {
    let cmd = docker_exec_command("wdb-abcd1234-run1-zlib-c1", "wdb", 1, "configure", "build");
    assert_eq!(cmd.get_program(), "docker");
    assert_eq!(
        args(&cmd),
        vec![
            "exec",
            "wdb-abcd1234-run1-zlib-c1",
            "wdb",
            "run",
            "--job",
            "1",
            "--from",
            "configure",
            "--to",
            "build",
        ]
    );
}

#[test]
fn docker_run_command_includes_extra_args() {
    let cmd = docker_run_command("wdb-abcd1234-run1-zlib-c1", "ubuntu:22.04", &["-v", "/host:/container"]);
    assert_eq!(cmd.get_program(), "docker");
    assert_eq!(
        args(&cmd),
        vec![
            "run",
            "-td",
            "--name",
            "wdb-abcd1234-run1-zlib-c1",
            "ubuntu:22.04",
            "-v",
            "/host:/container",
        ]
    );
}

#[test]
fn docker_rm_command_forces_removal() {
    let cmd = docker_rm_command("wdb-abcd1234-run1-zlib-c1");
    assert_eq!(args(&cmd), vec!["rm", "-f", "wdb-abcd1234-run1-zlib-c1"]);
}
