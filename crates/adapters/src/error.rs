// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("failed to spawn {program:?} in {cwd}: {source}")]
    Spawn {
        program: String,
        cwd: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{program:?} exited with status {code} in {cwd}")]
    NonZeroExit { program: String, cwd: PathBuf, code: i32 },
}
