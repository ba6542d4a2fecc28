// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-level configuration, optionally overridden by
//! `~/.wildebeest/config.toml`. Distinct from an experiment's on-disk
//! state: this is process-wide tuning (poll cadence, default
//! parallelism, where workload folders live), not part of any
//! experiment's persisted record.

use serde::Deserialize;
use std::path::PathBuf;

/// Fields a user may override in `~/.wildebeest/config.toml`; any field
/// left unset in the file keeps [`WdbConfig::default`]'s value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WdbConfigFile {
    default_numjobs: Option<usize>,
    workloads_root: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WdbConfig {
    /// `-j` default when the flag is omitted from `wdb run`.
    pub default_numjobs: usize,
    /// Root workload folders are created under: `<root>/<workload>.workload/`.
    pub workloads_root: PathBuf,
}

impl Default for WdbConfig {
    fn default() -> Self {
        Self {
            default_numjobs: 1,
            workloads_root: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".wildebeest").join("workloads"),
        }
    }
}

impl WdbConfig {
    /// Loads defaults, then applies `~/.wildebeest/config.toml` if it
    /// exists. A missing file is not an error; a malformed one is.
    pub fn load() -> Result<Self, crate::error::CliError> {
        let mut config = Self::default();
        let Some(home) = dirs::home_dir() else {
            return Ok(config);
        };
        let path = home.join(".wildebeest").join("config.toml");
        if !path.exists() {
            return Ok(config);
        }
        let text = std::fs::read_to_string(&path).map_err(|source| crate::error::CliError::Io { path: path.clone(), source })?;
        let file: WdbConfigFile = toml::from_str(&text).map_err(|source| crate::error::CliError::Config { path: path.clone(), source })?;
        if let Some(n) = file.default_numjobs {
            config.default_numjobs = n;
        }
        if let Some(root) = file.workloads_root {
            config.workloads_root = root;
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
