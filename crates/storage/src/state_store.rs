// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crash-safe serialization of entity records to per-entity YAML files.
//!
//! Each entity type has one canonical file. Writes go through a temp
//! file in the same directory followed by a rename, so a concurrent
//! reader (a status dashboard, say) never observes a torn write —
//! unconditionally, not just on a hot path.

use crate::error::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct StateStore;

impl StateStore {
    /// Serializes `entity` to YAML and atomically writes it to `path`,
    /// creating parent directories as needed.
    pub fn save<T: Serialize>(entity: &T, path: &Path) -> Result<(), StorageError> {
        let yaml = serde_yaml::to_string(entity).map_err(|e| StorageError::encode(path, e))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        atomic_write(path, yaml.as_bytes())?;
        debug!(path = %path.display(), "saved state");
        Ok(())
    }

    /// Loads and decodes the record at `path`.
    pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
        if !path.exists() {
            return Err(StorageError::NotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
        let entity = serde_yaml::from_str(&text).map_err(|e| StorageError::decode(path, e))?;
        debug!(path = %path.display(), "loaded state");
        Ok(entity)
    }

    pub fn exists(path: &Path) -> bool {
        path.exists()
    }
}

/// Writes `contents` to a temp file beside `path`, then renames it into
/// place. The rename is atomic on the same filesystem, so a reader
/// always sees either the old file or the fully-written new one.
fn atomic_write(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp_name = format!(
        ".{}.tmp",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("state")
    );
    let tmp_path = parent.join(tmp_name);

    {
        let mut f = fs::File::create(&tmp_path).map_err(|e| StorageError::io(&tmp_path, e))?;
        f.write_all(contents).map_err(|e| StorageError::io(&tmp_path, e))?;
        f.sync_all().map_err(|e| StorageError::io(&tmp_path, e))?;
    }
    fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e))?;
    Ok(())
}

/// Rewrites every path inside an entity that is prefixed by `old_root`
/// to be prefixed by `new_root` instead. The entity-specific rebase
/// logic lives on the entity itself (`wdb_core::Run::rebase`,
/// `Experiment::rebase`); this is just the shared path substitution
/// primitive they build on.
pub fn rebase_path(path: &Path, old_root: &Path, new_root: &Path) -> PathBuf {
    match path.strip_prefix(old_root) {
        Ok(rest) => new_root.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "state_store_tests.rs"]
mod tests;
