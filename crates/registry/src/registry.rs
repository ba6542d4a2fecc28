// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A plain, explicitly-constructed name → value map.
//!
//! Replaces the original's `importlib.metadata.entry_points()` plugin
//! discovery and its accompanying global, lazily-initialized singleton
//! repositories (spec §9: "Model as an explicitly-constructed application
//! context passed to the engine; lazy singletons are an anti-pattern for
//! testability"). Each plugin crate registers into an `AppContext` at
//! startup instead of being discovered via package metadata; a lookup
//! miss is always a clear, typed error, never a silent no-op.

use crate::error::RegistryError;
use std::collections::HashMap;

pub struct Registry<T> {
    kind: &'static str,
    entries: HashMap<String, T>,
}

impl<T> Registry<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, value: T) -> Result<(), RegistryError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(RegistryError::DuplicateKey {
                kind: self.kind,
                name,
            });
        }
        self.entries.insert(name, value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&T, RegistryError> {
        self.entries.get(name).ok_or_else(|| RegistryError::NotFound {
            kind: self.kind,
            name: name.to_string(),
        })
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
