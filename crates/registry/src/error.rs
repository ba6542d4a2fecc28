// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no {kind} registered under {name:?}")]
    NotFound { kind: &'static str, name: String },
    #[error("{kind} {name:?} is already registered")]
    DuplicateKey { kind: &'static str, name: String },
}
