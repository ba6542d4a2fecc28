// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde::Deserialize;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Sample {
    name: String,
    count: u32,
}

#[test]
fn save_then_load_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("sample.yaml");
    let sample = Sample {
        name: "run1".to_string(),
        count: 3,
    };

    StateStore::save(&sample, &path).unwrap();
    let loaded: Sample = StateStore::load(&path).unwrap();

    assert_eq!(loaded, sample);
}

#[test]
fn save_creates_missing_parent_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested/dir/sample.yaml");
    let sample = Sample {
        name: "run1".to_string(),
        count: 1,
    };

    StateStore::save(&sample, &path).unwrap();

    assert!(path.exists());
}

#[test]
fn load_missing_file_returns_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("missing.yaml");

    let err = StateStore::load::<Sample>(&path).unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[test]
fn load_malformed_file_returns_decode_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("bad.yaml");
    fs::write(&path, b"not: [valid yaml for Sample").unwrap();

    let err = StateStore::load::<Sample>(&path).unwrap_err();
    assert!(matches!(err, StorageError::Decode { .. }));
}

#[test]
fn save_never_leaves_a_stray_tmp_file_behind() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("sample.yaml");
    let sample = Sample {
        name: "run1".to_string(),
        count: 1,
    };

    StateStore::save(&sample, &path).unwrap();

    let entries: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn rebase_path_substitutes_prefix() {
    let path = Path::new("/old/exp/source/zlib");
    let rebased = rebase_path(path, Path::new("/old/exp"), Path::new("/new/exp"));
    assert_eq!(rebased, PathBuf::from("/new/exp/source/zlib"));
}

#[test]
fn rebase_path_leaves_unrelated_path_unchanged() {
    let path = Path::new("/elsewhere/file");
    let rebased = rebase_path(path, Path::new("/old/exp"), Path::new("/new/exp"));
    assert_eq!(rebased, path);
}
