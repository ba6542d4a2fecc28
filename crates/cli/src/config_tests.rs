// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn default_numjobs_is_one() {
    assert_eq!(WdbConfig::default().default_numjobs, 1);
}

#[test]
fn default_workloads_root_ends_in_wildebeest_workloads() {
    let config = WdbConfig::default();
    assert!(config.workloads_root.ends_with("workloads"));
    assert!(config.workloads_root.parent().unwrap().ends_with(".wildebeest"));
}
