//! Behavioral specifications for the `wdb` CLI.
//!
//! These tests are black-box: they invoke the `wdb` binary and verify
//! stdout, stderr, exit codes, and on-disk state. See `specs/prelude.rs`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/create.rs"]
mod create;
#[path = "specs/run.rs"]
mod run;
#[path = "specs/ls_info.rs"]
mod ls_info;
#[path = "specs/status_runtimes.rs"]
mod status_runtimes;
#[path = "specs/kill_log.rs"]
mod kill_log;
#[path = "specs/rm_clean.rs"]
mod rm_clean;
#[path = "specs/dashboard.rs"]
mod dashboard;
