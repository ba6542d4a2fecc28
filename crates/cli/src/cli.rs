// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument parsing for the `wdb` CLI surface (spec §6).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "wdb",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH")),
    about = "Run and manage wildebeest experiments",
    styles = crate::color::styles()
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Instantiate a registered experiment; fails if `folder` already exists.
    Create {
        /// Registered experiment type (the `experiments` registry key).
        exp_name: String,
        /// Destination folder (default: `./<exp_name>`).
        folder: Option<PathBuf>,
        /// Registered project-list name to build against.
        #[arg(short = 'l', long)]
        list: Option<String>,
        /// One or more registered recipe names (repeatable); combines
        /// with `-l` if both are given.
        #[arg(short = 'r', long = "recipe")]
        recipes: Vec<String>,
        /// Experiment parameter `key=value` (repeatable).
        #[arg(short = 'p', long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },

    /// Execute the experiment (or a subset of its runs) in `.`.
    Run {
        /// Run-number spec, e.g. `"1,3-5,8"`. Omit to run every run.
        runs: Option<String>,
        /// Number of runs to execute in parallel.
        #[arg(short = 'j', long)]
        numjobs: Option<usize>,
        /// Override each run's build parallelism.
        #[arg(short = 'b', long)]
        buildjobs: Option<u32>,
        /// Regenerate the run matrix even if runs already exist.
        #[arg(short = 'f', long)]
        force: bool,
        /// Child-bootstrap entry point: execute only Job K in-process.
        #[arg(long)]
        job: Option<usize>,
        /// Step to start Job K's range at (required with `--job`).
        #[arg(long)]
        from: Option<String>,
        /// Step to end Job K's range at (required with `--job`).
        #[arg(long)]
        to: Option<String>,
        /// Skip the experiment's pre-steps.
        #[arg(long)]
        no_pre: bool,
        /// Skip the experiment's post-steps.
        #[arg(long)]
        no_post: bool,
        /// Run every job step inline in this process instead of
        /// spawning a child/container; no external toolchain required.
        #[arg(long)]
        debug: bool,
    },

    /// List registry contents or the current experiment's algorithm steps.
    Ls {
        target: LsTarget,
        /// Restrict `recipes` to members of this registered project list.
        #[arg(short = 'l', long)]
        list: Option<String>,
        /// Show extended detail (step params/docker polarity for `alg`).
        #[arg(short = 'a', long)]
        all: bool,
    },

    /// Show algorithm, runconfigs, project list, and run count for `.`.
    Info,

    /// Per-run status table with color coding for `.`.
    Status,

    /// Per-run, per-step runtime table for `.`.
    Runtimes,

    /// Aggregate status across every experiment folder under `parent_folder`.
    Dashboard { parent_folder: PathBuf },

    /// Kill one job, or the whole experiment's running jobs with `-f`.
    Kill {
        #[arg(long)]
        job: Option<usize>,
        #[arg(short = 'f', long)]
        force: bool,
    },

    /// Dump a run's Job logfile with error lines highlighted.
    Log { run_number: usize },

    /// Delete the experiment's build folder (and, with `-f`, skip confirmation).
    Rm {
        #[command(subcommand)]
        what: RmTarget,
    },

    /// Start/restart a run's container and attach an interactive shell.
    DockerShell { run_number: usize },

    /// Run a build-system clean across every run in `.`.
    Clean,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LsTarget {
    Lists,
    Recipes,
    Exps,
    Alg,
}

#[derive(Subcommand)]
pub enum RmTarget {
    /// Delete `build/`, optionally `source/` too.
    Build {
        #[arg(short = 'f', long)]
        force: bool,
        /// Also delete the cloned source tree.
        #[arg(long)]
        destroy_repo: bool,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (k, v) = s.split_once('=').ok_or_else(|| format!("invalid param {s:?}: expected key=value"))?;
    Ok((k.to_string(), v.to_string()))
}
