// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wdb` — the wildebeest experiment-harness CLI. Parses arguments,
//! builds the application context, and dispatches to one `commands::*`
//! handler per subcommand; `--job K` re-enters here as the child
//! bootstrap spawned by the job runner (spec §4.6).

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wdb_cli::cli::{Cli, Command};
use wdb_cli::config::WdbConfig;
use wdb_cli::error::CliError;
use wdb_cli::{builtins, commands};

fn main() {
    setup_logging();

    if let Err(err) = run() {
        eprintln!("{} {err}", wdb_cli::color::status("failed"));
        std::process::exit(err.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let config = WdbConfig::load()?;
    let ctx = builtins::build_context();
    let cli = Cli::parse();

    match cli.command {
        Command::Create {
            exp_name,
            folder,
            list,
            recipes,
            params,
        } => commands::create::handle(&ctx, &exp_name, folder, list, recipes, params),

        Command::Run {
            runs,
            numjobs,
            buildjobs,
            force,
            job,
            from,
            to,
            no_pre,
            no_post,
            debug,
        } => commands::run::handle(&ctx, &config, runs, numjobs, buildjobs, force, job, from, to, no_pre, no_post, debug),

        Command::Ls { target, list, all } => commands::ls::handle(&ctx, target, list, all),

        Command::Info => commands::info::handle(&ctx),

        Command::Status => commands::status::handle(&ctx),

        Command::Runtimes => commands::runtimes::handle(&ctx),

        Command::Dashboard { parent_folder } => commands::dashboard::handle(&parent_folder),

        Command::Kill { job, force } => commands::kill::handle(&ctx, &config, job, force),

        Command::Log { run_number } => commands::log::handle(&ctx, &config, run_number),

        Command::Rm { what } => match what {
            wdb_cli::cli::RmTarget::Build { force, destroy_repo } => commands::rm::handle_build(force, destroy_repo),
        },

        Command::DockerShell { run_number } => commands::docker_shell::handle(&ctx, run_number),

        Command::Clean => commands::clean::handle(&ctx),
    }
}

/// `RUST_LOG`-driven filter (default `info`), written to stderr so
/// `stdout` stays clean for piping (tables, `ls`/`status` output).
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
