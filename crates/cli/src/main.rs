// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! dw - Dropwise delivery scheduler CLI

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{item, tick, worker};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dw",
    version,
    about = "Dropwise - fair per-tenant delivery of due items"
)]
struct Cli {
    /// Item log backing the store
    #[arg(
        long,
        global = true,
        env = "DW_STATE",
        default_value = ".dropwise/items.wal"
    )]
    state: PathBuf,

    /// Scheduler configuration (TOML); defaults apply when absent
    #[arg(long, global = true, env = "DW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one delivery tick
    Tick(tick::TickArgs),
    /// Run ticks on a timer until interrupted
    Worker(worker::WorkerArgs),
    /// Enqueue a pending item
    Add(item::AddArgs),
    /// List items in selection order
    List(item::ListArgs),
    /// Archive an item so it is never selected
    Archive(item::IdArgs),
    /// Defer an item until it is restored
    Defer(item::IdArgs),
    /// Make an item pending again
    Restore(item::IdArgs),
}

/// Paths shared by every command
pub struct Env {
    pub state: PathBuf,
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let env = Env {
        state: cli.state,
        config: cli.config,
    };

    match cli.command {
        Commands::Tick(args) => tick::handle(args, &env).await,
        Commands::Worker(args) => worker::handle(args, &env).await,
        Commands::Add(args) => item::add(args, &env),
        Commands::List(args) => item::list(args, &env),
        Commands::Archive(args) => item::archive(args, &env),
        Commands::Defer(args) => item::defer(args, &env),
        Commands::Restore(args) => item::restore(args, &env),
    }
}

/// Logs go to stderr so `-o json` output stays parseable
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
