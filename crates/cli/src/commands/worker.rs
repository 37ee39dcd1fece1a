// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dw worker` - Trigger ticks on a timer until interrupted

use super::{build_scheduler, load_config, open_store, TuneArgs};
use crate::Env;
use anyhow::Result;
use clap::Args;
use dw_engine::{CancellationToken, TickContext};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

#[derive(Args)]
pub struct WorkerArgs {
    #[command(flatten)]
    tune: TuneArgs,

    /// Period between ticks (e.g. "5m"); overrides `tick_interval`
    #[arg(long, value_parser = humantime::parse_duration)]
    interval: Option<Duration>,

    /// Run a single tick and exit (for testing)
    #[arg(long)]
    once: bool,
}

pub async fn handle(args: WorkerArgs, env: &Env) -> Result<()> {
    let config = load_config(env, &args.tune)?;
    let period = args.interval.unwrap_or(config.tick_interval);
    if period.is_zero() {
        anyhow::bail!("interval must be greater than zero");
    }

    let shutdown = CancellationToken::new();
    let on_interrupt = shutdown.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nShutting down worker...");
        on_interrupt.cancel();
    })?;

    tracing::info!(
        state = %env.state.display(),
        interval = %humantime::format_duration(period),
        workers = config.workers,
        "starting worker"
    );
    let scheduler = build_scheduler(open_store(env)?, config);

    // Ticks that overrun the period are not replayed in a burst
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = timer.tick() => {}
        }

        // The in-flight tick observes Ctrl-C through a child token
        let ctx = TickContext::with_cancel(shutdown.child_token());
        if let Err(e) = scheduler.run_tick(&ctx).await {
            tracing::error!(error = %e, "tick failed");
        }

        if args.once || shutdown.is_cancelled() {
            break;
        }
    }

    tracing::info!("worker stopped");
    Ok(())
}
