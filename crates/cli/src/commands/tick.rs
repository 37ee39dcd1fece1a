// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dw tick` - Run one delivery tick

use super::{build_scheduler, load_config, open_store, TuneArgs};
use crate::output::{self, OutputFormat, ReportView};
use crate::Env;
use anyhow::Result;
use clap::Args;
use dw_engine::{CancellationToken, TickContext};

#[derive(Args)]
pub struct TickArgs {
    #[command(flatten)]
    tune: TuneArgs,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t)]
    output: OutputFormat,
}

pub async fn handle(args: TickArgs, env: &Env) -> Result<()> {
    let config = load_config(env, &args.tune)?;
    let scheduler = build_scheduler(open_store(env)?, config);

    // Ctrl-C stops the tick between tenants; committed deliveries stay committed
    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    ctrlc::set_handler(move || on_interrupt.cancel())?;

    let report = scheduler.run_tick(&TickContext::with_cancel(token)).await?;
    output::print(&ReportView(&report), args.output);
    Ok(())
}
