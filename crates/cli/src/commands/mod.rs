// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod item;
pub mod tick;
pub mod worker;

use crate::Env;
use anyhow::{Context, Result};
use dw_adapters::{LogDeliveryExecutor, TracedDeliveryExecutor, TracedStore};
use dw_core::{SchedulerConfig, SystemClock};
use dw_engine::Scheduler;
use dw_storage::StateStore;
use std::time::Duration;

pub type CliScheduler =
    Scheduler<TracedStore<StateStore>, TracedDeliveryExecutor<LogDeliveryExecutor>, SystemClock>;

/// Command-line overrides for the scheduler configuration
#[derive(clap::Args)]
pub struct TuneArgs {
    /// Tenants processed concurrently
    #[arg(long)]
    workers: Option<usize>,

    /// Upper bound on one delivery attempt (e.g. "30s")
    #[arg(long, value_parser = humantime::parse_duration)]
    delivery_timeout: Option<Duration>,

    /// Upper bound on a whole tick (e.g. "5m")
    #[arg(long, value_parser = humantime::parse_duration)]
    deadline: Option<Duration>,
}

pub fn open_store(env: &Env) -> Result<StateStore> {
    StateStore::open(&env.state)
        .with_context(|| format!("failed to open item log {}", env.state.display()))
}

pub fn load_config(env: &Env, tune: &TuneArgs) -> Result<SchedulerConfig> {
    let mut config = match &env.config {
        Some(path) => SchedulerConfig::load(path)?,
        None => SchedulerConfig::default(),
    };
    if let Some(workers) = tune.workers {
        config = config.with_workers(workers);
    }
    if let Some(timeout) = tune.delivery_timeout {
        config = config.with_delivery_timeout(timeout);
    }
    if tune.deadline.is_some() {
        config = config.with_tick_deadline(tune.deadline);
    }
    config.validate()?;
    Ok(config)
}

pub fn build_scheduler(store: StateStore, config: SchedulerConfig) -> CliScheduler {
    Scheduler::new(
        TracedStore::new(store),
        TracedDeliveryExecutor::new(LogDeliveryExecutor::new()),
        SystemClock,
        config,
    )
}
