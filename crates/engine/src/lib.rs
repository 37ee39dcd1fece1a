// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Dropwise delivery scheduler

mod context;
mod error;
mod fetcher;
mod report;
mod scheduler;
mod selector;
mod transition;

pub use context::TickContext;
pub use error::{TenantError, TenantFailure, TickError};
pub use fetcher::DueItemFetcher;
pub use report::TickReport;
pub use scheduler::Scheduler;
pub use selector::TenantSelector;
pub use transition::StateTransitioner;
pub use tokio_util::sync::CancellationToken;
