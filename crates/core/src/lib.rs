// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dw-core: Core types for the Dropwise delivery worker
//!
//! This crate provides:
//! - Clock and id abstractions for deterministic tests
//! - The `Item` model and its per-tenant selection order
//! - The `Store` trait the scheduler consumes
//! - Scheduler configuration

pub mod clock;
pub mod config;
pub mod id;
pub mod item;
pub mod operation;
pub mod store;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, SchedulerConfig};
pub use id::{IdGen, ItemId, TenantId, UuidIdGen};
pub use item::{Item, ItemStatus, DEFAULT_PRIORITY};
pub use operation::Operation;
pub use store::{Store, StoreError, Transition};
