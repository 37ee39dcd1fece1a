// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery executors
//!
//! A delivery is the side effect the scheduler performs for one due item. It
//! is not transactionally linked to the store, so callers must expect the
//! same item to be sent more than once.

mod log;

pub use self::log::LogDeliveryExecutor;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{DeliveryCall, FakeDeliveryExecutor};

use async_trait::async_trait;
use dw_core::Item;
use thiserror::Error;

/// Errors from delivery attempts
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// The channel refused this item; retrying later may still succeed
    #[error("delivery rejected: {0}")]
    Rejected(String),
    #[error("delivery channel unavailable: {0}")]
    Unavailable(String),
}

/// Performs the side-effecting send for one item
#[async_trait]
pub trait DeliveryExecutor: Clone + Send + Sync + 'static {
    async fn send(&self, item: &Item) -> Result<(), DeliveryError>;
}
