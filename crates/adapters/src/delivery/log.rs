// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulated delivery that only emits a log event

use super::{DeliveryError, DeliveryExecutor};
use async_trait::async_trait;
use dw_core::Item;

/// Delivery executor that reports each send through `tracing`
///
/// Stands in for a real notification channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDeliveryExecutor;

impl LogDeliveryExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeliveryExecutor for LogDeliveryExecutor {
    async fn send(&self, item: &Item) -> Result<(), DeliveryError> {
        tracing::info!(
            tenant = %item.tenant_id,
            item = %item.id,
            topic = %item.topic,
            url = %item.url,
            priority = item.priority,
            attempt = item.delivery_count + 1,
            "delivering item (simulated)"
        );
        Ok(())
    }
}
