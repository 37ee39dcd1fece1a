// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake delivery executor for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{DeliveryError, DeliveryExecutor};
use async_trait::async_trait;
use dw_core::{Item, ItemId, TenantId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Barrier;

/// Recorded delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryCall {
    pub item_id: ItemId,
    pub tenant: TenantId,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<DeliveryCall>,
    failing_items: HashSet<ItemId>,
    failing_tenants: HashSet<TenantId>,
    delay: Option<Duration>,
    gate: Option<Arc<Barrier>>,
}

/// Fake delivery executor for testing
///
/// Every attempt is recorded before any configured gate, delay or failure
/// applies, so timed-out and failed attempts show up in `calls()` too.
#[derive(Clone, Default)]
pub struct FakeDeliveryExecutor {
    state: Arc<Mutex<FakeState>>,
}

impl FakeDeliveryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded delivery attempts
    pub fn calls(&self) -> Vec<DeliveryCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Attempts made for one item
    pub fn attempts_for(&self, id: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.item_id.as_str() == id)
            .count()
    }

    /// Fail every send of this item
    pub fn fail_item(&self, id: impl Into<ItemId>) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .failing_items
            .insert(id.into());
    }

    /// Fail every send for this tenant
    pub fn fail_tenant(&self, tenant: impl Into<TenantId>) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .failing_tenants
            .insert(tenant.into());
    }

    /// Stop failing anything
    pub fn heal(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.failing_items.clear();
        state.failing_tenants.clear();
    }

    /// Sleep this long inside every send
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).delay = delay;
    }

    /// Hold every send at a shared barrier before completing
    pub fn set_gate(&self, gate: Option<Arc<Barrier>>) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).gate = gate;
    }
}

#[async_trait]
impl DeliveryExecutor for FakeDeliveryExecutor {
    async fn send(&self, item: &Item) -> Result<(), DeliveryError> {
        let (gate, delay, fail) = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.calls.push(DeliveryCall {
                item_id: item.id.clone(),
                tenant: item.tenant_id.clone(),
            });
            let fail = state.failing_items.contains(&item.id)
                || state.failing_tenants.contains(&item.tenant_id);
            (state.gate.clone(), state.delay, fail)
        };

        if let Some(gate) = gate {
            gate.wait().await;
        }
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(DeliveryError::Rejected(format!(
                "injected failure for {}",
                item.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
