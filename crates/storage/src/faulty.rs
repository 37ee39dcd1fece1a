// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure-injecting store wrapper for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dw_core::{Item, ItemId, Store, StoreError, TenantId, Transition};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    ListTenants,
    FetchTopDue { tenant: TenantId, limit: usize },
    MarkDelivered { id: ItemId },
}

#[derive(Default)]
struct Faults {
    fail_list: bool,
    fail_fetch: HashSet<TenantId>,
    fail_mark: HashSet<ItemId>,
    calls: Vec<StoreCall>,
}

/// Wraps a store and fails selected calls
#[derive(Clone)]
pub struct FaultyStore<S> {
    inner: S,
    faults: Arc<Mutex<Faults>>,
}

impl<S> FaultyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            faults: Arc::new(Mutex::new(Faults::default())),
        }
    }

    /// Make tenant listing fail
    pub fn fail_list(&self, fail: bool) {
        self.faults.lock().unwrap_or_else(|e| e.into_inner()).fail_list = fail;
    }

    /// Make fetches for `tenant` fail
    pub fn fail_fetch_for(&self, tenant: impl Into<TenantId>) {
        self.faults
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .fail_fetch
            .insert(tenant.into());
    }

    /// Make the transition of `id` fail
    pub fn fail_mark_for(&self, id: impl Into<ItemId>) {
        self.faults
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .fail_mark
            .insert(id.into());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.faults
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    fn record(&self, call: StoreCall) -> bool {
        let mut faults = self.faults.lock().unwrap_or_else(|e| e.into_inner());
        let fail = match &call {
            StoreCall::ListTenants => faults.fail_list,
            StoreCall::FetchTopDue { tenant, .. } => faults.fail_fetch.contains(tenant),
            StoreCall::MarkDelivered { id } => faults.fail_mark.contains(id),
        };
        faults.calls.push(call);
        fail
    }
}

#[async_trait]
impl<S: Store> Store for FaultyStore<S> {
    async fn list_tenants_with_due_items(&self) -> Result<Vec<TenantId>, StoreError> {
        if self.record(StoreCall::ListTenants) {
            return Err(StoreError::Unavailable("injected list failure".into()));
        }
        self.inner.list_tenants_with_due_items().await
    }

    async fn fetch_top_due_items(
        &self,
        tenant: &TenantId,
        limit: usize,
    ) -> Result<Vec<Item>, StoreError> {
        if self.record(StoreCall::FetchTopDue {
            tenant: tenant.clone(),
            limit,
        }) {
            return Err(StoreError::Unavailable(format!(
                "injected fetch failure for {}",
                tenant
            )));
        }
        self.inner.fetch_top_due_items(tenant, limit).await
    }

    async fn mark_delivered(
        &self,
        id: &ItemId,
        at: DateTime<Utc>,
    ) -> Result<Transition, StoreError> {
        if self.record(StoreCall::MarkDelivered { id: id.clone() }) {
            return Err(StoreError::Unavailable(format!(
                "injected transition failure for {}",
                id
            )));
        }
        self.inner.mark_delivered(id, at).await
    }
}

#[cfg(test)]
#[path = "faulty_tests.rs"]
mod tests;
