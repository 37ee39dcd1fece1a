// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced wrappers for consistent observability

use crate::delivery::{DeliveryError, DeliveryExecutor};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dw_core::{Item, ItemId, Store, StoreError, TenantId, Transition};
use tracing::Instrument;

/// Wrapper that adds tracing to any DeliveryExecutor
#[derive(Clone)]
pub struct TracedDeliveryExecutor<D> {
    inner: D,
}

impl<D> TracedDeliveryExecutor<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<D: DeliveryExecutor> DeliveryExecutor for TracedDeliveryExecutor<D> {
    async fn send(&self, item: &Item) -> Result<(), DeliveryError> {
        let span = tracing::info_span!(
            "delivery.send",
            tenant = %item.tenant_id,
            item = %item.id
        );

        async {
            tracing::debug!(priority = item.priority, "sending");

            let start = std::time::Instant::now();
            let result = self.inner.send(item).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "sent"),
                Err(e) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "send failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any Store
#[derive(Clone)]
pub struct TracedStore<S> {
    inner: S,
}

impl<S> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: Store> Store for TracedStore<S> {
    async fn list_tenants_with_due_items(&self) -> Result<Vec<TenantId>, StoreError> {
        let start = std::time::Instant::now();
        let result = self.inner.list_tenants_with_due_items().await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(tenants) => tracing::debug!(count = tenants.len(), elapsed_ms, "listed tenants"),
            Err(e) => tracing::error!(elapsed_ms, error = %e, "tenant listing failed"),
        }

        result
    }

    async fn fetch_top_due_items(
        &self,
        tenant: &TenantId,
        limit: usize,
    ) -> Result<Vec<Item>, StoreError> {
        let result = self.inner.fetch_top_due_items(tenant, limit).await;
        match &result {
            Ok(items) => tracing::trace!(%tenant, limit, count = items.len(), "fetched due items"),
            Err(e) => tracing::warn!(%tenant, error = %e, "fetch failed"),
        }
        result
    }

    async fn mark_delivered(
        &self,
        id: &ItemId,
        at: DateTime<Utc>,
    ) -> Result<Transition, StoreError> {
        let span = tracing::info_span!("store.mark_delivered", item = %id);

        async {
            let result = self.inner.mark_delivered(id, at).await;
            match &result {
                Ok(Transition::Delivered(item)) => tracing::debug!(
                    delivery_count = item.delivery_count,
                    "transition committed"
                ),
                // Expected when ticks overlap
                Ok(Transition::Conflict) => tracing::debug!("transition conflict"),
                Err(e) => tracing::warn!(error = %e, "transition failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
