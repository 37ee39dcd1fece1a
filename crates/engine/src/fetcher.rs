// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-tenant due item lookup

use dw_core::{Item, Store, StoreError, TenantId};

/// Retrieves the next item a tenant should receive
#[derive(Clone)]
pub struct DueItemFetcher<S> {
    store: S,
}

impl<S: Store> DueItemFetcher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The tenant's highest-priority pending item, oldest first on ties
    ///
    /// `None` is normal: another run may have consumed the item since the
    /// tenant was listed, or an external mutator archived or deferred it.
    pub async fn fetch_top_due_item(&self, tenant: &TenantId) -> Result<Option<Item>, StoreError> {
        let items = self.store.fetch_top_due_items(tenant, 1).await?;
        Ok(items
            .into_iter()
            .filter(|item| item.is_due() && &item.tenant_id == tenant)
            .min_by(Item::selection_order))
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
