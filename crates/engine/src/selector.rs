// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tenant universe for one tick

use dw_core::{Store, StoreError, TenantId};

/// Produces the ordered set of tenants that currently hold a due item
#[derive(Clone)]
pub struct TenantSelector<S> {
    store: S,
}

impl<S: Store> TenantSelector<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Distinct tenants with at least one pending item, ascending by id
    ///
    /// The store's answer is sorted and deduplicated again so repeated calls
    /// over unchanged data are identical whatever the backend returns.
    pub async fn list_tenants_with_due_items(&self) -> Result<Vec<TenantId>, StoreError> {
        let mut tenants = self.store.list_tenants_with_due_items().await?;
        tenants.sort();
        tenants.dedup();
        Ok(tenants)
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
