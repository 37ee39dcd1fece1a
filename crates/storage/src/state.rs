// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized item state from WAL replay

use dw_core::{Item, ItemId, ItemStatus, Operation, TenantId};
use std::collections::{BTreeSet, HashMap};

/// Materialized state built from WAL operations
#[derive(Debug, Default, Clone)]
pub struct MaterializedState {
    pub items: HashMap<ItemId, Item>,
}

impl MaterializedState {
    /// Rebuild state by applying operations in order
    pub fn from_operations<'a>(ops: impl IntoIterator<Item = &'a Operation>) -> Self {
        let mut state = Self::default();
        for op in ops {
            state.apply(op);
        }
        state
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Distinct tenants owning a pending item, ascending
    pub fn tenants_with_due_items(&self) -> Vec<TenantId> {
        self.items
            .values()
            .filter(|item| item.is_due())
            .map(|item| item.tenant_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Pending items of one tenant in selection order, at most `limit`
    pub fn top_due_items(&self, tenant: &TenantId, limit: usize) -> Vec<Item> {
        let mut due: Vec<Item> = self
            .items
            .values()
            .filter(|item| item.is_due() && &item.tenant_id == tenant)
            .cloned()
            .collect();
        due.sort_by(Item::selection_order);
        due.truncate(limit);
        due
    }

    /// All items, grouped by tenant and in selection order within each tenant
    pub fn sorted_items(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.items.values().cloned().collect();
        items.sort_by(|a, b| {
            a.tenant_id
                .cmp(&b.tenant_id)
                .then_with(|| Item::selection_order(a, b))
        });
        items
    }

    /// Whether `op` would change state if applied now
    pub fn accepts(&self, op: &Operation) -> bool {
        match op {
            Operation::ItemCreate { item } => !self.items.contains_key(&item.id),
            Operation::ItemDelivered { id, .. } => self.get(id).is_some_and(Item::is_due),
            Operation::ItemStatusSet { id, status } => {
                *status != ItemStatus::Delivered && self.items.contains_key(id)
            }
        }
    }

    /// Apply an operation to update the state
    ///
    /// Operations that are not accepted are ignored, so replaying a log is
    /// deterministic even if it contains stale entries.
    pub fn apply(&mut self, op: &Operation) {
        if !self.accepts(op) {
            return;
        }

        match op {
            Operation::ItemCreate { item } => {
                self.items.insert(item.id.clone(), item.clone());
            }

            Operation::ItemDelivered { id, at } => {
                if let Some(item) = self.items.get_mut(id) {
                    *item = item.delivered_at(*at);
                }
            }

            Operation::ItemStatusSet { id, status } => {
                if let Some(item) = self.items.get_mut(id) {
                    item.status = *status;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
