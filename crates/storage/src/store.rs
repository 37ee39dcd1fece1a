// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store implementation over materialized state and an optional WAL
//!
//! Every call takes the state lock and, for a WAL-backed store, the exclusive
//! log lock. It then applies entries other handles appended, checks its
//! precondition, appends its own operation and only then applies it. The
//! conditional `pending -> delivered` update is therefore atomic with respect
//! to every handle on the same log file, in this process or another.

use crate::state::MaterializedState;
use crate::wal::{Wal, WalError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dw_core::{Item, ItemId, ItemStatus, Operation, Store, StoreError, TenantId, Transition};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

impl From<WalError> for StoreError {
    fn from(e: WalError) -> Self {
        match e {
            WalError::Io(e) => StoreError::Io(e),
            WalError::Json { source, .. } | WalError::Encode(source) => StoreError::Json(source),
            e @ (WalError::Behind | WalError::Shrunk { .. }) => {
                StoreError::Unavailable(e.to_string())
            }
        }
    }
}

struct Inner {
    state: MaterializedState,
    wal: Option<Wal>,
}

/// Item store shared by cheap clones
#[derive(Clone)]
pub struct StateStore {
    inner: Arc<Mutex<Inner>>,
    durable: bool,
}

impl StateStore {
    /// A store that lives only in memory
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: MaterializedState::default(),
                wal: None,
            })),
            durable: false,
        }
    }

    /// Open a WAL-backed store, replaying any existing log
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let store = Self {
            inner: Arc::new(Mutex::new(Inner {
                state: MaterializedState::default(),
                wal: Some(Wal::open(path)?),
            })),
            durable: true,
        };
        let items = store.with_inner(|inner| Ok(inner.state.items.len()))?;
        tracing::debug!(path = %path.display(), items, "replayed item log");
        Ok(store)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `f` on state that includes every entry logged so far
    fn with_inner<T>(
        &self,
        f: impl FnOnce(&mut Inner) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        self.lock().synced(f)
    }

    /// Like `with_inner`, off the async runtime when the log may block
    async fn run<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Inner) -> Result<T, StoreError> + Send + 'static,
    {
        if !self.durable {
            return self.with_inner(f);
        }
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.with_inner(f))
            .await
            .map_err(|e| StoreError::Unavailable(format!("store task failed: {e}")))?
    }

    /// Enqueue a new item
    pub fn insert(&self, item: Item) -> Result<Item, StoreError> {
        self.with_inner(|inner| {
            if inner.state.items.contains_key(&item.id) {
                return Err(StoreError::Duplicate(item.id));
            }
            inner.commit(&Operation::ItemCreate { item: item.clone() })?;
            Ok(item)
        })
    }

    /// Look up one item
    pub fn get(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        self.with_inner(|inner| Ok(inner.state.get(id).cloned()))
    }

    /// All items grouped by tenant, in selection order within each tenant
    pub fn items(&self) -> Result<Vec<Item>, StoreError> {
        self.with_inner(|inner| Ok(inner.state.sorted_items()))
    }

    /// Apply an external status change
    ///
    /// `delivered` is reserved for `mark_delivered` and rejected here.
    pub fn set_status(&self, id: &ItemId, status: ItemStatus) -> Result<Item, StoreError> {
        if status == ItemStatus::Delivered {
            return Err(StoreError::InvalidTransition {
                id: id.clone(),
                status,
            });
        }
        self.with_inner(|inner| {
            if inner.state.get(id).is_none() {
                return Err(StoreError::NotFound(id.clone()));
            }
            inner.commit(&Operation::ItemStatusSet {
                id: id.clone(),
                status,
            })?;
            inner
                .state
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(id.clone()))
        })
    }

    pub fn archive(&self, id: &ItemId) -> Result<Item, StoreError> {
        self.set_status(id, ItemStatus::Archived)
    }

    pub fn defer(&self, id: &ItemId) -> Result<Item, StoreError> {
        self.set_status(id, ItemStatus::Deferred)
    }

    /// Make an item due again
    pub fn restore(&self, id: &ItemId) -> Result<Item, StoreError> {
        self.set_status(id, ItemStatus::Pending)
    }
}

impl Inner {
    /// Catch up with the log under its lock, then run `f` still holding it
    fn synced<T>(
        &mut self,
        f: impl FnOnce(&mut Inner) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _log = match self.wal.as_mut() {
            Some(wal) => {
                let lock = wal.lock()?;
                for op in wal.read_new()? {
                    self.state.apply(&op);
                }
                Some(lock)
            }
            None => None,
        };
        f(self)
    }

    /// Persist then apply; state is untouched if the WAL write fails
    fn commit(&mut self, op: &Operation) -> Result<(), StoreError> {
        if let Some(wal) = self.wal.as_mut() {
            wal.append(op)?;
        }
        self.state.apply(op);
        Ok(())
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[async_trait]
impl Store for StateStore {
    async fn list_tenants_with_due_items(&self) -> Result<Vec<TenantId>, StoreError> {
        self.run(|inner| Ok(inner.state.tenants_with_due_items()))
            .await
    }

    async fn fetch_top_due_items(
        &self,
        tenant: &TenantId,
        limit: usize,
    ) -> Result<Vec<Item>, StoreError> {
        let tenant = tenant.clone();
        self.run(move |inner| Ok(inner.state.top_due_items(&tenant, limit)))
            .await
    }

    async fn mark_delivered(
        &self,
        id: &ItemId,
        at: DateTime<Utc>,
    ) -> Result<Transition, StoreError> {
        let id = id.clone();
        self.run(move |inner| {
            let op = Operation::ItemDelivered { id: id.clone(), at };
            if !inner.state.accepts(&op) {
                return Ok(Transition::Conflict);
            }
            inner.commit(&op)?;
            match inner.state.get(&id) {
                Some(item) => Ok(Transition::Delivered(item.clone())),
                None => Err(StoreError::NotFound(id)),
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
