// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence boundary consumed by the scheduler

use crate::id::{ItemId, TenantId};
use crate::item::{Item, ItemStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("item not found: {0}")]
    NotFound(ItemId),
    #[error("item already exists: {0}")]
    Duplicate(ItemId),
    #[error("item {id} cannot be set to {status} by this operation")]
    InvalidTransition { id: ItemId, status: ItemStatus },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a conditional `pending -> delivered` update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The update committed; carries the item as stored afterwards
    Delivered(Item),
    /// The item was no longer pending at commit time; nothing changed
    Conflict,
}

/// Storage the scheduler reads due items from and commits deliveries to
#[async_trait]
pub trait Store: Clone + Send + Sync + 'static {
    /// Distinct tenants owning at least one pending item, ascending by id
    async fn list_tenants_with_due_items(&self) -> Result<Vec<TenantId>, StoreError>;

    /// Up to `limit` pending items of one tenant, in selection order
    async fn fetch_top_due_items(
        &self,
        tenant: &TenantId,
        limit: usize,
    ) -> Result<Vec<Item>, StoreError>;

    /// Move an item from pending to delivered if and only if it is still pending
    ///
    /// Sets `last_delivered_at = at` and increments `delivery_count` in the
    /// same atomic step. Returns `Transition::Conflict` when the precondition
    /// no longer holds, including when the item no longer exists.
    async fn mark_delivered(&self, id: &ItemId, at: DateTime<Utc>)
        -> Result<Transition, StoreError>;
}
