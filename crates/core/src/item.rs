// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedulable items and their per-tenant selection order
//!
//! An item is `pending` while it is due for delivery. The scheduler only ever
//! moves an item from `pending` to `delivered`; every other edge belongs to
//! external mutators.

use crate::id::{ItemId, TenantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Priority assigned when none is given
pub const DEFAULT_PRIORITY: i32 = 0;

/// Lifecycle status of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Due now and eligible for selection
    Pending,
    Delivered,
    Archived,
    Deferred,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Delivered => "delivered",
            ItemStatus::Archived => "archived",
            ItemStatus::Deferred => "deferred",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(ItemStatus::Pending),
            "delivered" => Ok(ItemStatus::Delivered),
            "archived" => Ok(ItemStatus::Archived),
            "deferred" => Ok(ItemStatus::Deferred),
            other => Err(format!(
                "invalid status '{}': expected pending, delivered, archived or deferred",
                other
            )),
        }
    }
}

/// One schedulable unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub tenant_id: TenantId,
    pub topic: String,
    pub url: String,
    pub priority: i32,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub last_delivered_at: Option<DateTime<Utc>>,
    pub delivery_count: u32,
}

impl Item {
    /// Create a pending item with the default priority
    pub fn new(
        id: impl Into<ItemId>,
        tenant_id: impl Into<TenantId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            tenant_id: tenant_id.into(),
            topic: String::new(),
            url: String::new(),
            priority: DEFAULT_PRIORITY,
            status: ItemStatus::Pending,
            created_at,
            last_delivered_at: None,
            delivery_count: 0,
        }
    }

    pub fn with_priority(self, priority: i32) -> Self {
        Self { priority, ..self }
    }

    pub fn with_content(self, topic: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            url: url.into(),
            ..self
        }
    }

    pub fn with_status(self, status: ItemStatus) -> Self {
        Self { status, ..self }
    }

    /// Whether the item is eligible for the next delivery attempt
    pub fn is_due(&self) -> bool {
        self.status == ItemStatus::Pending
    }

    /// The item after one successful delivery at `at`
    ///
    /// Callers must have checked the item is still pending.
    pub fn delivered_at(&self, at: DateTime<Utc>) -> Self {
        Self {
            status: ItemStatus::Delivered,
            last_delivered_at: Some(at),
            delivery_count: self.delivery_count.saturating_add(1),
            ..self.clone()
        }
    }

    /// Selection order within a tenant: priority desc, created_at asc, id asc
    pub fn selection_order(a: &Item, b: &Item) -> Ordering {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
