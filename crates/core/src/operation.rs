// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operations for the write-ahead log

use crate::id::ItemId;
use crate::item::{Item, ItemStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operations that can be persisted to the WAL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Enqueue a new item
    ItemCreate { item: Item },

    /// Commit a successful delivery (the scheduler's only edge)
    ItemDelivered { id: ItemId, at: DateTime<Utc> },

    /// External status change: archive, defer, restore
    ItemStatusSet { id: ItemId, status: ItemStatus },
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
