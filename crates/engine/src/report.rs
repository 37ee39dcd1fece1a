// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tick results

use crate::error::TenantError;
use dw_core::{Item, ItemId};
use serde::Serialize;

/// What one tick did
///
/// `processed` counts committed transitions only. Conflicts and idle tenants
/// are reported separately and never count as errors.
#[derive(Debug, Default, Serialize)]
pub struct TickReport {
    pub processed: usize,
    /// Items delivered and committed, in tenant listing order
    pub delivered: Vec<ItemId>,
    pub errors: Vec<TenantError>,
    /// Tenants listed as having due items
    pub tenants: usize,
    /// Tenants whose due item was gone by fetch time
    pub idle: usize,
    /// Sends whose transition lost to another writer
    pub conflicts: usize,
    /// Tenants skipped because the tick was cancelled or ran out of time
    pub not_visited: usize,
    /// The context was cancelled or past its deadline when the tick ended
    pub cancelled: bool,
}

impl TickReport {
    /// No tenant failed
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn record(&mut self, outcome: TenantOutcome) {
        match outcome {
            TenantOutcome::Delivered(item) => {
                self.processed += 1;
                self.delivered.push(item.id);
            }
            TenantOutcome::Idle => self.idle += 1,
            TenantOutcome::Conflict => self.conflicts += 1,
            TenantOutcome::Failed(error) => self.errors.push(error),
            TenantOutcome::NotVisited => self.not_visited += 1,
        }
    }
}

/// Result of one tenant's turn within a tick
#[derive(Debug)]
pub(crate) enum TenantOutcome {
    Delivered(Item),
    Idle,
    Conflict,
    Failed(TenantError),
    NotVisited,
}
