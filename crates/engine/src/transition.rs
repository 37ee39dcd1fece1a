// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conditional `pending -> delivered` transition

use chrono::{DateTime, Utc};
use dw_core::{ItemId, Store, StoreError, Transition};

/// Commits deliveries through the store's optimistic update
///
/// A `Transition::Conflict` means another run (or an external mutator) got
/// there first. It is never an error and never moves a counter.
#[derive(Clone)]
pub struct StateTransitioner<S> {
    store: S,
}

impl<S: Store> StateTransitioner<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn mark_delivered(
        &self,
        id: &ItemId,
        at: DateTime<Utc>,
    ) -> Result<Transition, StoreError> {
        self.store.mark_delivered(id, at).await
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
