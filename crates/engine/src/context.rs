// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cancellation and deadline for one tick

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Caller-controlled bounds on a tick
///
/// Once done, tenants not yet visited are skipped and an in-flight send is
/// abandoned. Work already committed stays committed.
#[derive(Debug, Clone, Default)]
pub struct TickContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl TickContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to an external token, e.g. one cancelled on shutdown
    pub fn with_cancel(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    /// Keep the earlier of the current deadline and `deadline`
    pub fn with_deadline(self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        };
        Self {
            deadline: Some(deadline),
            ..self
        }
    }

    /// A timeout too large to represent as an instant leaves the deadline unchanged
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    pub fn is_done(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Resolves once the token is cancelled or the deadline passes
    pub async fn done(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.cancel.cancelled() => {}
                    _ = tokio::time::sleep_until(deadline) => {}
                }
            }
            None => self.cancel.cancelled().await,
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
