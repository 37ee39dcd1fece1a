// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fair, tenant-by-tenant delivery tick

use crate::context::TickContext;
use crate::error::{TenantError, TenantFailure, TickError};
use crate::fetcher::DueItemFetcher;
use crate::report::{TenantOutcome, TickReport};
use crate::selector::TenantSelector;
use crate::transition::StateTransitioner;
use dw_adapters::DeliveryExecutor;
use dw_core::{Clock, SchedulerConfig, Store, TenantId, Transition};
use futures::stream::{self, StreamExt};
use tracing::Instrument;

/// Delivers at most one due item per tenant per tick
///
/// Holds no lock across a tick. Overlapping ticks are kept safe by the
/// store's conditional transition alone. For a WAL-backed store that covers
/// handles in other processes too, since each store call locks the log and
/// reads what others appended first.
pub struct Scheduler<S, D, C> {
    selector: TenantSelector<S>,
    fetcher: DueItemFetcher<S>,
    transitioner: StateTransitioner<S>,
    delivery: D,
    clock: C,
    config: SchedulerConfig,
}

impl<S, D, C> Scheduler<S, D, C>
where
    S: Store,
    D: DeliveryExecutor,
    C: Clock,
{
    pub fn new(store: S, delivery: D, clock: C, config: SchedulerConfig) -> Self {
        Self {
            selector: TenantSelector::new(store.clone()),
            fetcher: DueItemFetcher::new(store.clone()),
            transitioner: StateTransitioner::new(store),
            delivery,
            clock,
            config,
        }
    }

    /// Run one tick
    ///
    /// Fails only when the tenant universe cannot be listed. Every other
    /// failure is attributed to its tenant and returned in the report.
    pub async fn run_tick(&self, ctx: &TickContext) -> Result<TickReport, TickError> {
        let ctx = match self.config.tick_deadline {
            Some(deadline) => ctx.clone().with_timeout(deadline),
            None => ctx.clone(),
        };
        let span = tracing::info_span!("tick", workers = self.workers());
        self.tick(&ctx).instrument(span).await
    }

    async fn tick(&self, ctx: &TickContext) -> Result<TickReport, TickError> {
        let tenants = match self.selector.list_tenants_with_due_items().await {
            Ok(tenants) => tenants,
            Err(e) => {
                tracing::error!(error = %e, "tick aborted: tenant listing failed");
                return Err(TickError::ListTenants(e));
            }
        };
        tracing::info!(tenants = tenants.len(), "tick started");

        let mut report = TickReport {
            tenants: tenants.len(),
            ..TickReport::default()
        };

        // buffered() keeps outcomes in listing order whatever the pool size
        let outcomes: Vec<TenantOutcome> = stream::iter(tenants)
            .map(|tenant| async move { self.process_tenant(&tenant, ctx).await })
            .buffered(self.workers())
            .collect()
            .await;

        for outcome in outcomes {
            report.record(outcome);
        }
        report.cancelled = ctx.is_done();

        tracing::info!(
            tenants = report.tenants,
            processed = report.processed,
            errors = report.errors.len(),
            idle = report.idle,
            conflicts = report.conflicts,
            not_visited = report.not_visited,
            cancelled = report.cancelled,
            "tick finished"
        );
        Ok(report)
    }

    async fn process_tenant(&self, tenant: &TenantId, ctx: &TickContext) -> TenantOutcome {
        if ctx.is_done() {
            return TenantOutcome::NotVisited;
        }

        let item = match self.fetcher.fetch_top_due_item(tenant).await {
            Ok(Some(item)) => item,
            Ok(None) => {
                tracing::debug!(tenant = %tenant, "no due item at fetch time");
                return TenantOutcome::Idle;
            }
            Err(e) => {
                tracing::warn!(tenant = %tenant, error = %e, "fetch failed");
                return TenantOutcome::Failed(TenantError::new(
                    tenant.clone(),
                    None,
                    TenantFailure::Fetch(e),
                ));
            }
        };

        let timeout = self.config.delivery_timeout;
        let sent = tokio::select! {
            biased;
            _ = ctx.done() => {
                tracing::info!(tenant = %tenant, item = %item.id, "send abandoned, tick cancelled");
                return TenantOutcome::NotVisited;
            }
            result = tokio::time::timeout(timeout, self.delivery.send(&item)) => result,
        };

        let failure = match sent {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(TenantFailure::Delivery(e)),
            Err(_) => Some(TenantFailure::DeliveryTimeout(timeout)),
        };
        if let Some(failure) = failure {
            tracing::warn!(tenant = %tenant, item = %item.id, error = %failure, "delivery failed");
            return TenantOutcome::Failed(TenantError::new(
                tenant.clone(),
                Some(item.id),
                failure,
            ));
        }

        // Sent: the transition is attempted even if the tick is now cancelled
        match self
            .transitioner
            .mark_delivered(&item.id, self.clock.now())
            .await
        {
            Ok(Transition::Delivered(item)) => {
                tracing::info!(
                    tenant = %tenant,
                    item = %item.id,
                    delivery_count = item.delivery_count,
                    "item delivered"
                );
                TenantOutcome::Delivered(item)
            }
            Ok(Transition::Conflict) => {
                tracing::debug!(tenant = %tenant, item = %item.id, "item already transitioned elsewhere");
                TenantOutcome::Conflict
            }
            Err(e) => {
                tracing::warn!(tenant = %tenant, item = %item.id, error = %e, "transition failed");
                TenantOutcome::Failed(TenantError::new(
                    tenant.clone(),
                    Some(item.id),
                    TenantFailure::Transition(e),
                ))
            }
        }
    }

    fn workers(&self) -> usize {
        self.config.workers.max(1)
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
