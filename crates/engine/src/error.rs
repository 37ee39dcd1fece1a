// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the delivery scheduler

use dw_adapters::DeliveryError;
use dw_core::{ItemId, StoreError, TenantId};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::time::Duration;
use thiserror::Error;

/// Errors that abort a whole tick
#[derive(Debug, Error)]
pub enum TickError {
    /// Without the tenant universe no fairness guarantee can be made
    #[error("failed to list tenants with due items: {0}")]
    ListTenants(#[source] StoreError),
}

/// Why one tenant's turn failed
#[derive(Debug, Error)]
pub enum TenantFailure {
    #[error("fetch failed: {0}")]
    Fetch(#[source] StoreError),
    #[error("delivery failed: {0}")]
    Delivery(#[source] DeliveryError),
    #[error("delivery timed out after {}ms", .0.as_millis())]
    DeliveryTimeout(Duration),
    #[error("transition failed: {0}")]
    Transition(#[source] StoreError),
}

impl TenantFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            TenantFailure::Fetch(_) => "fetch",
            TenantFailure::Delivery(_) => "delivery",
            TenantFailure::DeliveryTimeout(_) => "delivery_timeout",
            TenantFailure::Transition(_) => "transition",
        }
    }
}

/// A non-fatal failure attributed to one tenant
#[derive(Debug, Error)]
#[error("tenant {tenant}: {failure}")]
pub struct TenantError {
    pub tenant: TenantId,
    /// The item being handled, once one was fetched
    pub item: Option<ItemId>,
    #[source]
    pub failure: TenantFailure,
}

impl TenantError {
    pub fn new(tenant: TenantId, item: Option<ItemId>, failure: TenantFailure) -> Self {
        Self {
            tenant,
            item,
            failure,
        }
    }
}

impl Serialize for TenantError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TenantError", 4)?;
        s.serialize_field("tenant", &self.tenant)?;
        s.serialize_field("item", &self.item)?;
        s.serialize_field("kind", self.failure.kind())?;
        s.serialize_field("error", &self.failure.to_string())?;
        s.end()
    }
}
