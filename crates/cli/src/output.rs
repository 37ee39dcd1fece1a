// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use dw_core::Item;
use dw_engine::TickReport;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct ReportView<'a>(pub &'a TickReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        write!(
            f,
            "processed {} of {} tenants ({} idle, {} conflicts, {} not visited, {} errors)",
            r.processed,
            r.tenants,
            r.idle,
            r.conflicts,
            r.not_visited,
            r.errors.len()
        )?;
        if r.cancelled {
            write!(f, " [cancelled]")?;
        }
        for id in &r.delivered {
            write!(f, "\n  delivered {}", id)?;
        }
        for error in &r.errors {
            write!(f, "\n  error: {}", error)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct ItemRow(pub Item);

impl fmt::Display for ItemRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let item = &self.0;
        write!(
            f,
            "{:<38} {:<16} {:>4} {:<10} {:>3} {}",
            item.id,
            item.tenant_id,
            item.priority,
            item.status,
            item.delivery_count,
            item.topic
        )
    }
}
