// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dw add|list|archive|defer|restore` - Item management

use super::open_store;
use crate::output::{self, ItemRow, OutputFormat};
use crate::Env;
use anyhow::Result;
use clap::Args;
use dw_core::{
    Clock, IdGen, Item, ItemId, ItemStatus, SystemClock, TenantId, UuidIdGen, DEFAULT_PRIORITY,
};

#[derive(Args)]
pub struct AddArgs {
    /// Tenant that receives the item
    pub tenant: String,
    /// Topic of the item
    pub topic: String,
    /// Link delivered with the item
    pub url: String,

    /// Higher priorities are delivered first
    #[arg(short, long, default_value_t = DEFAULT_PRIORITY, allow_negative_numbers = true)]
    pub priority: i32,

    /// Use this id instead of a generated one
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only items of this tenant
    #[arg(long)]
    pub tenant: Option<String>,

    /// Only items with this status (pending, delivered, archived, deferred)
    #[arg(long)]
    pub status: Option<ItemStatus>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(Args)]
pub struct IdArgs {
    /// Item id
    pub id: String,
}

pub fn add(args: AddArgs, env: &Env) -> Result<()> {
    if args.tenant.trim().is_empty() {
        anyhow::bail!("tenant must not be empty");
    }
    let store = open_store(env)?;
    let id = args.id.unwrap_or_else(|| UuidIdGen.next());
    let item = Item::new(id, args.tenant, SystemClock.now())
        .with_priority(args.priority)
        .with_content(args.topic, args.url);

    let item = store.insert(item)?;
    println!("{}", item.id);
    Ok(())
}

pub fn list(args: ListArgs, env: &Env) -> Result<()> {
    let store = open_store(env)?;
    let tenant = args.tenant.map(TenantId::new);

    let mut items: Vec<Item> = store
        .items()?
        .into_iter()
        .filter(|item| tenant.as_ref().is_none_or(|t| &item.tenant_id == t))
        .filter(|item| args.status.is_none_or(|s| item.status == s))
        .collect();
    items.sort_by(|a, b| {
        a.tenant_id
            .cmp(&b.tenant_id)
            .then_with(|| Item::selection_order(a, b))
    });

    let rows: Vec<ItemRow> = items.into_iter().map(ItemRow).collect();
    if rows.is_empty() && matches!(args.output, OutputFormat::Text) {
        println!("No items");
        return Ok(());
    }
    output::print_list(&rows, args.output);
    Ok(())
}

pub fn archive(args: IdArgs, env: &Env) -> Result<()> {
    let item = open_store(env)?.archive(&ItemId::new(args.id))?;
    println!("Archived {}", item.id);
    Ok(())
}

pub fn defer(args: IdArgs, env: &Env) -> Result<()> {
    let item = open_store(env)?.defer(&ItemId::new(args.id))?;
    println!("Deferred {}", item.id);
    Ok(())
}

pub fn restore(args: IdArgs, env: &Env) -> Result<()> {
    let item = open_store(env)?.restore(&ItemId::new(args.id))?;
    println!("Restored {}", item.id);
    Ok(())
}
