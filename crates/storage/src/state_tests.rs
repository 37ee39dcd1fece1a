// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{DateTime, TimeZone, Utc};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn create(id: &str, tenant: &str, priority: i32, created: i64) -> Operation {
    Operation::ItemCreate {
        item: Item::new(id, tenant, at(created)).with_priority(priority),
    }
}

fn delivered(id: &str, secs: i64) -> Operation {
    Operation::ItemDelivered {
        id: ItemId::new(id),
        at: at(secs),
    }
}

fn status(id: &str, status: ItemStatus) -> Operation {
    Operation::ItemStatusSet {
        id: ItemId::new(id),
        status,
    }
}

#[test]
fn apply_item_create() {
    let mut state = MaterializedState::default();
    state.apply(&create("d-1", "u-1", 0, 0));
    assert!(state.items.contains_key(&ItemId::new("d-1")));
}

#[test]
fn duplicate_create_keeps_first() {
    let mut state = MaterializedState::default();
    state.apply(&create("d-1", "u-1", 1, 0));
    state.apply(&create("d-1", "u-2", 9, 0));
    let item = state.get(&ItemId::new("d-1")).unwrap();
    assert_eq!(item.tenant_id.as_str(), "u-1");
    assert_eq!(item.priority, 1);
}

#[test]
fn delivered_applies_only_to_pending() {
    let mut state = MaterializedState::default();
    state.apply(&create("d-1", "u-1", 0, 0));
    state.apply(&delivered("d-1", 10));
    state.apply(&delivered("d-1", 20));

    let item = state.get(&ItemId::new("d-1")).unwrap();
    assert_eq!(item.status, ItemStatus::Delivered);
    assert_eq!(item.delivery_count, 1);
    assert_eq!(item.last_delivered_at, Some(at(10)));
}

#[test]
fn restore_then_deliver_counts_again() {
    let mut state = MaterializedState::from_operations(&[
        create("d-1", "u-1", 0, 0),
        delivered("d-1", 10),
        status("d-1", ItemStatus::Pending),
        delivered("d-1", 30),
    ]);
    let item = state.get(&ItemId::new("d-1")).unwrap().clone();
    assert_eq!(item.delivery_count, 2);
    assert_eq!(item.last_delivered_at, Some(at(30)));

    state.apply(&status("d-1", ItemStatus::Archived));
    assert_eq!(
        state.get(&ItemId::new("d-1")).unwrap().status,
        ItemStatus::Archived
    );
}

#[test]
fn status_set_cannot_mark_delivered() {
    let mut state = MaterializedState::default();
    state.apply(&create("d-1", "u-1", 0, 0));
    assert!(!state.accepts(&status("d-1", ItemStatus::Delivered)));
    state.apply(&status("d-1", ItemStatus::Delivered));
    let item = state.get(&ItemId::new("d-1")).unwrap();
    assert_eq!(item.status, ItemStatus::Pending);
    assert_eq!(item.delivery_count, 0);
}

#[test]
fn operations_on_unknown_items_are_ignored() {
    let mut state = MaterializedState::default();
    state.apply(&delivered("ghost", 0));
    state.apply(&status("ghost", ItemStatus::Archived));
    assert!(state.items.is_empty());
}

#[test]
fn tenants_listed_once_in_ascending_order() {
    let state = MaterializedState::from_operations(&[
        create("d-1", "carol", 0, 0),
        create("d-2", "alice", 0, 0),
        create("d-3", "alice", 0, 1),
        create("d-4", "bob", 0, 0),
        status("d-4", ItemStatus::Deferred),
    ]);
    let tenants = state.tenants_with_due_items();
    assert_eq!(tenants, vec![TenantId::from("alice"), TenantId::from("carol")]);
    assert_eq!(tenants, state.tenants_with_due_items());
}

#[test]
fn top_due_items_follow_selection_order() {
    let state = MaterializedState::from_operations(&[
        create("t1", "a", 3, 0),
        create("t2", "a", 5, 5),
        create("t3", "a", 5, 1),
        create("t4", "b", 100, 0),
        create("t5", "a", 9, 0),
        status("t5", ItemStatus::Archived),
    ]);
    let ids: Vec<_> = state
        .top_due_items(&TenantId::from("a"), 10)
        .into_iter()
        .map(|i| i.id.0)
        .collect();
    assert_eq!(ids, vec!["t3", "t2", "t1"]);

    let top = state.top_due_items(&TenantId::from("a"), 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id.as_str(), "t3");
}

#[test]
fn sorted_items_group_by_tenant() {
    let state = MaterializedState::from_operations(&[
        create("b1", "b", 0, 0),
        create("a1", "a", 0, 1),
        create("a2", "a", 7, 2),
    ]);
    let ids: Vec<_> = state.sorted_items().into_iter().map(|i| i.id.0).collect();
    assert_eq!(ids, vec!["a2", "a1", "b1"]);
}
