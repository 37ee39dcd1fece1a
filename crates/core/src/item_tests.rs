// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{Duration, TimeZone};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn make_item(id: &str, priority: i32, created: i64) -> Item {
    Item::new(id, "tenant-a", at(created)).with_priority(priority)
}

fn sorted_ids(mut items: Vec<Item>) -> Vec<String> {
    items.sort_by(Item::selection_order);
    items.into_iter().map(|i| i.id.0).collect()
}

#[test]
fn new_item_is_pending_and_undelivered() {
    let item = Item::new("d-1", "u-1", at(0));
    assert_eq!(item.status, ItemStatus::Pending);
    assert_eq!(item.priority, DEFAULT_PRIORITY);
    assert_eq!(item.delivery_count, 0);
    assert!(item.last_delivered_at.is_none());
    assert!(item.is_due());
}

#[test]
fn delivered_at_bumps_count_and_stamps_time() {
    let item = make_item("d-1", 0, 0);
    let once = item.delivered_at(at(10));
    assert_eq!(once.status, ItemStatus::Delivered);
    assert_eq!(once.delivery_count, 1);
    assert_eq!(once.last_delivered_at, Some(at(10)));

    let twice = once
        .with_status(ItemStatus::Pending)
        .delivered_at(at(20));
    assert_eq!(twice.delivery_count, 2);
    assert_eq!(twice.last_delivered_at, Some(at(20)));
}

#[test]
fn higher_priority_sorts_first() {
    let ids = sorted_ids(vec![make_item("t1", 3, 0), make_item("t2", 5, 10)]);
    assert_eq!(ids, vec!["t2", "t1"]);
}

#[test]
fn older_item_wins_priority_tie() {
    let ids = sorted_ids(vec![make_item("new", 1, 60), make_item("old", 1, 0)]);
    assert_eq!(ids, vec!["old", "new"]);
}

#[test]
fn id_breaks_full_tie() {
    let ids = sorted_ids(vec![make_item("b", 1, 0), make_item("a", 1, 0)]);
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn status_round_trips_through_str() {
    for status in [
        ItemStatus::Pending,
        ItemStatus::Delivered,
        ItemStatus::Archived,
        ItemStatus::Deferred,
    ] {
        assert_eq!(status.as_str().parse::<ItemStatus>(), Ok(status));
    }
}

#[test]
fn status_parse_rejects_unknown() {
    let err = "snoozed".parse::<ItemStatus>().unwrap_err();
    assert!(err.contains("snoozed"));
}

#[test]
fn status_serializes_lowercase() {
    let json = serde_json::to_string(&ItemStatus::Deferred).unwrap();
    assert_eq!(json, "\"deferred\"");
}

#[test]
fn item_serde_preserves_bookkeeping() {
    let item = make_item("d-1", 2, 0)
        .with_content("rust", "https://example.com")
        .delivered_at(at(5) + Duration::milliseconds(250));
    let json = serde_json::to_string(&item).unwrap();
    let back: Item = serde_json::from_str(&json).unwrap();
    assert_eq!(back, item);
}

mod yare_tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        priority_5_before_1 = { (5, 0), (1, 0), "x" },
        priority_1_after_5 = { (1, 0), (5, 0), "y" },
        negative_priority_last = { (-5, 0), (0, 100), "y" },
        equal_priority_older_first = { (0, 0), (0, 1), "x" },
        equal_priority_newer_second = { (0, 9), (0, 1), "y" },
    )]
    fn selection_picks(x: (i32, i64), y: (i32, i64), expected_first: &str) {
        let ids = sorted_ids(vec![make_item("x", x.0, x.1), make_item("y", y.0, y.1)]);
        assert_eq!(ids[0], expected_first);
    }

    #[parameterized(
        pending_is_due = { ItemStatus::Pending, true },
        delivered_not_due = { ItemStatus::Delivered, false },
        archived_not_due = { ItemStatus::Archived, false },
        deferred_not_due = { ItemStatus::Deferred, false },
    )]
    fn due_only_when_pending(status: ItemStatus, due: bool) {
        assert_eq!(make_item("d", 0, 0).with_status(status).is_due(), due);
    }
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_item() -> impl Strategy<Value = Item> {
        (0u32..50, -10i32..10, 0i64..20)
            .prop_map(|(id, priority, created)| make_item(&format!("d-{}", id), priority, created))
    }

    proptest! {
        #[test]
        fn sorted_items_respect_key_order(items in proptest::collection::vec(arb_item(), 0..30)) {
            let mut items = items;
            items.sort_by(Item::selection_order);
            for pair in items.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                let key_a = (-(a.priority as i64), a.created_at, a.id.clone());
                let key_b = (-(b.priority as i64), b.created_at, b.id.clone());
                prop_assert!(key_a <= key_b);
            }
        }

        #[test]
        fn selection_order_is_antisymmetric(a in arb_item(), b in arb_item()) {
            prop_assert_eq!(Item::selection_order(&a, &b), Item::selection_order(&b, &a).reverse());
        }
    }
}
