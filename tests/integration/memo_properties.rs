// Memo board ordering, filtering and persistence

use proptest::prelude::*;
use std::rc::Rc;
use zendash::clock::{Clock, ManualClock};
use zendash::engine::{MAX_MEMO_CHARS, MemoBoard};
use zendash::store::{KvStore, MemoryStore};

use crate::common::helpers::START_MS;

fn board(store: &Rc<dyn KvStore>, clock: &ManualClock) -> MemoBoard {
    let clock: Rc<dyn Clock> = Rc::new(clock.clone());
    MemoBoard::load(Rc::clone(store), clock)
}

#[test]
fn test_memos_reload_in_the_same_order() {
    let store: Rc<dyn KvStore> = Rc::new(MemoryStore::new());
    let clock = ManualClock::new(START_MS);
    {
        let mut memos = board(&store, &clock);
        memos.add("water the plants");
        clock.advance_secs(5);
        memos.add("call mom");
    }

    let reloaded = board(&store, &clock);
    let contents: Vec<&str> = reloaded.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["call mom", "water the plants"]);
}

#[test]
fn test_removing_unknown_id_is_a_no_op() {
    let store: Rc<dyn KvStore> = Rc::new(MemoryStore::new());
    let clock = ManualClock::new(START_MS);
    let mut memos = board(&store, &clock);
    memos.add("keep me");

    assert!(!memos.remove("not-an-id"));
    assert_eq!(memos.len(), 1);
}

#[test]
fn test_removed_memo_stays_removed_after_reload() {
    let store: Rc<dyn KvStore> = Rc::new(MemoryStore::new());
    let clock = ManualClock::new(START_MS);
    let id = {
        let mut memos = board(&store, &clock);
        memos.add("first");
        let id = memos.add("second").map(|m| m.id.clone()).unwrap();
        assert!(memos.remove(&id));
        id
    };

    let reloaded = board(&store, &clock);
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.iter().all(|m| m.id != id));
}

#[test]
fn test_long_memo_is_truncated() {
    let store: Rc<dyn KvStore> = Rc::new(MemoryStore::new());
    let clock = ManualClock::new(START_MS);
    let mut memos = board(&store, &clock);

    let long = "字".repeat(MAX_MEMO_CHARS + 20);
    let memo = memos.add(&long).unwrap();
    assert_eq!(memo.content.chars().count(), MAX_MEMO_CHARS);
}

proptest! {
    /// Whitespace-only input never creates a memo.
    #[test]
    fn prop_blank_input_is_ignored(blank in "[ \t\n\r]{0,12}") {
        let store: Rc<dyn KvStore> = Rc::new(MemoryStore::new());
        let clock = ManualClock::new(START_MS);
        let mut memos = board(&store, &clock);

        prop_assert!(memos.add(&blank).is_none());
        prop_assert!(memos.is_empty());
    }

    /// Adding a memo and removing it again leaves the board as it was.
    #[test]
    fn prop_add_then_remove_restores(
        existing in prop::collection::vec("[a-z ]{0,8}[a-z]", 0..6),
        text in "[a-z]{1,16}",
    ) {
        let store: Rc<dyn KvStore> = Rc::new(MemoryStore::new());
        let clock = ManualClock::new(START_MS);
        let mut memos = board(&store, &clock);
        for entry in &existing {
            memos.add(entry);
        }
        let before = memos.memos().to_vec();

        let id = memos.add(&text).map(|m| m.id.clone());
        prop_assert!(id.is_some());
        prop_assert!(memos.remove(id.as_deref().unwrap_or_default()));

        prop_assert_eq!(memos.memos(), before.as_slice());
    }

    /// Newest first, with strictly decreasing timestamps down the list,
    /// even when several memos land in the same millisecond.
    #[test]
    fn prop_newest_first_with_increasing_created_at(
        entries in prop::collection::vec(("[a-z]{1,10}", 0i64..3), 1..20),
    ) {
        let store: Rc<dyn KvStore> = Rc::new(MemoryStore::new());
        let clock = ManualClock::new(START_MS);
        let mut memos = board(&store, &clock);

        for (text, gap_ms) in &entries {
            clock.advance_ms(*gap_ms);
            prop_assert!(memos.add(text).is_some());
        }

        prop_assert_eq!(memos.len(), entries.len());
        let newest = memos.get(0).map(|m| m.content.clone());
        prop_assert_eq!(newest, entries.last().map(|(t, _)| t.clone()));

        let stamps: Vec<i64> = memos.iter().map(|m| m.created_at).collect();
        prop_assert!(stamps.windows(2).all(|w| w[0] > w[1]));

        let mut ids: Vec<&str> = memos.iter().map(|m| m.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), entries.len());
    }
}
