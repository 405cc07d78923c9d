// On-disk persistence of timer and memo state

use std::fs;
use std::rc::Rc;
use tempfile::TempDir;
use zendash::clock::{Clock, ManualClock};
use zendash::engine::{FocusTimer, MemoBoard, TimerDurations, TimerMode};
use zendash::store::{FileStore, KvStore, MEMOS_KEY, TIMER_STATE_KEY, StoreError};

use crate::common::helpers::START_MS;

fn open(dir: &TempDir) -> Rc<dyn KvStore> {
    Rc::new(FileStore::open(dir.path().join("data")).unwrap())
}

fn clock_rc(clock: &ManualClock) -> Rc<dyn Clock> {
    Rc::new(clock.clone())
}

#[test]
fn test_timer_and_memos_survive_restart() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(START_MS);

    {
        let store = open(&dir);
        let mut timer = FocusTimer::load(Rc::clone(&store), clock_rc(&clock), TimerDurations::default());
        timer.switch_mode(TimerMode::Break);
        timer.toggle();

        let mut memos = MemoBoard::load(store, clock_rc(&clock));
        memos.add("stretch");
    }

    clock.advance_secs(60);
    let store = open(&dir);
    let timer = FocusTimer::load(Rc::clone(&store), clock_rc(&clock), TimerDurations::default());
    let memos = MemoBoard::load(store, clock_rc(&clock));

    assert_eq!(timer.mode(), TimerMode::Break);
    assert!(timer.is_active());
    assert_eq!(timer.remaining_ms(), 4 * 60 * 1000);
    assert_eq!(memos.get(0).map(|m| m.content.as_str()), Some("stretch"));
}

#[test]
fn test_persisted_timer_uses_camel_case_fields() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(START_MS);
    let store = open(&dir);
    let mut timer = FocusTimer::load(Rc::clone(&store), clock_rc(&clock), TimerDurations::default());
    timer.toggle();

    let raw = store.get(TIMER_STATE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["mode"], "FOCUS");
    assert_eq!(json["isActive"], true);
    assert_eq!(json["endTime"], START_MS + 25 * 60 * 1000);
    assert_eq!(json["timeLeftWhenPaused"], 25 * 60 * 1000);
    assert_eq!(json["version"], 1);
}

#[test]
fn test_corrupt_files_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(START_MS);
    let store = open(&dir);
    store.set(TIMER_STATE_KEY, "{ not json").unwrap();
    store.set(MEMOS_KEY, "[1, 2, 3]").unwrap();

    let timer = FocusTimer::load(Rc::clone(&store), clock_rc(&clock), TimerDurations::default());
    let memos = MemoBoard::load(store, clock_rc(&clock));

    assert_eq!(timer.mode(), TimerMode::Focus);
    assert!(!timer.is_active());
    assert_eq!(timer.remaining_ms(), 25 * 60 * 1000);
    assert!(memos.is_empty());
}

#[test]
fn test_writes_leave_no_temp_files() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    store.set("memos", "[]").unwrap();
    store.set("memos", "[\"x\"]").unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["memos.json".to_string()]);
    assert_eq!(store.get("memos").unwrap().as_deref(), Some("[\"x\"]"));
}

#[test]
fn test_rejects_path_like_keys() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path()).unwrap();

    for key in ["../escape", "a/b", "", ".hidden"] {
        assert!(matches!(store.set(key, "x"), Err(StoreError::InvalidKey(_))), "{key}");
    }
}
