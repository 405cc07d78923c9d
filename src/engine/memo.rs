// Sticky-note memo pad

use crate::clock::Clock;
use crate::store::{self, KvStore, MEMOS_KEY};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::rc::Rc;
use uuid::Uuid;

pub const MEMO_SCHEMA_VERSION: u32 = 1;

/// Longest memo kept, in characters.
pub const MAX_MEMO_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: String,
    pub content: String,
    pub created_at: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedMemos {
    version: u32,
    memos: Vec<Memo>,
}

/// Newest-first list of memos, written in full after every change.
pub struct MemoBoard {
    memos: Vec<Memo>,
    store: Rc<dyn KvStore>,
    clock: Rc<dyn Clock>,
}

impl MemoBoard {
    pub fn load(store: Rc<dyn KvStore>, clock: Rc<dyn Clock>) -> Self {
        let mut memos = match store::load_json::<PersistedMemos>(store.as_ref(), MEMOS_KEY) {
            Some(p) if p.version == MEMO_SCHEMA_VERSION => p.memos,
            Some(p) => {
                tracing::warn!(version = p.version, "ignoring memos with unknown schema version");
                Vec::new()
            }
            None => Vec::new(),
        };
        // Ids must stay unique for remove(); keep the first of any duplicate
        let mut seen = HashSet::new();
        let before = memos.len();
        memos.retain(|m| seen.insert(m.id.clone()));
        if memos.len() != before {
            tracing::warn!(dropped = before - memos.len(), "dropped memos with duplicate ids");
        }
        tracing::debug!(count = memos.len(), "loaded memos");

        Self {
            memos,
            store,
            clock,
        }
    }

    /// Prepend a memo. Blank or whitespace-only input is ignored.
    pub fn add(&mut self, content: &str) -> Option<&Memo> {
        if content.trim().is_empty() {
            return None;
        }

        let content: String = content.chars().take(MAX_MEMO_CHARS).collect();
        // Keep created_at strictly decreasing down the list
        let created_at = match self.memos.first() {
            Some(newest) => self.clock.now_ms().max(newest.created_at + 1),
            None => self.clock.now_ms(),
        };

        self.memos.insert(
            0,
            Memo {
                id: Uuid::new_v4().to_string(),
                content,
                created_at,
            },
        );
        self.persist();
        self.memos.first()
    }

    /// Remove the memo with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.memos.len();
        self.memos.retain(|m| m.id != id);
        let removed = self.memos.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    pub fn iter(&self) -> impl Iterator<Item = &Memo> {
        self.memos.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Memo> {
        self.memos.get(index)
    }

    pub fn len(&self) -> usize {
        self.memos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }

    fn persist(&self) {
        let record = PersistedMemos {
            version: MEMO_SCHEMA_VERSION,
            memos: self.memos.clone(),
        };
        if let Err(e) = store::save_json(self.store.as_ref(), MEMOS_KEY, &record) {
            tracing::error!(error = %e, "failed to persist memos");
        }
    }
}
