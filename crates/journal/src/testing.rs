//! Test utilities for the journal crate
//!
//! Provides an in-memory `EntryStore` and payload builders shared by the
//! service, server and CLI tests.

use crate::db::EntryStore;
use crate::services::{Entry, NewEntry};
use anyhow::Result;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// A description that sits exactly on the minimum word count
pub const TEN_WORDS: &str = "one two three four five six seven eight nine ten";

/// A valid creation payload for the given week
pub fn new_entry(week: u32) -> NewEntry {
    NewEntry {
        week_of_journal: week,
        journal_name: "Learning Journal".to_string(),
        journal_date: "2024-01-01".to_string(),
        task_name: "Built a fetch wrapper".to_string(),
        task_description: TEN_WORDS.to_string(),
        technologies: vec!["HTML".to_string(), "JavaScript".to_string()],
    }
}

/// The same payload as JSON, the way the front-end posts it
pub fn new_entry_json(week: u32) -> serde_json::Value {
    serde_json::json!({
        "weekOfJournal": week,
        "journalName": "Learning Journal",
        "journalDate": "2024-01-01",
        "taskName": "Built a fetch wrapper",
        "taskDescription": TEN_WORDS,
        "technologies": ["HTML", "JavaScript"]
    })
}

/// In-memory store.
///
/// Thread-safe via Mutex. Saves can be made to fail to exercise storage errors.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<Entry>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    /// Make every following save fail
    pub fn fail_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl EntryStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Entry>> {
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn save(&self, entries: &[Entry]) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("disk full"));
        }
        *self.entries.lock().unwrap() = entries.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
