pub mod json;

use crate::services::Entry;
use anyhow::Result;

pub use json::JsonFileStore;

/// Whole-collection storage for journal entries.
///
/// Every call reads or writes the complete collection. There is no locking:
/// concurrent writers race and the last one wins.
#[async_trait::async_trait]
pub trait EntryStore: Send + Sync {
    /// Load every entry
    async fn load(&self) -> Result<Vec<Entry>>;

    /// Replace the stored collection
    async fn save(&self, entries: &[Entry]) -> Result<()>;

    /// Human readable description of where entries live
    fn location(&self) -> String;
}
