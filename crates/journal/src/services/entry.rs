use super::types::{Entry, EntryPatch, NewEntry};
use super::ServiceError;
use crate::db::EntryStore;
use anyhow::{Context, Result};
use std::sync::Arc;

/// A freshly created entry together with the new collection size
#[derive(Debug, Clone)]
pub struct Created {
    pub entry: Entry,
    pub total: usize,
}

/// Service for journal entry CRUD operations
pub struct EntryService {
    store: Arc<dyn EntryStore>,
}

impl EntryService {
    /// Create a new entry service
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    /// Where the underlying store keeps its entries
    pub fn location(&self) -> String {
        self.store.location()
    }

    async fn load(&self) -> Result<Vec<Entry>> {
        self.store.load().await.context("Failed to load entries")
    }

    async fn save(&self, entries: &[Entry]) -> Result<()> {
        self.store.save(entries).await.context("Failed to save entries")
    }

    /// Add a new entry
    pub async fn create(&self, fields: NewEntry) -> Result<Created, ServiceError> {
        fields.validate()?;

        let mut entries = self.load().await?;

        let mut id = Entry::generate_id();
        while entries.iter().any(|e| e.id == id) {
            id = Entry::generate_id();
        }

        let entry = Entry::new(id, fields);
        entries.push(entry.clone());
        self.save(&entries).await?;

        tracing::info!(id = %entry.id, week = entry.week_of_journal, "created entry");
        Ok(Created {
            entry,
            total: entries.len(),
        })
    }

    /// List every entry in stored order
    pub async fn list(&self) -> Result<Vec<Entry>> {
        self.load().await
    }

    /// Get entry by ID
    pub async fn get(&self, id: &str) -> Result<Option<Entry>> {
        let entries = self.load().await?;
        Ok(entries.into_iter().find(|e| e.id == id))
    }

    /// Merge the supplied fields into an existing entry
    pub async fn update(&self, id: &str, patch: EntryPatch) -> Result<Entry, ServiceError> {
        let mut entries = self.load().await?;

        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        patch.validate()?;
        entry.apply(patch);
        let updated = entry.clone();

        self.save(&entries).await?;

        tracing::info!(id = %updated.id, "updated entry");
        Ok(updated)
    }

    /// Remove an entry, returning how many remain
    pub async fn delete(&self, id: &str) -> Result<usize, ServiceError> {
        let entries = self.load().await?;
        let before = entries.len();

        let remaining: Vec<Entry> = entries.into_iter().filter(|e| e.id != id).collect();
        if remaining.len() == before {
            return Err(ServiceError::NotFound(id.to_string()));
        }

        self.save(&remaining).await?;

        tracing::info!(id, remaining = remaining.len(), "deleted entry");
        Ok(remaining.len())
    }
}
