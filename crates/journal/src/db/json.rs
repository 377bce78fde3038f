use super::EntryStore;
use crate::services::Entry;
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Entries kept as one pretty-printed JSON array in a single file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl EntryStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Entry>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "journal file absent, starting empty");
                return Ok(Vec::new());
            },
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            },
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                // Unreadable JSON counts as empty; the next save overwrites the file.
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "journal file is malformed, treating it as empty"
                );
                return Ok(Vec::new());
            },
        };

        // Well-formed JSON that does not hold entries is refused, so no write replaces it.
        let entries: Vec<Entry> = serde_json::from_value(value).with_context(|| {
            format!("{} does not hold a list of journal entries", self.path.display())
        })?;

        tracing::debug!(path = %self.path.display(), count = entries.len(), "loaded entries");
        Ok(entries)
    }

    async fn save(&self, entries: &[Entry]) -> Result<()> {
        let content = serde_json::to_string_pretty(entries).context("Failed to serialize entries")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), count = entries.len(), "saved entries");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
