use anyhow::Result;
use journal::db::JsonFileStore;
use journal::services::{ConfigService, EntryService, JournalConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub entry_service: Arc<EntryService>,
    pub static_dir: Option<PathBuf>,
    pub config: JournalConfig,
}

impl AppState {
    #[cfg(test)]
    pub fn new(entry_service: Arc<EntryService>, static_dir: Option<PathBuf>) -> Self {
        Self {
            entry_service,
            static_dir,
            config: JournalConfig::default(),
        }
    }

    /// Build state from `.journal/config.toml` under `project_root` and `JOURNAL_` env vars
    pub fn from_env(project_root: &Path) -> Result<Self> {
        let config_service = ConfigService::new(project_root);
        let config = config_service.load()?;

        let storage_path = config_service.resolve_storage_path(&config);
        let static_dir = config_service.resolve_static_dir(&config);

        let store = Arc::new(JsonFileStore::new(storage_path));
        let entry_service = Arc::new(EntryService::new(store));

        Ok(Self {
            entry_service,
            static_dir,
            config,
        })
    }
}
