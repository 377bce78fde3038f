pub mod config;
pub mod entry;
pub mod types;
pub mod validate;

pub use config::{ConfigService, CONFIG_DIR, CONFIG_KEYS};
pub use entry::{Created, EntryService};
pub use types::{
    now, parse_timestamp, Entry, EntryPatch, JournalConfig, NewEntry, ServerConfig, StorageConfig,
    DEFAULT_BIND, DEFAULT_STORAGE_PATH,
};
pub use validate::{
    parse_journal_date, word_count, ValidationError, MIN_DESCRIPTION_WORDS, REQUIRED_FIELDS,
};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Storage(#[from] anyhow::Error),
}
