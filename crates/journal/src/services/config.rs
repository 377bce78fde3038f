use super::types::{JournalConfig, DEFAULT_BIND, DEFAULT_STORAGE_PATH};
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

/// Directory holding project configuration, relative to the project root
pub const CONFIG_DIR: &str = ".journal";

/// Keys accepted by [`ConfigService::get`], [`ConfigService::set`] and [`ConfigService::unset`]
pub const CONFIG_KEYS: [&str; 3] = ["storage.path", "server.bind", "server.static_dir"];

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unknown config key: {} (valid keys: {})",
        key,
        CONFIG_KEYS.join(", ")
    )
}

/// Service for configuration management
pub struct ConfigService {
    project_root: PathBuf,
    config_path: PathBuf,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(project_root: &Path) -> Self {
        let config_path = project_root.join(CONFIG_DIR).join("config.toml");
        Self {
            project_root: project_root.to_path_buf(),
            config_path,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Initialize configuration with defaults
    pub fn init(&self) -> Result<JournalConfig> {
        let config = JournalConfig::default();
        self.save(&config)?;
        Ok(config)
    }

    /// Load configuration from file, with env var overrides (JOURNAL_ prefix, __ separator)
    pub fn load(&self) -> Result<JournalConfig> {
        let mut figment = Figment::from(Serialized::defaults(JournalConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment = figment.merge(Env::prefixed("JOURNAL_").split("__"));

        let config: JournalConfig = figment.extract().context("Failed to load configuration")?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &JournalConfig) -> Result<()> {
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        std::fs::write(&self.config_path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Get a configuration value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.load()?;
        match key {
            "storage.path" => Ok(config
                .storage
                .path
                .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string())),
            "server.bind" => Ok(config.server.bind),
            "server.static_dir" => Ok(config.server.static_dir.unwrap_or_default()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a configuration value by dotted key
    pub fn set(&self, key: &str, value: String) -> Result<()> {
        let mut config = self.load()?;
        match key {
            "storage.path" => config.storage.path = Some(value),
            "server.bind" => config.server.bind = value,
            "server.static_dir" => config.server.static_dir = Some(value),
            _ => return Err(unknown_key(key)),
        }
        self.save(&config)?;
        Ok(())
    }

    /// Return a key to its default
    pub fn unset(&self, key: &str) -> Result<()> {
        let mut config = self.load()?;
        match key {
            "storage.path" => config.storage.path = None,
            "server.bind" => config.server.bind = DEFAULT_BIND.to_string(),
            "server.static_dir" => config.server.static_dir = None,
            _ => return Err(unknown_key(key)),
        }
        self.save(&config)?;
        Ok(())
    }

    /// Resolve the journal file from config, relative paths against the project root
    pub fn resolve_storage_path(&self, config: &JournalConfig) -> PathBuf {
        let path = config.storage.path.as_deref().unwrap_or(DEFAULT_STORAGE_PATH);
        self.resolve(path)
    }

    /// Resolve the static front-end directory, if one is configured
    pub fn resolve_static_dir(&self, config: &JournalConfig) -> Option<PathBuf> {
        config
            .server
            .static_dir
            .as_deref()
            .filter(|dir| !dir.is_empty())
            .map(|dir| self.resolve(dir))
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Check if configuration exists
    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }
}
