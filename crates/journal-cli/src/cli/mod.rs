mod config;
mod entry;
mod init;
mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use journal::db::JsonFileStore;
use journal::services::{ConfigService, EntryService};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Open the entry service over `store`, or over the configured journal file
pub fn open_service(store: Option<PathBuf>) -> Result<EntryService> {
    let path = match store {
        Some(path) => path,
        None => {
            let config_service = ConfigService::new(Path::new("."));
            let config = config_service.load()?;
            config_service.resolve_storage_path(&config)
        },
    };
    tracing::info!(path = %path.display(), "Using journal file");
    Ok(EntryService::new(Arc::new(JsonFileStore::new(path))))
}

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Learning journal entries from the command line", long_about = None)]
pub struct Cli {
    /// Enable verbose output (info logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Journal file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration for this project
    Init(init::InitArgs),

    /// Add a new entry, prompting for anything not given as a flag
    Add(entry::AddArgs),

    /// List all entries
    List(entry::ListArgs),

    /// Show one entry
    Show(entry::ShowArgs),

    /// Update fields of an existing entry
    Update(entry::UpdateArgs),

    /// Remove an entry
    Remove(entry::RemoveArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

/// Execute the CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let store = cli.store;
    match cli.command {
        Commands::Init(args) => init::execute(args).await,
        Commands::Add(args) => entry::execute_add(args, store).await,
        Commands::List(args) => entry::execute_list(args, store).await,
        Commands::Show(args) => entry::execute_show(args, store).await,
        Commands::Update(args) => entry::execute_update(args, store).await,
        Commands::Remove(args) => entry::execute_remove(args, store).await,
        Commands::Config(args) => config::execute(args).await,
    }
}
