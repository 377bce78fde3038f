use anyhow::Result;
use clap::{Args, Subcommand};
use journal::services::{ConfigService, CONFIG_KEYS};
use std::path::Path;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show every key with its effective value
    List,

    /// Print one value (storage.path, server.bind, server.static_dir)
    Get { key: String },

    /// Store a value in .journal/config.toml
    Set { key: String, value: String },

    /// Return a key to its default
    Unset { key: String },
}

pub async fn execute(args: ConfigArgs) -> Result<()> {
    let config_service = ConfigService::new(Path::new("."));

    match args.command {
        ConfigCommands::List => {
            let source = if config_service.exists() {
                config_service.config_path().display().to_string()
            } else {
                "defaults (no config file)".to_string()
            };
            println!("# {}", source);
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config_service.get(key)?);
            }
        },
        ConfigCommands::Get { key } => println!("{}", config_service.get(&key)?),
        ConfigCommands::Set { key, value } => {
            config_service.set(&key, value)?;
            println!("{} = {}", key, config_service.get(&key)?);
        },
        ConfigCommands::Unset { key } => {
            config_service.unset(&key)?;
            println!("{} reset to {:?}", key, config_service.get(&key)?);
        },
    }

    Ok(())
}
