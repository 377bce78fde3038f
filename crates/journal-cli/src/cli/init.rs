use anyhow::Result;
use clap::Args;
use journal::services::ConfigService;
use std::path::PathBuf;

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,

    /// Project root directory
    #[arg(default_value = ".")]
    path: PathBuf,
}

pub async fn execute(args: InitArgs) -> Result<()> {
    let project_root = args.path;
    let config_service = ConfigService::new(&project_root);

    if config_service.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Journal already initialized at {}. Use --force to overwrite.",
            config_service.config_path().display()
        ));
    }

    let config = config_service.init()?;
    let storage_path = config_service.resolve_storage_path(&config);

    println!("Initialized journal at {}", project_root.display());
    println!("  Config: {}", config_service.config_path().display());
    println!("  Storage: {}", storage_path.display());
    println!("  Server: {}", config.server.bind);

    Ok(())
}
