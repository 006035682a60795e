//! EarthPicture CLI entry point.

use anyhow::Result;
use clap::Parser;

use earthpicture::cli::{commands, handle_error, Cli, Commands};
use earthpicture::{Config, ConfigLoader, CredentialsStore, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config: Config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(path) = cli.credentials {
        config.credentials_path = path;
    }

    let _logger = LoggerImpl::init(&config.logging)?;
    tracing::debug!(credentials = %config.credentials_path.display(), "configuration loaded");

    let store = CredentialsStore::new(&config.credentials_path);

    match cli.command {
        Commands::Credentials(args) => commands::credentials::execute(args, &store, cli.json),
        Commands::Missions => commands::missions::execute(&store, &config.hub, cli.json).await,
        Commands::Search(args) => {
            commands::search::execute(args, &store, &config.hub, cli.json).await
        }
    }
}
