use std::sync::Arc;

use clap::Parser;

use catalog_backend::cli::{execute_command, Cli};
use catalog_backend::config::{init_logging, BootstrapSettings, LoggingConfig, SystemEnvironment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; real environment variables take precedence
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let env_provider = Arc::new(SystemEnvironment);
    let settings = BootstrapSettings::from_env_provider(env_provider.clone())?;

    init_logging(&LoggingConfig::from_env_provider(env_provider))?;
    tracing::debug!("Loaded settings: {:?}", settings);

    if let Err(e) = execute_command(cli, &settings).await {
        tracing::error!("{}", e);
        return Err(e);
    }

    Ok(())
}
