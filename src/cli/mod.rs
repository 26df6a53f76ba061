// CLI module - process entry points

pub mod migrate;
pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::BootstrapSettings;

/// Catalog backend: item catalog REST API with image uploads and enquiries
#[derive(Parser, Debug)]
#[command(name = "catalog-backend")]
#[command(about = "Catalog backend REST API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Replace the catalog with sample items and exit
    Seed,
}

/// Execute CLI command
///
/// Routes the parsed command to its handler. Logging must already be initialized.
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed
pub async fn execute_command(
    cli: Cli,
    settings: &BootstrapSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_server(settings).await?,
        Commands::Migrate => migrate::run_migrations(settings).await?,
        Commands::Seed => seed::run_seed(settings).await?,
    }

    Ok(())
}
