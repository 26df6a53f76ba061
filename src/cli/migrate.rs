use crate::config::{BootstrapSettings, DatabaseConnections};

/// Connect to the catalog database and apply all pending migrations
///
/// Does not open the content directory or build AppData.
pub async fn run_migrations(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let connections = DatabaseConnections::init(settings).await?;
    connections.migrate().await?;
    connections.close().await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
