use std::sync::Arc;
use std::time::Duration;

use poem::listener::TcpListener;
use poem::Server;

use crate::api::build_routes;
use crate::app_data::AppData;
use crate::config::{BootstrapSettings, DatabaseConnections};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Run the HTTP server until Ctrl-C
///
/// Startup order: connect, migrate, open content directory, build AppData,
/// bind. Connections are closed after the server stops.
pub async fn run_server(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    let connections = DatabaseConnections::init(settings).await?;
    connections.migrate().await?;

    let app_data = Arc::new(AppData::init(connections.clone(), settings).await?);

    let address = settings.server_address();
    let server_url = format!("http://{}/api", address);
    let app = build_routes(app_data, &server_url);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);
    tracing::info!("Uploaded images served from {}", settings.upload_dir().display());

    Server::new(TcpListener::bind(address))
        .run_with_graceful_shutdown(
            app,
            async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for shutdown signal: {}", e);
                    std::future::pending::<()>().await;
                }
                tracing::info!("Shutdown signal received");
            },
            Some(SHUTDOWN_GRACE),
        )
        .await?;

    connections.close().await?;
    tracing::info!("Server stopped");

    Ok(())
}
