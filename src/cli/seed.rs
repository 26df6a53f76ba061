use std::sync::Arc;

use crate::app_data::AppData;
use crate::config::{BootstrapSettings, DatabaseConnections};
use crate::coordinators::SeedCoordinator;
use crate::types::internal::context::RequestContext;

/// Replace the catalog with the sample items from the command line
pub async fn run_seed(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    let connections = DatabaseConnections::init(settings).await?;
    connections.migrate().await?;

    let app_data = Arc::new(AppData::init(connections.clone(), settings).await?);
    let ctx = RequestContext::for_cli("seed");

    let items = SeedCoordinator::new(app_data).seed_catalog(&ctx).await?;

    for item in &items {
        println!("  {}  {:<12} {}", item.id, item.item_type.as_str(), item.name);
    }
    println!("Seeded {} items", items.len());

    connections.close().await?;

    Ok(())
}
