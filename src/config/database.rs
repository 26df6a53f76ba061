use migration::{CatalogMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::BootstrapSettings;
use crate::errors::InternalError;

/// Database handles owned by main and shared through AppData
#[derive(Clone)]
pub struct DatabaseConnections {
    pub catalog: DatabaseConnection,
}

impl DatabaseConnections {
    /// Connect to the item store database
    ///
    /// Does NOT run migrations; call `migrate()` separately.
    pub async fn init(settings: &BootstrapSettings) -> Result<Self, InternalError> {
        let database_url = settings.database_url();

        let catalog = Database::connect(database_url)
            .await
            .map_err(|e| InternalError::database("connect_database", e))?;

        tracing::debug!("Connected to catalog database: {}", database_url);

        Ok(Self { catalog })
    }

    pub fn from_connection(catalog: DatabaseConnection) -> Self {
        Self { catalog }
    }

    pub async fn migrate(&self) -> Result<(), InternalError> {
        migrate_catalog_database(&self.catalog).await
    }

    /// Close every connection; used at shutdown
    pub async fn close(self) -> Result<(), InternalError> {
        self.catalog
            .close()
            .await
            .map_err(|e| InternalError::database("close_database", e))?;

        tracing::debug!("Catalog database connection closed");

        Ok(())
    }
}

/// Run all pending migrations on the catalog database
///
/// # Returns
/// * `Ok(())` - Migrations completed successfully
/// * `Err(InternalError)` - Migration failed
pub async fn migrate_catalog_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    CatalogMigrator::up(db, None)
        .await
        .map_err(|e| InternalError::database("run_migrations", e))?;

    tracing::debug!("Catalog database migrations completed");

    Ok(())
}
