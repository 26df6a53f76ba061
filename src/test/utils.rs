// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use migration::{CatalogMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tempfile::TempDir;

use crate::app_data::AppData;
use crate::config::{DatabaseConnections, MailSettings};
use crate::errors::internal::NotificationError;
use crate::notifications::{NotificationSink, OutgoingMessage};
use crate::services::UploadLimits;
use crate::stores::LocalContentStore;

/// Creates an in-memory catalog database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    CatalogMigrator::up(&db, None)
        .await
        .expect("Failed to run catalog migrations");

    db
}

/// Creates AppData over an in-memory database and a content directory in `dir`
///
/// Mail is configured and delivered to the returned MemorySink.
pub async fn setup_test_app_data(dir: &TempDir) -> (Arc<AppData>, Arc<MemorySink>) {
    let connections = DatabaseConnections::from_connection(setup_test_db().await);
    let content_store = Arc::new(
        LocalContentStore::open(dir.path().join("uploads"))
            .await
            .expect("Failed to open content directory"),
    );
    let sink = Arc::new(MemorySink::default());

    let app_data = AppData::assemble(
        connections,
        content_store,
        sink.clone(),
        MailSettings::new("shop@example.com", "owner@example.com"),
        UploadLimits::default(),
        true,
    );

    (Arc::new(app_data), sink)
}

/// Keeps sent messages in memory
///
/// Optionally fails every send with a fixed reason.
#[derive(Debug, Default)]
pub struct MemorySink {
    sent: Mutex<Vec<OutgoingMessage>>,
    failure: Option<String>,
}

impl MemorySink {
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(reason.into()),
        }
    }

    /// Messages accepted so far, oldest first
    pub fn messages(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for MemorySink {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), NotificationError> {
        if let Some(reason) = &self.failure {
            return Err(NotificationError::Delivery(reason.clone()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
