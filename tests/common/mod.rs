// Common test utilities for integration tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use catalog_backend::app_data::AppData;
use catalog_backend::config::{DatabaseConnections, MailSettings};
use catalog_backend::errors::internal::NotificationError;
use catalog_backend::notifications::{NotificationSink, OutgoingMessage};
use catalog_backend::services::UploadLimits;
use catalog_backend::stores::LocalContentStore;
use migration::{CatalogMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tempfile::TempDir;

/// Creates a test catalog database with migrations applied
pub async fn setup_test_catalog_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    CatalogMigrator::up(&db, None)
        .await
        .expect("Failed to run catalog migrations");

    db
}

/// Knobs for building a test application
pub struct TestAppOptions {
    pub mail: MailSettings,
    pub sink: Arc<MemorySink>,
    pub max_file_bytes: usize,
    pub enable_seed_route: bool,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            mail: MailSettings::new("shop@example.com", "owner@example.com"),
            sink: Arc::new(MemorySink::default()),
            max_file_bytes: UploadLimits::default().max_file_bytes,
            enable_seed_route: true,
        }
    }
}

/// A fully wired application over a temporary content directory
///
/// Keep the struct alive for the duration of the test; dropping it removes
/// the directory.
pub struct TestApp {
    pub app_data: Arc<AppData>,
    pub sink: Arc<MemorySink>,
    pub dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_options(TestAppOptions::default()).await
    }

    pub async fn with_options(options: TestAppOptions) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let connections = DatabaseConnections::from_connection(setup_test_catalog_db().await);
        let content_store = Arc::new(
            LocalContentStore::open(dir.path().join("uploads"))
                .await
                .expect("Failed to open content directory"),
        );
        let sink: Arc<dyn NotificationSink> = options.sink.clone();

        let app_data = AppData::assemble(
            connections,
            content_store,
            sink,
            options.mail,
            UploadLimits {
                max_file_bytes: options.max_file_bytes,
            },
            options.enable_seed_route,
        );

        Self {
            app_data: Arc::new(app_data),
            sink: options.sink,
            dir,
        }
    }

    /// Sorted names of every file in the content directory
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.app_data.upload_dir())
            .expect("Failed to read content directory")
            .map(|entry| {
                entry
                    .expect("Failed to read directory entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
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
