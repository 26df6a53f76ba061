use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::database::DatabaseConnections;
use crate::config::{BootstrapSettings, MailSettings};
use crate::errors::InternalError;
use crate::notifications::{LogSink, NotificationSink, OutboxSink};
use crate::services::{EnquiryNotifier, ImageLifecycleManager, UploadLimits};
use crate::stores::{ContentStore, ItemStore, LocalContentStore};

/// Centralized application data following the main-owned stores pattern
///
/// Everything with a lifecycle (database connection, content directory,
/// notification sink) is opened once in main and shared with coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(connections, settings)
///   ├─ connections (DatabaseConnections)
///   ├─ item_store (Arc<ItemStore>)
///   ├─ image_manager (Arc<ImageLifecycleManager>) → LocalContentStore(upload_dir)
///   └─ notifier (Arc<EnquiryNotifier>) → OutboxSink | LogSink
///   ↓ wrapped in Arc<AppData>
///   ├─ ItemCoordinator::new(app_data)
///   ├─ EnquiryCoordinator::new(app_data)
///   └─ SeedCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub connections: DatabaseConnections,
    pub item_store: Arc<ItemStore>,
    pub image_manager: Arc<ImageLifecycleManager>,
    pub notifier: Arc<EnquiryNotifier>,
    upload_dir: PathBuf,
    enable_seed_route: bool,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database should be connected and migrated before calling this.
    /// Opens (and creates if missing) the content directory.
    pub async fn init(
        connections: DatabaseConnections,
        settings: &BootstrapSettings,
    ) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        let content_store = Arc::new(LocalContentStore::open(settings.upload_dir()).await?);

        let sink: Arc<dyn NotificationSink> = match settings.mail_outbox_dir() {
            Some(dir) => {
                tracing::info!("Enquiry notifications will be written to {}", dir.display());
                Arc::new(OutboxSink::new(dir))
            }
            None => {
                tracing::info!("No mail outbox configured; enquiry notifications will be logged");
                Arc::new(LogSink)
            }
        };

        if !settings.mail().is_configured() {
            tracing::warn!("EMAIL_USER/EMAIL_TO not set; enquiries will be rejected");
        }

        let app_data = Self::assemble(
            connections,
            content_store,
            sink,
            settings.mail().clone(),
            UploadLimits {
                max_file_bytes: settings.max_upload_bytes(),
            },
            settings.enable_seed_route(),
        );

        tracing::info!("AppData initialization complete");

        Ok(app_data)
    }

    /// Wire AppData from already-opened parts
    pub fn assemble(
        connections: DatabaseConnections,
        content_store: Arc<LocalContentStore>,
        sink: Arc<dyn NotificationSink>,
        mail: MailSettings,
        limits: UploadLimits,
        enable_seed_route: bool,
    ) -> Self {
        let upload_dir = content_store.root().to_path_buf();
        let item_store = Arc::new(ItemStore::new(connections.catalog.clone()));
        let content_store: Arc<dyn ContentStore> = content_store;
        let image_manager = Arc::new(ImageLifecycleManager::new(content_store, limits));
        let notifier = Arc::new(EnquiryNotifier::new(sink, mail));

        Self {
            connections,
            item_store,
            image_manager,
            notifier,
            upload_dir,
            enable_seed_route,
        }
    }

    /// Directory served under `/uploads`
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn enable_seed_route(&self) -> bool {
        self.enable_seed_route
    }
}
