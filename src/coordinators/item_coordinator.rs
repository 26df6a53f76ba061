use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::services::ImageLifecycleManager;
use crate::stores::ItemStore;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{ImageUploads, Item, ItemFields};

/// Item coordinator that orchestrates create/update/delete workflows
///
/// Every mutation follows the same order: stage new files, write the record,
/// then either clean up stale files (success) or the staged ones (failure).
/// Old files are only removed once the new record state is committed.
pub struct ItemCoordinator {
    item_store: Arc<ItemStore>,
    image_manager: Arc<ImageLifecycleManager>,
}

impl ItemCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            item_store: app_data.item_store.clone(),
            image_manager: app_data.image_manager.clone(),
        }
    }

    /// All items, newest first
    pub async fn list_items(&self, ctx: &RequestContext) -> Result<Vec<Item>, InternalError> {
        let items = self.item_store.list().await?;

        tracing::debug!("[{}] Listed {} items", ctx.request_id, items.len());

        Ok(items)
    }

    pub async fn get_item(&self, ctx: &RequestContext, id: &str) -> Result<Item, InternalError> {
        let item = self.item_store.get(id).await?;

        tracing::debug!("[{}] Fetched item {}", ctx.request_id, item.id);

        Ok(item)
    }

    /// Orchestrate item creation
    ///
    /// 1. Reject bad uploads before any write
    /// 2. Stage every uploaded file
    /// 3. Validate and insert the record
    /// 4. On any store failure, remove the staged files
    ///
    /// # Returns
    /// * `Ok(Item)` - The stored item
    /// * `Err(InternalError)` - Upload rejected, validation failed, or storage/database error
    pub async fn create_item(
        &self,
        ctx: &RequestContext,
        fields: ItemFields,
        uploads: ImageUploads,
    ) -> Result<Item, InternalError> {
        let staged = self.image_manager.stage(&uploads).await?;

        let result = self.item_store.create(fields.into_draft(&staged)).await;
        let item = self.image_manager.resolve_create(&staged, result).await.map_err(|e| {
            tracing::info!("[{}] Item creation by {} rejected: {}", ctx.request_id, ctx.actor_id, e);
            e
        })?;

        tracing::info!(
            "[{}] Item {} ('{}') created by {}",
            ctx.request_id,
            item.id,
            item.name,
            ctx.actor_id
        );

        Ok(item)
    }

    /// Orchestrate a partial update
    ///
    /// 1. Load the current record (InvalidId/NotFound before touching files)
    /// 2. Stage uploaded replacements
    /// 3. Apply the supplied fields
    /// 4. On success remove files the record no longer references;
    ///    on failure remove only the newly staged files
    pub async fn update_item(
        &self,
        ctx: &RequestContext,
        id: &str,
        fields: ItemFields,
        uploads: ImageUploads,
    ) -> Result<Item, InternalError> {
        let previous = self.item_store.get(id).await?;
        let staged = self.image_manager.stage(&uploads).await?;

        let result = self.item_store.update(&previous.id, fields.into_patch(&staged)).await;
        let item = self
            .image_manager
            .resolve_update(&previous, &staged, result)
            .await
            .map_err(|e| {
                tracing::info!("[{}] Update of item {} rejected: {}", ctx.request_id, previous.id, e);
                e
            })?;

        tracing::info!(
            "[{}] Item {} updated by {} (new cover: {}, new additional set: {})",
            ctx.request_id,
            item.id,
            ctx.actor_id,
            staged.cover.is_some(),
            staged.additional.is_some()
        );

        Ok(item)
    }

    /// Delete the record, then remove its files best-effort
    pub async fn delete_item(&self, ctx: &RequestContext, id: &str) -> Result<Item, InternalError> {
        let removed = self.item_store.delete(id).await?;
        self.image_manager.resolve_delete(&removed).await;

        tracing::info!(
            "[{}] Item {} ('{}') deleted by {}",
            ctx.request_id,
            removed.id,
            removed.name,
            ctx.actor_id
        );

        Ok(removed)
    }
}
