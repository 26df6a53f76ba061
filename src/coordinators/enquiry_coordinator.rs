use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::notifications::EnquiryDetails;
use crate::services::EnquiryNotifier;
use crate::stores::ItemStore;
use crate::types::internal::context::RequestContext;
use crate::types::internal::Item;

/// Enquiry coordinator: reads an item and notifies the catalog owner
///
/// Never mutates item state, whatever the sink does.
pub struct EnquiryCoordinator {
    item_store: Arc<ItemStore>,
    notifier: Arc<EnquiryNotifier>,
}

impl EnquiryCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            item_store: app_data.item_store.clone(),
            notifier: app_data.notifier.clone(),
        }
    }

    /// Send an enquiry about one item
    ///
    /// # Returns
    /// * `Ok(Item)` - The item the enquiry was about
    /// * `Err(InternalError)` - InvalidId/NotFound, or a notification failure
    pub async fn submit_enquiry(
        &self,
        ctx: &RequestContext,
        id: &str,
        details: EnquiryDetails,
    ) -> Result<Item, InternalError> {
        let item = self.item_store.get(id).await?;

        self.notifier.send_enquiry(&item, &details).await.map_err(|e| {
            tracing::error!("[{}] Enquiry for item {} not sent: {}", ctx.request_id, item.id, e);
            e
        })?;

        tracing::info!("[{}] Enquiry for item {} sent on behalf of {}", ctx.request_id, item.id, ctx.actor_id);

        Ok(item)
    }

    pub async fn send_test(&self, ctx: &RequestContext) -> Result<(), InternalError> {
        self.notifier.send_test().await.map_err(|e| {
            tracing::error!("[{}] Test notification not sent: {}", ctx.request_id, e);
            e
        })?;
        Ok(())
    }
}
