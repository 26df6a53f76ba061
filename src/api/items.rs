use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::helpers::read_item_form;
use crate::app_data::AppData;
use crate::coordinators::ItemCoordinator;
use crate::errors::CatalogError;
use crate::services::UploadLimits;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::items::{CreateItemApiResponse, ItemEnvelope, ItemForm, ItemListEnvelope};
use crate::types::internal::context::RequestContext;

/// Item catalog endpoints
pub struct ItemsApi {
    coordinator: Arc<ItemCoordinator>,
    limits: UploadLimits,
}

impl ItemsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            limits: app_data.image_manager.limits(),
            coordinator: Arc::new(ItemCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum ApiTags {
    /// Item management endpoints
    Items,
}

#[OpenApi]
impl ItemsApi {
    /// List all items, newest first
    #[oai(path = "/items", method = "get", tag = "ApiTags::Items")]
    async fn list_items(&self, req: &Request) -> Result<Json<ItemListEnvelope>, CatalogError> {
        let ctx = RequestContext::from_request(req);
        let items = self.coordinator.list_items(&ctx).await?;

        Ok(Json(ItemListEnvelope::new("Items retrieved successfully", items)))
    }

    /// Get one item by id
    #[oai(path = "/items/:id", method = "get", tag = "ApiTags::Items")]
    async fn get_item(&self, req: &Request, id: Path<String>) -> Result<Json<ItemEnvelope>, CatalogError> {
        let ctx = RequestContext::from_request(req);
        let item = self.coordinator.get_item(&ctx, &id.0).await?;

        Ok(Json(ItemEnvelope::new("Item retrieved successfully", item)))
    }

    /// Create an item from a multipart form
    ///
    /// Requires `name`, `type`, `description` and one `coverImage`; accepts up
    /// to five `additionalImages`.
    #[oai(path = "/items", method = "post", tag = "ApiTags::Items")]
    async fn create_item(
        &self,
        req: &Request,
        form: ItemForm,
    ) -> Result<CreateItemApiResponse, CatalogError> {
        let ctx = RequestContext::from_request(req);
        let (fields, uploads) = read_item_form(form, self.limits).await?;

        let item = self.coordinator.create_item(&ctx, fields, uploads).await?;

        Ok(CreateItemApiResponse::Created(Json(ItemEnvelope::new(
            "Item successfully added",
            item,
        ))))
    }

    /// Update any subset of an item's fields and images
    ///
    /// A new `coverImage` replaces the old cover; any `additionalImages`
    /// replace the whole additional set.
    #[oai(path = "/items/:id", method = "put", tag = "ApiTags::Items")]
    async fn update_item(
        &self,
        req: &Request,
        id: Path<String>,
        form: ItemForm,
    ) -> Result<Json<ItemEnvelope>, CatalogError> {
        let ctx = RequestContext::from_request(req);
        let (fields, uploads) = read_item_form(form, self.limits).await?;

        let item = self.coordinator.update_item(&ctx, &id.0, fields, uploads).await?;

        Ok(Json(ItemEnvelope::new("Item updated successfully", item)))
    }

    /// Delete an item and its image files
    #[oai(path = "/items/:id", method = "delete", tag = "ApiTags::Items")]
    async fn delete_item(&self, req: &Request, id: Path<String>) -> Result<Json<MessageResponse>, CatalogError> {
        let ctx = RequestContext::from_request(req);
        self.coordinator.delete_item(&ctx, &id.0).await?;

        Ok(Json(MessageResponse {
            success: true,
            message: "Item deleted successfully".to_string(),
        }))
    }
}
