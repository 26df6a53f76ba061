use std::sync::Arc;

use poem::Request;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::app_data::AppData;
use crate::coordinators::SeedCoordinator;
use crate::errors::CatalogError;
use crate::types::dto::items::ItemListEnvelope;
use crate::types::internal::context::RequestContext;

/// Sample-data endpoint; only mounted when ENABLE_SEED_ROUTE is set
pub struct SeedApi {
    coordinator: Arc<SeedCoordinator>,
}

impl SeedApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            coordinator: Arc::new(SeedCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum ApiTags {
    /// Development helpers
    Seed,
}

#[OpenApi]
impl SeedApi {
    /// Replace the catalog with the sample items
    #[oai(path = "/seed", method = "post", tag = "ApiTags::Seed")]
    async fn seed(&self, req: &Request) -> Result<Json<ItemListEnvelope>, CatalogError> {
        let ctx = RequestContext::from_request(req);
        let items = self.coordinator.seed_catalog(&ctx).await?;

        Ok(Json(ItemListEnvelope::new("Sample data seeded successfully", items)))
    }
}
