use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::app_data::AppData;
use crate::coordinators::EnquiryCoordinator;
use crate::errors::CatalogError;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::enquiry::EnquiryRequest;
use crate::types::internal::context::RequestContext;

/// Visitor enquiry endpoints
pub struct EnquiryApi {
    coordinator: Arc<EnquiryCoordinator>,
}

impl EnquiryApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            coordinator: Arc::new(EnquiryCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum ApiTags {
    /// Enquiry notification endpoints
    Enquiry,
}

#[OpenApi]
impl EnquiryApi {
    /// Send an enquiry about an item to the catalog owner
    #[oai(path = "/enquiry/:id", method = "post", tag = "ApiTags::Enquiry")]
    async fn submit_enquiry(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<EnquiryRequest>,
    ) -> Result<Json<MessageResponse>, CatalogError> {
        let ctx = RequestContext::from_request(req);
        self.coordinator
            .submit_enquiry(&ctx, &id.0, body.0.into())
            .await?;

        Ok(Json(MessageResponse {
            success: true,
            message: "Enquiry sent successfully! We will get back to you soon.".to_string(),
        }))
    }

    /// Send a test notification
    #[oai(path = "/enquiry/test", method = "get", tag = "ApiTags::Enquiry")]
    async fn send_test(&self, req: &Request) -> Result<Json<MessageResponse>, CatalogError> {
        let ctx = RequestContext::from_request(req);
        self.coordinator.send_test(&ctx).await?;

        Ok(Json(MessageResponse {
            success: true,
            message: "Test email sent successfully!".to_string(),
        }))
    }
}
