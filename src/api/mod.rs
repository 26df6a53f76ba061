// API layer - HTTP endpoints
pub mod enquiry;
pub mod health;
pub mod helpers;
pub mod items;
pub mod seed;

use std::sync::Arc;

use poem::endpoint::StaticFilesEndpoint;
use poem::error::{NotFoundError, ResponseError};
use poem::http::{header, StatusCode};
use poem::middleware::{Cors, Tracing};
use poem::{Endpoint, EndpointExt, IntoResponse, Request, Response, Route};
use poem_openapi::error::{
    ContentTypeError, ParseMultipartError, ParseParamError, ParseRequestPayloadError,
};
use poem_openapi::{OpenApi, OpenApiService};

pub use enquiry::EnquiryApi;
pub use health::HealthApi;
pub use items::ItemsApi;
pub use seed::SeedApi;

use crate::app_data::AppData;
use crate::errors::CatalogError;
use crate::types::dto::common::ErrorResponse;

const API_TITLE: &str = "Catalog API";

/// Room for text fields and multipart framing on top of the file slots
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

fn mount<T: OpenApi + 'static>(service: OpenApiService<T, ()>) -> Route {
    let ui = service.swagger_ui();
    let spec = service.spec_endpoint();

    Route::new()
        .nest("/api", service)
        .nest("/swagger", ui)
        .at("/openapi.json", spec)
}

fn route_not_found() -> Response {
    poem::web::Json(serde_json::json!({
        "success": false,
        "message": "Route not found",
    }))
    .with_status(StatusCode::NOT_FOUND)
    .into_response()
}

/// Error envelope for requests poem-openapi could not parse
fn request_rejected(err: &(impl ResponseError + std::fmt::Display), error: &str) -> Response {
    let status = err.status();
    tracing::debug!("Rejected request ({}): {}", error, err);

    poem_openapi::payload::Json(ErrorResponse {
        success: false,
        message: err.to_string(),
        error: error.to_string(),
        errors: None,
        diagnostic: None,
        status_code: status.as_u16(),
    })
    .with_status(status)
    .into_response()
}

fn declared_length(req: &Request) -> Option<usize> {
    req.headers()
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Compose the full application
///
/// `/api` (OpenAPI endpoints), `/swagger`, `/openapi.json` and `/uploads`
/// (static files from the content directory). Unknown routes and unparseable
/// requests answer the JSON error envelope. Bodies declaring more than every
/// file slot at the size ceiling are refused before they are read.
pub fn build_routes(app_data: Arc<AppData>, server_url: &str) -> impl Endpoint {
    let version = env!("CARGO_PKG_VERSION");
    let max_request_bytes = app_data
        .image_manager
        .limits()
        .max_request_bytes(FORM_OVERHEAD_BYTES);

    let routes = if app_data.enable_seed_route() {
        let service = OpenApiService::new(
            (
                HealthApi,
                ItemsApi::new(app_data.clone()),
                EnquiryApi::new(app_data.clone()),
                SeedApi::new(app_data.clone()),
            ),
            API_TITLE,
            version,
        )
        .server(server_url);
        mount(service)
    } else {
        let service = OpenApiService::new(
            (
                HealthApi,
                ItemsApi::new(app_data.clone()),
                EnquiryApi::new(app_data.clone()),
            ),
            API_TITLE,
            version,
        )
        .server(server_url);
        mount(service)
    };

    routes
        .nest("/uploads", StaticFilesEndpoint::new(app_data.upload_dir()))
        .around(move |ep, req| async move {
            if let Some(length) = declared_length(&req).filter(|len| *len > max_request_bytes) {
                tracing::info!("Refused request body of {} bytes (limit {})", length, max_request_bytes);
                return Ok(CatalogError::payload_too_large(format!(
                    "Request body too large. Maximum size is {} bytes",
                    max_request_bytes
                ))
                .into_response());
            }
            ep.call(req).await.map(IntoResponse::into_response)
        })
        .catch_error(|_: NotFoundError| async move { route_not_found() })
        .catch_error(|err: ContentTypeError| async move {
            request_rejected(&err, "unsupported_content_type")
        })
        .catch_error(|err: ParseRequestPayloadError| async move {
            request_rejected(&err, "invalid_request_body")
        })
        .catch_error(|err: ParseMultipartError| async move {
            request_rejected(&err, "invalid_request_body")
        })
        .catch_error(|err: ParseParamError| async move {
            request_rejected(&err, "invalid_request")
        })
        .with(Cors::new())
        .with(Tracing)
}
