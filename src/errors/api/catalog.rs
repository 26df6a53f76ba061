use crate::errors::internal::{InternalError, ItemError, NotificationError, UploadError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Catalog API error responses
///
/// Every variant carries the same envelope: `success: false`, a human-readable
/// message, and a stable `error` classification.
#[derive(ApiResponse, Debug)]
pub enum CatalogError {
    /// One or more fields failed validation
    #[oai(status = 400)]
    ValidationFailed(Json<ErrorResponse>),

    /// Malformed item id
    #[oai(status = 400)]
    InvalidId(Json<ErrorResponse>),

    /// More files than a field accepts
    #[oai(status = 400)]
    TooManyFiles(Json<ErrorResponse>),

    /// Item not found
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Uploaded file exceeds the size ceiling
    #[oai(status = 413)]
    PayloadTooLarge(Json<ErrorResponse>),

    /// Uploaded file is not an image
    #[oai(status = 415)]
    UnsupportedMediaType(Json<ErrorResponse>),

    /// Enquiry notification could not be sent
    #[oai(status = 500)]
    NotificationFailed(Json<ErrorResponse>),

    /// Reading or writing the content directory failed
    #[oai(status = 500)]
    StorageFailure(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn envelope(error: &str, message: impl Into<String>, status_code: u16) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        success: false,
        message: message.into(),
        error: error.to_string(),
        errors: None,
        diagnostic: None,
        status_code,
    })
}

impl CatalogError {
    /// Create a ValidationFailed error listing every failing field message
    pub fn validation_failed(errors: Vec<String>) -> Self {
        let mut body = envelope("validation_error", "Validation Error", 400);
        body.0.errors = Some(errors);
        CatalogError::ValidationFailed(body)
    }

    /// Create an InvalidId error
    pub fn invalid_id() -> Self {
        CatalogError::InvalidId(envelope("invalid_id", "Invalid ID format", 400))
    }

    /// Create a NotFound error
    pub fn not_found() -> Self {
        CatalogError::NotFound(envelope("not_found", "Item not found", 404))
    }

    pub fn too_many_files(message: String) -> Self {
        CatalogError::TooManyFiles(envelope("too_many_files", message, 400))
    }

    pub fn payload_too_large(message: String) -> Self {
        CatalogError::PayloadTooLarge(envelope("payload_too_large", message, 413))
    }

    pub fn unsupported_media_type() -> Self {
        CatalogError::UnsupportedMediaType(envelope(
            "unsupported_media_type",
            "Only image files are allowed!",
            415,
        ))
    }

    pub fn notification_failed(message: impl Into<String>, diagnostic: Option<String>) -> Self {
        let mut body = envelope("notification_failed", message, 500);
        body.0.diagnostic = diagnostic;
        CatalogError::NotificationFailed(body)
    }

    fn storage_failure() -> Self {
        CatalogError::StorageFailure(envelope(
            "storage_io_error",
            "Failed to store or remove an image file",
            500,
        ))
    }

    /// Generic internal error; never carries internal details
    fn internal_server_error() -> Self {
        CatalogError::InternalError(envelope(
            "internal_error",
            "Internal Server Error",
            500,
        ))
    }

    /// Convert InternalError to CatalogError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Infrastructure details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Item(ItemError::NotFound(_)) => Self::not_found(),
            InternalError::Item(ItemError::InvalidId(id)) => {
                tracing::debug!("Rejected malformed item id: {}", id);
                Self::invalid_id()
            }
            InternalError::Item(ItemError::Validation(violations)) => Self::validation_failed(
                violations.iter().map(|v| v.message.clone()).collect(),
            ),

            InternalError::Upload(UploadError::UnsupportedMediaType { .. }) => {
                Self::unsupported_media_type()
            }
            InternalError::Upload(UploadError::PayloadTooLarge { limit, .. }) => {
                Self::payload_too_large(format!(
                    "File too large. Maximum size is {} bytes per file",
                    limit
                ))
            }
            InternalError::Upload(UploadError::TooManyFiles { field, limit, .. }) => {
                Self::too_many_files(format!(
                    "Too many files for {}. At most {} allowed",
                    field, limit
                ))
            }

            InternalError::Notification(NotificationError::NotConfigured) => {
                Self::notification_failed(err.to_string(), None)
            }
            InternalError::Notification(_) => {
                tracing::error!("Notification error: {}", err);
                Self::notification_failed(
                    "Failed to send enquiry email. Please try again later.",
                    Some(err.to_string()),
                )
            }

            InternalError::Storage(_) => {
                tracing::error!("Storage error: {}", err);
                Self::storage_failure()
            }

            InternalError::Database(_) | InternalError::Parse { .. } => {
                tracing::error!("Internal error in catalog operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    fn body(&self) -> &ErrorResponse {
        match self {
            CatalogError::ValidationFailed(json)
            | CatalogError::InvalidId(json)
            | CatalogError::TooManyFiles(json)
            | CatalogError::NotFound(json)
            | CatalogError::PayloadTooLarge(json)
            | CatalogError::UnsupportedMediaType(json)
            | CatalogError::NotificationFailed(json)
            | CatalogError::StorageFailure(json)
            | CatalogError::InternalError(json) => &json.0,
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.body().message.clone()
    }

    /// Get the stable error classification
    pub fn classification(&self) -> &str {
        &self.body().error
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        self.body().status_code
    }

    /// Per-field messages, present on validation failures only
    pub fn field_errors(&self) -> Option<&[String]> {
        self.body().errors.as_deref()
    }
}

impl From<InternalError> for CatalogError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
