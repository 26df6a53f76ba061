use poem_openapi::Object;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Always true when the service answers
    pub success: bool,

    /// Status message
    pub message: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Success envelope without a data payload
#[derive(Object, Debug)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Standardized error response model
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,

    /// Human-readable error message
    pub message: String,

    /// Stable error classification (e.g. `validation_error`)
    pub error: String,

    /// Per-field messages for validation failures
    #[oai(skip_serializing_if_is_none)]
    pub errors: Option<Vec<String>>,

    /// Optional diagnostic detail
    #[oai(skip_serializing_if_is_none)]
    pub diagnostic: Option<String>,

    /// HTTP status code
    pub status_code: u16,
}
