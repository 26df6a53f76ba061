use thiserror::Error;

/// A single failed field check, keyed by the wire name of the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Item store specific errors
#[derive(Error, Debug)]
pub enum ItemError {
    /// No record with that id
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Id is not in the store's identifier format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// One or more fields failed validation; every failing field is listed
    #[error("Validation failed: {}", field_names(.0))]
    Validation(Vec<FieldViolation>),
}

fn field_names(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.field)
        .collect::<Vec<_>>()
        .join(", ")
}
