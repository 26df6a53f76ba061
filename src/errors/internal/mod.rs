use thiserror::Error;

pub mod database;
pub mod item;
pub mod notification;
pub mod storage;
pub mod upload;

pub use database::DatabaseError;
pub use item::{FieldViolation, ItemError};
pub use notification::NotificationError;
pub use storage::StorageError;
pub use upload::UploadError;

/// Internal error type for store, service and coordinator operations
///
/// Infrastructure errors (database, parse) are shared; domain errors are grouped per concern.
/// Not exposed via API - endpoints convert through `CatalogError::from_internal_error`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error(transparent)]
    Item(#[from] ItemError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> InternalError {
        InternalError::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }
}
