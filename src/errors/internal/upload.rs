use thiserror::Error;

/// Upload shape rejections, raised before anything touches the store
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Only image files are allowed: {field} has content type '{content_type}'")]
    UnsupportedMediaType {
        field: String,
        content_type: String,
    },

    #[error("File too large: {field} is {size} bytes (limit {limit} bytes)")]
    PayloadTooLarge {
        field: String,
        size: usize,
        limit: usize,
    },

    #[error("Too many files: {field} accepts at most {limit}, got {count}")]
    TooManyFiles {
        field: String,
        count: usize,
        limit: usize,
    },
}
