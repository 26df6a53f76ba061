use thiserror::Error;

/// Notification sink errors (enquiry path only)
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Email configuration not set up properly")]
    NotConfigured,

    #[error("Failed to render notification: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Failed to deliver notification: {0}")]
    Delivery(String),
}
