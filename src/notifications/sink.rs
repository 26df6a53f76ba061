use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use uuid::Uuid;

use crate::errors::internal::NotificationError;

/// A fully rendered message, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Delivery endpoint for rendered messages
///
/// The transport behind it is opaque to the rest of the service.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), NotificationError>;
}

/// Logs the envelope instead of delivering; used when no outbox is configured
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), NotificationError> {
        tracing::info!(
            from = %message.from,
            to = %message.to,
            subject = %message.subject,
            body_bytes = message.html_body.len(),
            "Notification logged (no outbox configured)"
        );
        Ok(())
    }
}

/// Collapse line breaks and other control characters so a value stays on its header line
fn header_value(value: &str) -> String {
    value
        .split(|c: char| c.is_control())
        .filter(|part| !part.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes each message as a `.eml` file into a pickup directory
#[derive(Debug, Clone)]
pub struct OutboxSink {
    dir: PathBuf,
}

impl OutboxSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn render_file(message: &OutgoingMessage) -> String {
        format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nDate: {}\r\nMIME-Version: 1.0\r\nContent-Type: text/html; charset=utf-8\r\n\r\n{}",
            header_value(&message.from),
            header_value(&message.to),
            header_value(&message.subject),
            Utc::now().to_rfc2822(),
            message.html_body
        )
    }
}

#[async_trait]
impl NotificationSink for OutboxSink {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), NotificationError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| NotificationError::Delivery(format!("outbox unavailable: {}", e)))?;

        let file_name = format!("{}-{}.eml", Utc::now().timestamp_millis(), Uuid::new_v4());
        let path = self.dir.join(&file_name);

        fs::write(&path, Self::render_file(message))
            .await
            .map_err(|e| NotificationError::Delivery(format!("failed to write {}: {}", file_name, e)))?;

        tracing::info!("Notification '{}' queued in outbox as {}", message.subject, file_name);
        Ok(())
    }
}
