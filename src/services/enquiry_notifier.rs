use std::sync::Arc;

use chrono::Utc;

use crate::config::MailSettings;
use crate::errors::internal::NotificationError;
use crate::notifications::{EnquiryDetails, EnquiryTemplate, NotificationSink, OutgoingMessage};
use crate::types::internal::Item;

/// Turns an enquiry about an item into a message for the catalog owner
pub struct EnquiryNotifier {
    sink: Arc<dyn NotificationSink>,
    template: EnquiryTemplate,
    mail: MailSettings,
}

impl EnquiryNotifier {
    pub fn new(sink: Arc<dyn NotificationSink>, mail: MailSettings) -> Self {
        Self {
            sink,
            template: EnquiryTemplate::new(),
            mail,
        }
    }

    fn addresses(&self) -> Result<(&str, &str), NotificationError> {
        match (self.mail.from.as_deref(), self.mail.to.as_deref()) {
            (Some(from), Some(to)) => Ok((from, to)),
            _ => Err(NotificationError::NotConfigured),
        }
    }

    /// Render and dispatch an enquiry notification
    ///
    /// Fails with `NotConfigured` before rendering when sender or recipient
    /// is missing. Nothing is retried.
    pub async fn send_enquiry(
        &self,
        item: &Item,
        details: &EnquiryDetails,
    ) -> Result<(), NotificationError> {
        let (from, to) = self.addresses()?;

        let message = OutgoingMessage {
            from: from.to_string(),
            to: to.to_string(),
            subject: EnquiryTemplate::enquiry_subject(item),
            html_body: self.template.render_enquiry(item, details, Utc::now())?,
        };

        self.sink.send(&message).await?;

        tracing::info!("Enquiry notification sent for item {}", item.id);

        Ok(())
    }

    /// Send a fixed test message to check the notification path
    pub async fn send_test(&self) -> Result<(), NotificationError> {
        let (from, to) = self.addresses()?;

        let message = OutgoingMessage {
            from: from.to_string(),
            to: to.to_string(),
            subject: EnquiryTemplate::test_subject().to_string(),
            html_body: self.template.render_test(Utc::now())?,
        };

        self.sink.send(&message).await?;

        tracing::info!("Test notification sent to {}", to);

        Ok(())
    }
}
