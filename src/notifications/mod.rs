// Outbound notifications - enquiry emails are rendered here and handed to a sink
pub mod sink;
pub mod template;

pub use sink::{LogSink, NotificationSink, OutboxSink, OutgoingMessage};
pub use template::{EnquiryDetails, EnquiryTemplate};
