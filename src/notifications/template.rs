use chrono::{DateTime, Utc};
use handlebars::Handlebars;
use serde::Serialize;

use crate::errors::internal::NotificationError;
use crate::types::internal::Item;

const ENQUIRY_TEMPLATE: &str = r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333; border-bottom: 2px solid #007bff; padding-bottom: 10px;">New Item Enquiry</h2>

  <div style="background-color: #f8f9fa; padding: 20px; border-radius: 5px; margin: 20px 0;">
    <h3 style="color: #007bff; margin-top: 0;">Item Details</h3>
    <p><strong>Item Name:</strong> {{item_name}}</p>
    <p><strong>Item Type:</strong> {{item_type}}</p>
    <p><strong>Description:</strong> {{item_description}}</p>
    <p><strong>Item ID:</strong> {{item_id}}</p>
  </div>
{{#if has_customer}}
  <div style="background-color: #e9ecef; padding: 20px; border-radius: 5px; margin: 20px 0;">
    <h3 style="color: #28a745; margin-top: 0;">Customer Information</h3>
    {{#if customer_name}}<p><strong>Name:</strong> {{customer_name}}</p>{{/if}}
    {{#if customer_email}}<p><strong>Email:</strong> {{customer_email}}</p>{{/if}}
    {{#if message}}<p><strong>Message:</strong><br>{{message}}</p>{{/if}}
  </div>
{{/if}}
  <div style="background-color: #fff3cd; padding: 20px; border-radius: 5px; margin: 20px 0;">
    <p><strong>Enquiry Date:</strong> {{enquiry_date}}</p>
    <p style="margin-bottom: 0;">Someone has shown interest in this item. Please follow up as soon as possible!</p>
  </div>

  <div style="text-align: center; margin-top: 30px; padding-top: 20px; border-top: 1px solid #dee2e6;">
    <p style="color: #6c757d; font-size: 14px;">This email was automatically generated from your catalog website.</p>
  </div>
</div>
"#;

const TEST_TEMPLATE: &str = r#"<h2>Test Email</h2>
<p>This is a test email to verify that the email system is working correctly.</p>
<p><strong>Timestamp:</strong> {{timestamp}}</p>
"#;

/// What a visitor told us about themselves; every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnquiryDetails {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub message: Option<String>,
}

#[derive(Serialize)]
struct EnquiryContext<'a> {
    item_name: &'a str,
    item_type: &'a str,
    item_description: &'a str,
    item_id: &'a str,
    has_customer: bool,
    customer_name: Option<&'a str>,
    customer_email: Option<&'a str>,
    message: Option<&'a str>,
    enquiry_date: String,
}

#[derive(Serialize)]
struct TestContext {
    timestamp: String,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Renders enquiry and test emails; values are HTML-escaped
pub struct EnquiryTemplate {
    handlebars: Handlebars<'static>,
}

impl EnquiryTemplate {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        Self { handlebars }
    }

    pub fn enquiry_subject(item: &Item) -> String {
        format!("New Enquiry for Item: {}", item.name)
    }

    pub fn test_subject() -> &'static str {
        "Test Email - Catalog System"
    }

    /// Render the enquiry body
    ///
    /// The customer block appears only when a name or email was given; the
    /// message is shown inside that block only.
    pub fn render_enquiry(
        &self,
        item: &Item,
        details: &EnquiryDetails,
        at: DateTime<Utc>,
    ) -> Result<String, NotificationError> {
        let customer_name = present(&details.customer_name);
        let customer_email = present(&details.customer_email);

        let context = EnquiryContext {
            item_name: &item.name,
            item_type: item.item_type.as_str(),
            item_description: &item.description,
            item_id: &item.id,
            has_customer: customer_name.is_some() || customer_email.is_some(),
            customer_name,
            customer_email,
            message: present(&details.message),
            enquiry_date: at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        };

        Ok(self.handlebars.render_template(ENQUIRY_TEMPLATE, &context)?)
    }

    pub fn render_test(&self, at: DateTime<Utc>) -> Result<String, NotificationError> {
        let context = TestContext {
            timestamp: at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        };
        Ok(self.handlebars.render_template(TEST_TEMPLATE, &context)?)
    }
}

impl Default for EnquiryTemplate {
    fn default() -> Self {
        Self::new()
    }
}
