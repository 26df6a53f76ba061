use poem_openapi::Object;
use serde::Serialize;

use crate::notifications::EnquiryDetails;

/// Visitor enquiry about one item; every field is optional
#[derive(Object, Debug, Clone, Default, Serialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct EnquiryRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub message: Option<String>,
}

impl From<EnquiryRequest> for EnquiryDetails {
    fn from(request: EnquiryRequest) -> Self {
        Self {
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            message: request.message,
        }
    }
}
