// Wire models - request/response payloads
pub mod common;
pub mod enquiry;
pub mod items;
