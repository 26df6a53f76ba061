// Coordinators layer - Workflow orchestration
//
// Coordinators sequence store and service calls for one endpoint each.
// They own ordering (stage, write, clean up) but no validation rules.

pub mod enquiry_coordinator;
pub mod item_coordinator;
pub mod seed_coordinator;

pub use enquiry_coordinator::EnquiryCoordinator;
pub use item_coordinator::ItemCoordinator;
pub use seed_coordinator::{SeedCoordinator, PLACEHOLDER_PNG};
