// Stores layer - Item records and image files
pub mod content_store;
pub mod item_store;

pub use content_store::{ContentStore, LocalContentStore};
pub use item_store::ItemStore;
