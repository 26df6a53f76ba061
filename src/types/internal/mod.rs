// Internal domain types - never serialized directly onto the wire
pub mod context;
pub mod item;
pub mod upload;

pub use item::{Item, ItemDraft, ItemFields, ItemPatch, ItemType, ValidatedItem, ValidatedPatch, MAX_ADDITIONAL_IMAGES};
pub use upload::{ImageField, ImageUploads, IncomingImage, StagedImages};
