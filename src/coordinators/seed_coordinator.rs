use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::ItemCoordinator;
use crate::errors::InternalError;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{ImageField, ImageUploads, IncomingImage, Item, ItemFields};

/// 1x1 transparent PNG written for every sample image
pub const PLACEHOLDER_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

struct SampleItem {
    name: &'static str,
    item_type: &'static str,
    description: &'static str,
    cover: &'static str,
    additional: &'static [&'static str],
}

const SAMPLE_ITEMS: [SampleItem; 5] = [
    SampleItem {
        name: "Blue Denim Shirt",
        item_type: "Shirt",
        description: "Comfortable blue denim shirt perfect for casual wear. Made from high-quality cotton with a modern fit.",
        cover: "placeholder-shirt.png",
        additional: &["placeholder-shirt-2.png", "placeholder-shirt-3.png"],
    },
    SampleItem {
        name: "Black Formal Pants",
        item_type: "Pant",
        description: "Professional black formal pants for office wear. Wrinkle-resistant fabric with a tailored fit.",
        cover: "placeholder-pants.png",
        additional: &["placeholder-pants-2.png"],
    },
    SampleItem {
        name: "Running Shoes",
        item_type: "Shoes",
        description: "High-performance running shoes with excellent cushioning and support for long-distance running.",
        cover: "placeholder-shoes.png",
        additional: &["placeholder-shoes-2.png", "placeholder-shoes-3.png"],
    },
    SampleItem {
        name: "Tennis Racket",
        item_type: "Sports Gear",
        description: "Professional tennis racket for competitive play. Lightweight design with enhanced control and power.",
        cover: "placeholder-racket.png",
        additional: &["placeholder-racket-2.png"],
    },
    SampleItem {
        name: "Cotton T-Shirt",
        item_type: "Shirt",
        description: "Soft cotton t-shirt available in multiple colors. Perfect for everyday wear.",
        cover: "placeholder-tshirt.png",
        additional: &[],
    },
];

fn placeholder(field: ImageField, file_name: &str) -> IncomingImage {
    IncomingImage {
        field,
        file_name: Some(file_name.to_string()),
        content_type: Some("image/png".to_string()),
        bytes: PLACEHOLDER_PNG.to_vec(),
    }
}

impl SampleItem {
    fn fields(&self) -> ItemFields {
        ItemFields {
            name: Some(self.name.to_string()),
            item_type: Some(self.item_type.to_string()),
            description: Some(self.description.to_string()),
        }
    }

    fn uploads(&self) -> ImageUploads {
        ImageUploads {
            cover: vec![placeholder(ImageField::Cover, self.cover)],
            additional: self
                .additional
                .iter()
                .map(|name| placeholder(ImageField::Additional, name))
                .collect(),
        }
    }
}

/// Replaces the catalog with the sample items
///
/// Runs through the normal item workflows so existing files are removed and
/// every sample image exists on disk.
pub struct SeedCoordinator {
    items: ItemCoordinator,
}

impl SeedCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            items: ItemCoordinator::new(app_data),
        }
    }

    /// Delete every item, then create the samples
    ///
    /// # Returns
    /// * `Ok(Vec<Item>)` - The created sample items, in insertion order
    /// * `Err(InternalError)` - A delete or create failed; items created before the failure remain
    pub async fn seed_catalog(&self, ctx: &RequestContext) -> Result<Vec<Item>, InternalError> {
        let existing = self.items.list_items(ctx).await?;
        for item in &existing {
            self.items.delete_item(ctx, &item.id).await?;
        }

        let mut created = Vec::with_capacity(SAMPLE_ITEMS.len());
        for sample in &SAMPLE_ITEMS {
            let item = self
                .items
                .create_item(ctx, sample.fields(), sample.uploads())
                .await?;
            created.push(item);
        }

        tracing::info!(
            "[{}] Catalog seeded by {}: {} removed, {} created",
            ctx.request_id,
            ctx.actor_id,
            existing.len(),
            created.len()
        );

        Ok(created)
    }
}
