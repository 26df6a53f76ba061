use poem_openapi::{ApiResponse, Multipart, Object, payload::Json, types::multipart::Upload};

use crate::types::internal::Item;

/// Response model representing an item
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ItemResponse {
    /// Unique identifier for the item
    pub id: String,

    pub name: String,

    /// One of: Shirt, Pant, Shoes, Sports Gear, Other
    #[oai(rename = "type")]
    pub item_type: String,

    pub description: String,

    /// Filename of the cover image, served under `/uploads/`
    pub cover_image: String,

    /// Filenames of up to five additional images
    pub additional_images: Vec<String>,

    /// Creation time (ISO 8601 format)
    pub created_at: String,

    /// Last modification time (ISO 8601 format)
    pub updated_at: String,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            item_type: item.item_type.as_str().to_string(),
            description: item.description,
            cover_image: item.cover_image,
            additional_images: item.additional_images,
            created_at: item.created_at.to_rfc3339(),
            updated_at: item.updated_at.to_rfc3339(),
        }
    }
}

/// Envelope for a single item
#[derive(Object, Debug)]
pub struct ItemEnvelope {
    pub success: bool,
    pub message: String,
    pub data: ItemResponse,
}

impl ItemEnvelope {
    pub fn new(message: impl Into<String>, item: Item) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: item.into(),
        }
    }
}

/// Envelope for a list of items
#[derive(Object, Debug)]
pub struct ItemListEnvelope {
    pub success: bool,
    pub message: String,
    pub count: u64,
    pub data: Vec<ItemResponse>,
}

impl ItemListEnvelope {
    pub fn new(message: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            success: true,
            message: message.into(),
            count: items.len() as u64,
            data: items.into_iter().map(ItemResponse::from).collect(),
        }
    }
}

/// Multipart form for creating or updating an item
///
/// Every field is optional at the transport level so that missing fields
/// surface as validation errors naming the field.
#[derive(Multipart, Debug)]
pub struct ItemForm {
    pub name: Option<String>,

    #[oai(rename = "type")]
    pub item_type: Option<String>,

    pub description: Option<String>,

    #[oai(rename = "coverImage")]
    pub cover_image: Vec<Upload>,

    #[oai(rename = "additionalImages")]
    pub additional_images: Vec<Upload>,
}

/// API response for item creation
#[derive(ApiResponse)]
pub enum CreateItemApiResponse {
    /// Item created
    #[oai(status = 201)]
    Created(Json<ItemEnvelope>),
}
