use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use crate::errors::InternalError;
use crate::errors::internal::{FieldViolation, ItemError};
use crate::types::db::item;
use crate::types::internal::upload::StagedImages;

/// Maximum number of additional images an item may reference
pub const MAX_ADDITIONAL_IMAGES: usize = 5;

/// Closed set of catalog item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Shirt,
    Pant,
    Shoes,
    SportsGear,
    Other,
}

impl ItemType {
    pub const ALL: [ItemType; 5] = [
        ItemType::Shirt,
        ItemType::Pant,
        ItemType::Shoes,
        ItemType::SportsGear,
        ItemType::Other,
    ];

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Shirt => "Shirt",
            ItemType::Pant => "Pant",
            ItemType::Shoes => "Shoes",
            ItemType::SportsGear => "Sports Gear",
            ItemType::Other => "Other",
        }
    }

    /// Exact, case-sensitive match against the wire names
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted catalog item
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    pub description: String,
    pub cover_image: String,
    pub additional_images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Every stored file this item references, cover first
    pub fn image_files(&self) -> Vec<String> {
        std::iter::once(self.cover_image.clone())
            .chain(self.additional_images.iter().cloned())
            .collect()
    }
}

fn from_millis(value: i64, column: &str) -> Result<DateTime<Utc>, InternalError> {
    Utc.timestamp_millis_opt(value)
        .single()
        .ok_or_else(|| InternalError::parse(column, format!("invalid timestamp {}", value)))
}

impl TryFrom<item::Model> for Item {
    type Error = InternalError;

    fn try_from(model: item::Model) -> Result<Self, Self::Error> {
        let item_type = ItemType::parse(&model.item_type).ok_or_else(|| {
            InternalError::parse("item_type", format!("unknown item type '{}'", model.item_type))
        })?;
        let additional_images: Vec<String> = serde_json::from_str(&model.additional_images)
            .map_err(|e| InternalError::parse("additional_images", e.to_string()))?;

        Ok(Self {
            created_at: from_millis(model.created_at, "created_at")?,
            updated_at: from_millis(model.updated_at, "updated_at")?,
            id: model.id,
            name: model.name,
            item_type,
            description: model.description,
            cover_image: model.cover_image,
            additional_images,
        })
    }
}

/// Trim and drop empty values
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_additional(images: &[String], violations: &mut Vec<FieldViolation>) {
    if images.len() > MAX_ADDITIONAL_IMAGES {
        violations.push(FieldViolation::new(
            "additionalImages",
            format!(
                "At most {} additional images are allowed",
                MAX_ADDITIONAL_IMAGES
            ),
        ));
    }
    if images.iter().any(|i| i.trim().is_empty()) {
        violations.push(FieldViolation::new(
            "additionalImages",
            "Additional image references must not be empty",
        ));
    }
}

/// Unvalidated input for a new item, as collected from a request
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub item_type: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub additional_images: Vec<String>,
}

/// A draft that passed validation; the only input `ItemStore::create` accepts
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedItem {
    pub name: String,
    pub item_type: ItemType,
    pub description: String,
    pub cover_image: String,
    pub additional_images: Vec<String>,
}

impl ItemDraft {
    /// Check every required field and report all failures at once
    pub fn validate(self) -> Result<ValidatedItem, ItemError> {
        let mut violations = Vec::new();

        let name = non_blank(self.name);
        if name.is_none() {
            violations.push(FieldViolation::new("name", "Item name is required"));
        }

        let item_type = match non_blank(self.item_type) {
            None => {
                violations.push(FieldViolation::new("type", "Item type is required"));
                None
            }
            Some(raw) => {
                let parsed = ItemType::parse(&raw);
                if parsed.is_none() {
                    violations.push(FieldViolation::new(
                        "type",
                        format!(
                            "'{}' is not a valid item type. Expected one of: {}",
                            raw,
                            ItemType::allowed_list()
                        ),
                    ));
                }
                parsed
            }
        };

        let description = non_blank(self.description);
        if description.is_none() {
            violations.push(FieldViolation::new(
                "description",
                "Item description is required",
            ));
        }

        let cover_image = non_blank(self.cover_image);
        if cover_image.is_none() {
            violations.push(FieldViolation::new("coverImage", "Cover image is required"));
        }

        check_additional(&self.additional_images, &mut violations);

        match (name, item_type, description, cover_image) {
            (Some(name), Some(item_type), Some(description), Some(cover_image))
                if violations.is_empty() =>
            {
                Ok(ValidatedItem {
                    name,
                    item_type,
                    description,
                    cover_image,
                    additional_images: self.additional_images,
                })
            }
            _ => Err(ItemError::Validation(violations)),
        }
    }
}

/// Partial update; `None` leaves the stored value unchanged
///
/// Blank text fields count as not supplied.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub item_type: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub additional_images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedPatch {
    pub name: Option<String>,
    pub item_type: Option<ItemType>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub additional_images: Option<Vec<String>>,
}

impl ItemPatch {
    pub fn validate(self) -> Result<ValidatedPatch, ItemError> {
        let mut violations = Vec::new();

        let item_type = match non_blank(self.item_type) {
            None => None,
            Some(raw) => {
                let parsed = ItemType::parse(&raw);
                if parsed.is_none() {
                    violations.push(FieldViolation::new(
                        "type",
                        format!(
                            "'{}' is not a valid item type. Expected one of: {}",
                            raw,
                            ItemType::allowed_list()
                        ),
                    ));
                }
                parsed
            }
        };

        let cover_image = match self.cover_image {
            Some(cover) if cover.trim().is_empty() => {
                violations.push(FieldViolation::new("coverImage", "Cover image is required"));
                None
            }
            other => other,
        };

        if let Some(images) = &self.additional_images {
            check_additional(images, &mut violations);
        }

        if !violations.is_empty() {
            return Err(ItemError::Validation(violations));
        }

        Ok(ValidatedPatch {
            name: non_blank(self.name),
            item_type,
            description: non_blank(self.description),
            cover_image,
            additional_images: self.additional_images,
        })
    }
}

/// Text fields of a create/update request, before any image is attached
#[derive(Debug, Clone, Default)]
pub struct ItemFields {
    pub name: Option<String>,
    pub item_type: Option<String>,
    pub description: Option<String>,
}

impl ItemFields {
    /// Combine with the names of files staged for a create
    pub fn into_draft(self, staged: &StagedImages) -> ItemDraft {
        ItemDraft {
            name: self.name,
            item_type: self.item_type,
            description: self.description,
            cover_image: staged.cover.clone(),
            additional_images: staged.additional.clone().unwrap_or_default(),
        }
    }

    /// Combine with the names of files staged for an update
    ///
    /// Only images actually uploaded replace stored references.
    pub fn into_patch(self, staged: &StagedImages) -> ItemPatch {
        ItemPatch {
            name: self.name,
            item_type: self.item_type,
            description: self.description,
            cover_image: staged.cover.clone(),
            additional_images: staged.additional.clone(),
        }
    }
}
