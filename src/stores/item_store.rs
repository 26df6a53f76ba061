use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::ItemError;
use crate::types::db::item::{self, ActiveModel, Entity as Items};
use crate::types::internal::{Item, ItemDraft, ItemPatch};

/// ItemStore persists catalog items, one row per item
///
/// Validation and timestamp maintenance are part of this store's contract:
/// `create` and `update` validate their input and set `updated_at` themselves.
/// The store never touches image files.
pub struct ItemStore {
    db: DatabaseConnection,
}

impl ItemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Ids are UUIDs; anything else is rejected before querying
    fn parse_id(id: &str) -> Result<String, InternalError> {
        Uuid::parse_str(id)
            .map(|uuid| uuid.to_string())
            .map_err(|_| ItemError::InvalidId(id.to_string()).into())
    }

    fn encode_images(images: &[String]) -> Result<String, InternalError> {
        serde_json::to_string(images)
            .map_err(|e| InternalError::parse("additional_images", e.to_string()))
    }

    async fn find_model(&self, id: &str) -> Result<item::Model, InternalError> {
        let id = Self::parse_id(id)?;

        Items::find_by_id(id.clone())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_item", e))?
            .ok_or_else(|| ItemError::NotFound(id).into())
    }

    /// List all items, newest-created first
    pub async fn list(&self) -> Result<Vec<Item>, InternalError> {
        Items::find()
            .order_by_desc(item::Column::CreatedAt)
            .order_by_desc(item::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_items", e))?
            .into_iter()
            .map(Item::try_from)
            .collect()
    }

    /// Get one item
    ///
    /// # Returns
    /// * `Ok(Item)` - The stored item
    /// * `Err(InternalError)` - `ItemError::InvalidId`, `ItemError::NotFound`, or database error
    pub async fn get(&self, id: &str) -> Result<Item, InternalError> {
        let model = self.find_model(id).await?;
        Item::try_from(model)
    }

    /// Validate and persist a new item
    ///
    /// Assigns the id and both timestamps. Nothing is written when validation fails.
    ///
    /// # Returns
    /// * `Ok(Item)` - The stored record
    /// * `Err(InternalError)` - `ItemError::Validation` naming every failing field, or database error
    pub async fn create(&self, draft: ItemDraft) -> Result<Item, InternalError> {
        let valid = draft.validate()?;
        let now = Utc::now().timestamp_millis();

        let new_item = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(valid.name),
            item_type: Set(valid.item_type.as_str().to_string()),
            description: Set(valid.description),
            cover_image: Set(valid.cover_image),
            additional_images: Set(Self::encode_images(&valid.additional_images)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_item
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_item", e))?;

        tracing::debug!("Item {} created", model.id);

        Item::try_from(model)
    }

    /// Apply the supplied fields to an existing item and refresh `updated_at`
    ///
    /// # Returns
    /// * `Ok(Item)` - The updated record
    /// * `Err(InternalError)` - `InvalidId`, `NotFound`, `Validation`, or database error
    pub async fn update(&self, id: &str, patch: ItemPatch) -> Result<Item, InternalError> {
        let model = self.find_model(id).await?;
        let patch = patch.validate()?;

        let mut active_model: ActiveModel = model.into();
        if let Some(name) = patch.name {
            active_model.name = Set(name);
        }
        if let Some(item_type) = patch.item_type {
            active_model.item_type = Set(item_type.as_str().to_string());
        }
        if let Some(description) = patch.description {
            active_model.description = Set(description);
        }
        if let Some(cover_image) = patch.cover_image {
            active_model.cover_image = Set(cover_image);
        }
        if let Some(images) = patch.additional_images {
            active_model.additional_images = Set(Self::encode_images(&images)?);
        }
        active_model.updated_at = Set(Utc::now().timestamp_millis());

        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_item", e))?;

        tracing::debug!("Item {} updated", model.id);

        Item::try_from(model)
    }

    /// Remove an item record
    ///
    /// Returns the removed item so the caller can clean up its files.
    pub async fn delete(&self, id: &str) -> Result<Item, InternalError> {
        let model = self.find_model(id).await?;

        let result = Items::delete_by_id(model.id.clone())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_item", e))?;

        if result.rows_affected == 0 {
            return Err(ItemError::NotFound(model.id).into());
        }

        tracing::debug!("Item {} deleted", model.id);

        Item::try_from(model)
    }
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore")
            .field("db", &"<connection>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;
    use crate::types::internal::ItemType;

    fn draft(name: &str) -> ItemDraft {
        ItemDraft {
            name: Some(name.to_string()),
            item_type: Some("Shoes".to_string()),
            description: Some("Running shoes".to_string()),
            cover_image: Some(format!("{}-cover.png", name)),
            additional_images: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_fields() {
        let store = ItemStore::new(setup_test_db().await);

        let created = store.create(draft("runner")).await.unwrap();
        let fetched = store.get(&created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.item_type, ItemType::Shoes);
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[tokio::test]
    async fn test_invalid_create_writes_nothing() {
        let store = ItemStore::new(setup_test_db().await);

        let mut bad = draft("runner");
        bad.item_type = Some("Hat".to_string());
        let result = store.create(bad).await;

        assert!(matches!(
            result,
            Err(InternalError::Item(ItemError::Validation(_)))
        ));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_rejects_malformed_id() {
        let store = ItemStore::new(setup_test_db().await);

        let result = store.get("not-a-uuid").await;
        assert!(matches!(
            result,
            Err(InternalError::Item(ItemError::InvalidId(_)))
        ));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let store = ItemStore::new(setup_test_db().await);

        let result = store.get(&Uuid::new_v4().to_string()).await;
        assert!(matches!(
            result,
            Err(InternalError::Item(ItemError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = ItemStore::new(setup_test_db().await);

        let first = store.create(draft("first")).await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
        let second = store.create(draft("second")).await.unwrap();

        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_update_applies_only_supplied_fields() {
        let store = ItemStore::new(setup_test_db().await);
        let created = store.create(draft("runner")).await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;

        let updated = store
            .update(
                &created.id,
                ItemPatch {
                    description: Some("Trail shoes".to_string()),
                    additional_images: Some(vec!["b.png".to_string(), "c.png".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, created.name);
        assert_eq!(updated.cover_image, created.cover_image);
        assert_eq!(updated.description, "Trail shoes");
        assert_eq!(updated.additional_images, vec!["b.png", "c.png"]);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_with_invalid_type_leaves_record_unchanged() {
        let store = ItemStore::new(setup_test_db().await);
        let created = store.create(draft("runner")).await.unwrap();

        let result = store
            .update(
                &created.id,
                ItemPatch {
                    item_type: Some("Hat".to_string()),
                    name: Some("renamed".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_err());
        assert_eq!(store.get(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_item() {
        let store = ItemStore::new(setup_test_db().await);
        let created = store.create(draft("runner")).await.unwrap();

        let removed = store.delete(&created.id).await.unwrap();
        assert_eq!(removed.id, created.id);

        let again = store.delete(&created.id).await;
        assert!(matches!(
            again,
            Err(InternalError::Item(ItemError::NotFound(_)))
        ));
    }
}
