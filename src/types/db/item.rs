use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub item_type: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub cover_image: String,

    // JSON array of filenames
    #[sea_orm(column_type = "Text")]
    pub additional_images: String,

    // Unix milliseconds
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
