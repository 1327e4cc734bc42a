//! Wishlist entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How a soft-deleted row was tombstoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum DeletionKind {
    /// Deleted directly by its owner.
    #[sea_orm(string_value = "direct")]
    Direct,
    /// Tombstoned because its parent was deleted.
    #[sea_orm(string_value = "cascade")]
    Cascade,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wishlist")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owner user ID; immutable after creation
    #[sea_orm(indexed)]
    pub user_id: String,

    pub title: String,

    pub description: String,

    /// Owner consents to seeing purchase info for this list
    pub spoil_surprises: bool,

    /// Hidden from the owner's public bucket and from friends
    pub private: bool,

    /// Mailing address for purchased items
    #[sea_orm(nullable)]
    pub address: Option<String>,

    /// Date of the associated event, if any
    #[sea_orm(nullable)]
    pub date_of_event: Option<DateTimeWithTimeZone>,

    /// Personal homepage flag, distinct from the pin entity
    pub pinned: bool,

    pub created_at: DateTimeWithTimeZone,

    /// Tombstone timestamp; live rows have NULL
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,

    /// Whether the tombstone came from a direct delete or a cascade
    #[sea_orm(nullable)]
    pub deleted_by: Option<DeletionKind>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,

    #[sea_orm(has_many = "super::wishlist_item::Entity")]
    Items,

    #[sea_orm(has_many = "super::pin::Entity")]
    Pins,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::wishlist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Model {
    /// Whether this wishlist is still live (not tombstoned).
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

impl ActiveModelBehavior for ActiveModel {}
