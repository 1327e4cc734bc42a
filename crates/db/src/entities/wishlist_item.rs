//! Wishlist item entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::wishlist::DeletionKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wishlist_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub wishlist_id: String,

    pub name: String,

    #[sea_orm(nullable)]
    pub note: Option<String>,

    #[sea_orm(nullable)]
    pub website_url: Option<String>,

    /// Requested quantity; derived leftover may go negative
    pub quantity: i32,

    /// Nullified when the priority row is deleted
    #[sea_orm(nullable)]
    pub priority_id: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    /// Tombstone timestamp; live rows have NULL
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,

    /// Whether the tombstone came from a direct delete or a wishlist cascade
    #[sea_orm(nullable)]
    pub deleted_by: Option<DeletionKind>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wishlist::Entity",
        from = "Column::WishlistId",
        to = "super::wishlist::Column::Id",
        on_delete = "Cascade"
    )]
    Wishlist,

    #[sea_orm(
        belongs_to = "super::priority::Entity",
        from = "Column::PriorityId",
        to = "super::priority::Column::Id",
        on_delete = "SetNull"
    )]
    Priority,

    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchases,
}

impl Related<super::wishlist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wishlist.def()
    }
}

impl Related<super::priority::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Priority.def()
    }
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchases.def()
    }
}

impl Model {
    /// Whether this item is still live (not tombstoned).
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

impl ActiveModelBehavior for ActiveModel {}
