//! Purchase entity (gift ledger).
//!
//! Purchase rows are only ever read through the purchaser's own listing so a
//! wishlist owner never learns who bought what from their list.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub wishlist_item_id: String,

    /// The purchaser
    #[sea_orm(indexed)]
    pub user_id: String,

    pub quantity: i32,

    pub purchase_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wishlist_item::Entity",
        from = "Column::WishlistItemId",
        to = "super::wishlist_item::Column::Id",
        on_delete = "Cascade"
    )]
    Item,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Purchaser,
}

impl Related<super::wishlist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchaser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
