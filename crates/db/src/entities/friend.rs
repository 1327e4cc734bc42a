//! Friend entity (undirected friendship edges between users).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "friend")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The user who sent the request
    pub user1_id: String,

    /// The user the request was sent to
    pub user2_id: String,

    /// Pending (false) or accepted (true)
    pub accepted: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::User1Id",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User1,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::User2Id",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User2,
}

impl Model {
    /// The edge endpoint that is not `user_id`.
    ///
    /// Falls back to `user2_id` when `user_id` is not an endpoint at all.
    #[must_use]
    pub fn other_endpoint(&self, user_id: &str) -> &str {
        if self.user1_id == user_id {
            &self.user2_id
        } else {
            &self.user1_id
        }
    }

    /// Whether `user_id` is one of the edge's two endpoints.
    #[must_use]
    pub fn has_endpoint(&self, user_id: &str) -> bool {
        self.user1_id == user_id || self.user2_id == user_id
    }
}

impl ActiveModelBehavior for ActiveModel {}
