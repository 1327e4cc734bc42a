//! Profile entity (bio, birthday, avatar blob).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Additional per-user profile data. At most one row is expected per user,
/// but this is an application convention, not a schema constraint.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub user_id: String,

    pub bio: String,

    /// Client-side avatar icon selector
    #[sea_orm(nullable)]
    pub icon: Option<i32>,

    #[sea_orm(nullable)]
    pub birthday: Option<Date>,

    pub address: String,

    /// Storage key of the uploaded image blob
    #[sea_orm(nullable)]
    pub image_key: Option<String>,

    /// Public URL of the uploaded image blob
    #[sea_orm(nullable)]
    pub image_url: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
