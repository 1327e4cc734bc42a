//! Friend repository.

use std::sync::Arc;

use crate::entities::{friend, Friend};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder,
};
use wishlinker_common::{AppError, AppResult};

/// Friend repository for database operations.
#[derive(Clone)]
pub struct FriendRepository {
    db: Arc<DatabaseConnection>,
}

impl FriendRepository {
    /// Create a new friend repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a friend edge by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<friend::Model>> {
        Friend::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a friend edge by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<friend::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Friend: {id}")))
    }

    /// Create a new friend edge.
    pub async fn create(&self, model: friend::ActiveModel) -> AppResult<friend::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a friend edge.
    pub async fn update(&self, model: friend::ActiveModel) -> AppResult<friend::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a friend edge.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let edge = self.find_by_id(id).await?;
        if let Some(e) = edge {
            e.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// All edges with the given user as either endpoint, filtered by
    /// acceptance status.
    pub async fn find_for_user(
        &self,
        user_id: &str,
        accepted: bool,
    ) -> AppResult<Vec<friend::Model>> {
        Friend::find()
            .filter(
                Condition::all()
                    .add(
                        Condition::any()
                            .add(friend::Column::User1Id.eq(user_id))
                            .add(friend::Column::User2Id.eq(user_id)),
                    )
                    .add(friend::Column::Accepted.eq(accepted)),
            )
            .order_by_asc(friend::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All edges with the given user as either endpoint, regardless of
    /// acceptance status.
    pub async fn find_edges_for_user(&self, user_id: &str) -> AppResult<Vec<friend::Model>> {
        Friend::find()
            .filter(
                Condition::any()
                    .add(friend::Column::User1Id.eq(user_id))
                    .add(friend::Column::User2Id.eq(user_id)),
            )
            .order_by_asc(friend::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Whether an accepted edge exists between the two users, in either
    /// direction.
    pub async fn is_accepted_pair(&self, user_a: &str, user_b: &str) -> AppResult<bool> {
        let edge = Friend::find()
            .filter(
                Condition::all()
                    .add(friend::Column::Accepted.eq(true))
                    .add(
                        Condition::any()
                            .add(
                                Condition::all()
                                    .add(friend::Column::User1Id.eq(user_a))
                                    .add(friend::Column::User2Id.eq(user_b)),
                            )
                            .add(
                                Condition::all()
                                    .add(friend::Column::User1Id.eq(user_b))
                                    .add(friend::Column::User2Id.eq(user_a)),
                            ),
                    ),
            )
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(edge.is_some())
    }
}
