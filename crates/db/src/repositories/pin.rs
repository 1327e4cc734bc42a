//! Pin repository.

use std::sync::Arc;

use crate::entities::{pin, Pin};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};
use wishlinker_common::{AppError, AppResult};

/// Pin repository for database operations.
#[derive(Clone)]
pub struct PinRepository {
    db: Arc<DatabaseConnection>,
}

impl PinRepository {
    /// Create a new pin repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a pin by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<pin::Model>> {
        Pin::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a pin by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<pin::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Pin: {id}")))
    }

    /// Create a new pin. Duplicate pins of the same wishlist are permitted.
    pub async fn create(&self, model: pin::ActiveModel) -> AppResult<pin::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a pin.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let pin = self.find_by_id(id).await?;
        if let Some(p) = pin {
            p.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// A user's pins, oldest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<pin::Model>> {
        Pin::find()
            .filter(pin::Column::UserId.eq(user_id))
            .order_by_asc(pin::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
