//! Priority repository.

use std::sync::Arc;

use crate::entities::{priority, Priority};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use wishlinker_common::{AppError, AppResult};

/// Priority repository for database operations.
#[derive(Clone)]
pub struct PriorityRepository {
    db: Arc<DatabaseConnection>,
}

impl PriorityRepository {
    /// Create a new priority repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// All priority levels.
    pub async fn find_all(&self) -> AppResult<Vec<priority::Model>> {
        Priority::find()
            .order_by_asc(priority::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a priority by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<priority::Model>> {
        Priority::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a priority by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<priority::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Priority: {id}")))
    }

    /// Find a priority by name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<priority::Model>> {
        Priority::find()
            .filter(priority::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
