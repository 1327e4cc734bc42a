//! Wishlist item repository.
//!
//! All queries exclude tombstoned rows unless noted otherwise.

use std::sync::Arc;

use crate::entities::{wishlist::DeletionKind, wishlist_item, WishlistItem};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use wishlinker_common::{AppError, AppResult};

/// Wishlist item repository for database operations.
#[derive(Clone)]
pub struct WishlistItemRepository {
    db: Arc<DatabaseConnection>,
}

impl WishlistItemRepository {
    /// Create a new wishlist item repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a live item by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<wishlist_item::Model>> {
        WishlistItem::find_by_id(id)
            .filter(wishlist_item::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a live item by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<wishlist_item::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ItemNotFound(id.to_string()))
    }

    /// Create a new item.
    pub async fn create(&self, model: wishlist_item::ActiveModel) -> AppResult<wishlist_item::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an item.
    pub async fn update(&self, model: wishlist_item::ActiveModel) -> AppResult<wishlist_item::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Live items belonging to a wishlist.
    pub async fn find_by_wishlist(&self, wishlist_id: &str) -> AppResult<Vec<wishlist_item::Model>> {
        WishlistItem::find()
            .filter(wishlist_item::Column::WishlistId.eq(wishlist_id))
            .filter(wishlist_item::Column::DeletedAt.is_null())
            .order_by_asc(wishlist_item::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Tombstone an item (direct delete).
    pub async fn soft_delete(&self, model: wishlist_item::Model) -> AppResult<wishlist_item::Model> {
        let mut active: wishlist_item::ActiveModel = model.into();
        active.deleted_at = Set(Some(chrono::Utc::now().into()));
        active.deleted_by = Set(Some(DeletionKind::Direct));
        self.update(active).await
    }

    /// Tombstone every live item of a wishlist with the cascade marker.
    ///
    /// Returns the number of items tombstoned.
    pub async fn soft_delete_by_wishlist(&self, wishlist_id: &str) -> AppResult<u64> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let result = WishlistItem::update_many()
            .col_expr(wishlist_item::Column::DeletedAt, Expr::value(Some(now)))
            .col_expr(
                wishlist_item::Column::DeletedBy,
                Expr::value(DeletionKind::Cascade),
            )
            .filter(wishlist_item::Column::WishlistId.eq(wishlist_id))
            .filter(wishlist_item::Column::DeletedAt.is_null())
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_item(id: &str, wishlist_id: &str, quantity: i32) -> wishlist_item::Model {
        wishlist_item::Model {
            id: id.to_string(),
            wishlist_id: wishlist_id.to_string(),
            name: "Example Item".to_string(),
            note: None,
            website_url: Some("https://example.com".to_string()),
            quantity,
            priority_id: None,
            created_at: Utc::now().into(),
            deleted_at: None,
            deleted_by: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let item = create_test_item("i1", "w1", 3);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[item.clone()]])
                .into_connection(),
        );

        let repo = WishlistItemRepository::new(db);
        let result = repo.find_by_id("i1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<wishlist_item::Model>::new()])
                .into_connection(),
        );

        let repo = WishlistItemRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(matches!(result, Err(AppError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_wishlist() {
        let i1 = create_test_item("i1", "w1", 1);
        let i2 = create_test_item("i2", "w1", 2);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[i1, i2]])
                .into_connection(),
        );

        let repo = WishlistItemRepository::new(db);
        let result = repo.find_by_wishlist("w1").await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_soft_delete_by_wishlist_counts_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                }])
                .into_connection(),
        );

        let repo = WishlistItemRepository::new(db);
        let affected = repo.soft_delete_by_wishlist("w1").await.unwrap();

        assert_eq!(affected, 2);
    }

    #[tokio::test]
    async fn test_soft_delete_sets_direct_marker() {
        let item = create_test_item("i1", "w1", 1);
        let mut deleted = item.clone();
        deleted.deleted_at = Some(Utc::now().into());
        deleted.deleted_by = Some(DeletionKind::Direct);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[deleted]])
                .into_connection(),
        );

        let repo = WishlistItemRepository::new(db);
        let result = repo.soft_delete(item).await.unwrap();

        assert_eq!(result.deleted_by, Some(DeletionKind::Direct));
    }
}
