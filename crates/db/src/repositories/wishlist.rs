//! Wishlist repository.
//!
//! All queries exclude tombstoned rows unless noted otherwise.

use std::sync::Arc;

use crate::entities::{
    wishlist::{self, DeletionKind},
    Wishlist,
};
use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use wishlinker_common::{AppError, AppResult};

/// Wishlist repository for database operations.
#[derive(Clone)]
pub struct WishlistRepository {
    db: Arc<DatabaseConnection>,
}

impl WishlistRepository {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a live wishlist by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<wishlist::Model>> {
        Wishlist::find_by_id(id)
            .filter(wishlist::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a live wishlist by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<wishlist::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::WishlistNotFound(id.to_string()))
    }

    /// Create a new wishlist.
    pub async fn create(&self, model: wishlist::ActiveModel) -> AppResult<wishlist::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a wishlist.
    pub async fn update(&self, model: wishlist::ActiveModel) -> AppResult<wishlist::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Tombstone a wishlist (direct delete).
    pub async fn soft_delete(&self, model: wishlist::Model) -> AppResult<wishlist::Model> {
        let mut active: wishlist::ActiveModel = model.into();
        active.deleted_at = Set(Some(chrono::Utc::now().into()));
        active.deleted_by = Set(Some(DeletionKind::Direct));
        self.update(active).await
    }

    /// An owner's live wishlists in one privacy bucket, optionally filtered
    /// by a substring match on title or description.
    pub async fn find_by_owner(
        &self,
        owner_id: &str,
        private: bool,
        search: Option<&str>,
    ) -> AppResult<Vec<wishlist::Model>> {
        let mut condition = Condition::all()
            .add(wishlist::Column::UserId.eq(owner_id))
            .add(wishlist::Column::Private.eq(private))
            .add(wishlist::Column::DeletedAt.is_null());

        if let Some(q) = search {
            let pattern = format!("%{}%", q.replace('%', "\\%").replace('_', "\\_"));
            condition = condition.add(
                Condition::any()
                    .add(wishlist::Column::Title.like(&pattern))
                    .add(wishlist::Column::Description.like(&pattern)),
            );
        }

        Wishlist::find()
            .filter(condition)
            .order_by_desc(wishlist::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Live public wishlists owned by any of `owner_ids` and created after
    /// `since`.
    pub async fn find_recent_public_by_owners(
        &self,
        owner_ids: &[String],
        since: DateTime<FixedOffset>,
    ) -> AppResult<Vec<wishlist::Model>> {
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }

        Wishlist::find()
            .filter(wishlist::Column::UserId.is_in(owner_ids.to_vec()))
            .filter(wishlist::Column::Private.eq(false))
            .filter(wishlist::Column::DeletedAt.is_null())
            .filter(wishlist::Column::CreatedAt.gte(since))
            .order_by_desc(wishlist::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// An owner's live wishlists that have an event date.
    pub async fn find_with_event_by_owner(&self, owner_id: &str) -> AppResult<Vec<wishlist::Model>> {
        Wishlist::find()
            .filter(wishlist::Column::UserId.eq(owner_id))
            .filter(wishlist::Column::DateOfEvent.is_not_null())
            .filter(wishlist::Column::DeletedAt.is_null())
            .order_by_asc(wishlist::Column::DateOfEvent)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Live public wishlists with an event date owned by any of `owner_ids`.
    pub async fn find_public_with_event_by_owners(
        &self,
        owner_ids: &[String],
    ) -> AppResult<Vec<wishlist::Model>> {
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }

        Wishlist::find()
            .filter(wishlist::Column::UserId.is_in(owner_ids.to_vec()))
            .filter(wishlist::Column::Private.eq(false))
            .filter(wishlist::Column::DateOfEvent.is_not_null())
            .filter(wishlist::Column::DeletedAt.is_null())
            .order_by_asc(wishlist::Column::DateOfEvent)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_wishlist(id: &str, owner: &str, private: bool) -> wishlist::Model {
        wishlist::Model {
            id: id.to_string(),
            user_id: owner.to_string(),
            title: "My 40th Birthday".to_string(),
            description: "A few things I like".to_string(),
            spoil_surprises: false,
            private,
            address: None,
            date_of_event: None,
            pinned: false,
            created_at: Utc::now().into(),
            deleted_at: None,
            deleted_by: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let wishlist = create_test_wishlist("w1", "u1", false);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[wishlist.clone()]])
                .into_connection(),
        );

        let repo = WishlistRepository::new(db);
        let result = repo.find_by_id("w1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().user_id, "u1");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<wishlist::Model>::new()])
                .into_connection(),
        );

        let repo = WishlistRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(matches!(result, Err(AppError::WishlistNotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_owner() {
        let w1 = create_test_wishlist("w1", "u1", false);
        let w2 = create_test_wishlist("w2", "u1", false);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[w1, w2]])
                .into_connection(),
        );

        let repo = WishlistRepository::new(db);
        let result = repo.find_by_owner("u1", false, None).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|w| !w.private));
    }

    #[tokio::test]
    async fn test_find_recent_public_by_owners_empty_shortcut() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = WishlistRepository::new(db);
        let result = repo
            .find_recent_public_by_owners(&[], Utc::now().into())
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_soft_delete_sets_tombstone() {
        let wishlist = create_test_wishlist("w1", "u1", false);
        let mut deleted = wishlist.clone();
        deleted.deleted_at = Some(Utc::now().into());
        deleted.deleted_by = Some(DeletionKind::Direct);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[deleted]])
                .into_connection(),
        );

        let repo = WishlistRepository::new(db);
        let result = repo.soft_delete(wishlist).await.unwrap();

        assert!(result.deleted_at.is_some());
        assert_eq!(result.deleted_by, Some(DeletionKind::Direct));
    }
}
