//! Purchase repository.

use std::sync::Arc;

use crate::entities::{purchase, wishlist_item, Purchase, WishlistItem};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use wishlinker_common::{AppError, AppResult};

/// Purchase repository for database operations.
#[derive(Clone)]
pub struct PurchaseRepository {
    db: Arc<DatabaseConnection>,
}

impl PurchaseRepository {
    /// Create a new purchase repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a purchase by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<purchase::Model>> {
        Purchase::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a purchase by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<purchase::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Purchase: {id}")))
    }

    /// Insert a purchase while holding a row lock on the target item.
    ///
    /// The `SELECT ... FOR UPDATE` serializes concurrent purchases against
    /// the same item and fails with `ItemNotFound` if the item was
    /// tombstoned before the lock was acquired.
    pub async fn create_for_item(
        &self,
        item_id: &str,
        model: purchase::ActiveModel,
    ) -> AppResult<purchase::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let item = WishlistItem::find_by_id(item_id)
            .filter(wishlist_item::Column::DeletedAt.is_null())
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if item.is_none() {
            txn.rollback()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            return Err(AppError::ItemNotFound(item_id.to_string()));
        }

        let purchase = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(purchase)
    }

    /// Delete a purchase.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let purchase = self.find_by_id(id).await?;
        if let Some(p) = purchase {
            p.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// A purchaser's purchases, most recent first.
    pub async fn find_by_purchaser(&self, user_id: &str) -> AppResult<Vec<purchase::Model>> {
        Purchase::find()
            .filter(purchase::Column::UserId.eq(user_id))
            .order_by_desc(purchase::Column::PurchaseDate)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Total quantity purchased for an item across all purchasers.
    ///
    /// Returns 0 when the item has no purchase rows.
    pub async fn total_quantity_for_item(&self, item_id: &str) -> AppResult<i64> {
        use sea_orm::FromQueryResult;

        #[derive(FromQueryResult)]
        struct SumResult {
            total: Option<i64>,
        }

        let result = Purchase::find()
            .filter(purchase::Column::WishlistItemId.eq(item_id))
            .select_only()
            .column_as(purchase::Column::Quantity.sum(), "total")
            .into_model::<SumResult>()
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.and_then(|r| r.total).unwrap_or(0))
    }
}
