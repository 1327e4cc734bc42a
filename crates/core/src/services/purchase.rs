//! Purchase service (gift ledger).

use sea_orm::Set;
use wishlinker_common::{AppError, AppResult, IdGenerator};
use wishlinker_db::{
    entities::{purchase, wishlist, wishlist_item},
    repositories::{PurchaseRepository, WishlistItemRepository, WishlistRepository},
};

/// Purchase service.
///
/// Purchase rows surface only through [`PurchaseService::list_mine`], scoped
/// to the purchaser, so a wishlist owner never sees who bought what from
/// their own list.
#[derive(Clone)]
pub struct PurchaseService {
    purchase_repo: PurchaseRepository,
    item_repo: WishlistItemRepository,
    wishlist_repo: WishlistRepository,
    id_gen: IdGenerator,
}

/// A purchase resolved to its item and the wishlist the item sits on.
#[derive(Debug, Clone)]
pub struct PurchaseView {
    /// The purchase row.
    pub purchase: purchase::Model,
    /// The purchased item, if it still exists.
    pub item: Option<wishlist_item::Model>,
    /// The wishlist the item belongs to, if it still exists.
    pub wishlist: Option<wishlist::Model>,
}

impl PurchaseService {
    /// Create a new purchase service.
    #[must_use]
    pub const fn new(
        purchase_repo: PurchaseRepository,
        item_repo: WishlistItemRepository,
        wishlist_repo: WishlistRepository,
    ) -> Self {
        Self {
            purchase_repo,
            item_repo,
            wishlist_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Record a purchase of `quantity` units of an item by `purchaser`.
    ///
    /// The item row is locked for the duration of the insert transaction.
    /// The quantity is not validated against the item's leftover quantity;
    /// overbuying is allowed and produces a negative leftover.
    pub async fn create(
        &self,
        purchaser: &str,
        item_id: &str,
        quantity: i32,
    ) -> AppResult<purchase::Model> {
        if quantity <= 0 {
            return Err(AppError::Validation(
                "Purchase quantity must be positive".to_string(),
            ));
        }

        let model = purchase::ActiveModel {
            id: Set(self.id_gen.generate()),
            wishlist_item_id: Set(item_id.to_string()),
            user_id: Set(purchaser.to_string()),
            quantity: Set(quantity),
            purchase_date: Set(chrono::Utc::now().into()),
        };

        self.purchase_repo.create_for_item(item_id, model).await
    }

    /// The caller's purchases, resolved to items and wishlists.
    pub async fn list_mine(&self, purchaser: &str) -> AppResult<Vec<PurchaseView>> {
        let purchases = self.purchase_repo.find_by_purchaser(purchaser).await?;

        let mut views = Vec::with_capacity(purchases.len());
        for purchase in purchases {
            let item = self.item_repo.find_by_id(&purchase.wishlist_item_id).await?;
            let wishlist = match &item {
                Some(i) => self.wishlist_repo.find_by_id(&i.wishlist_id).await?,
                None => None,
            };
            views.push(PurchaseView {
                purchase,
                item,
                wishlist,
            });
        }

        Ok(views)
    }

    /// Delete a purchase. Only the purchaser may delete their own record.
    pub async fn delete(&self, caller: &str, purchase_id: &str) -> AppResult<()> {
        let purchase = self.purchase_repo.get_by_id(purchase_id).await?;

        if purchase.user_id != caller {
            return Err(AppError::Forbidden(
                "You don't have permission to delete this purchase".to_string(),
            ));
        }

        self.purchase_repo.delete(purchase_id).await
    }
}
