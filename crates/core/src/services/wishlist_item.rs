//! Wishlist item service.

use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;
use wishlinker_common::{AppError, AppResult, IdGenerator};
use wishlinker_db::{
    entities::wishlist_item,
    repositories::{
        PriorityRepository, PurchaseRepository, WishlistItemRepository, WishlistRepository,
    },
};

/// Wishlist item service for item CRUD and derived quantities.
#[derive(Clone)]
pub struct WishlistItemService {
    item_repo: WishlistItemRepository,
    wishlist_repo: WishlistRepository,
    priority_repo: PriorityRepository,
    purchase_repo: PurchaseRepository,
    id_gen: IdGenerator,
}

/// An item with its derived purchase quantities.
///
/// Both quantities are recomputed from the purchase ledger on every read and
/// never stored. `leftover_quantity` may go negative when an item is
/// overbought.
#[derive(Debug, Clone)]
pub struct ItemView {
    /// The item row.
    pub item: wishlist_item::Model,
    /// Sum of all purchase rows for this item.
    pub purchased_quantity: i64,
    /// Requested quantity minus purchased quantity. No clamping.
    pub leftover_quantity: i64,
}

/// Input for creating a wishlist item.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemInput {
    pub wishlist_id: String,

    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(max = 256))]
    pub note: Option<String>,

    #[validate(length(max = 1024))]
    pub website_url: Option<String>,

    /// Requested quantity; defaults to 1.
    pub quantity: Option<i32>,

    pub priority_id: Option<String>,
}

/// Input for updating a wishlist item.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItemInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(length(max = 256))]
    pub note: Option<String>,

    #[validate(length(max = 1024))]
    pub website_url: Option<String>,

    pub quantity: Option<i32>,

    pub priority_id: Option<String>,
}

impl WishlistItemService {
    /// Create a new wishlist item service.
    #[must_use]
    pub const fn new(
        item_repo: WishlistItemRepository,
        wishlist_repo: WishlistRepository,
        priority_repo: PriorityRepository,
        purchase_repo: PurchaseRepository,
    ) -> Self {
        Self {
            item_repo,
            wishlist_repo,
            priority_repo,
            purchase_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new item on a wishlist.
    ///
    /// The wishlist and the priority (when given) must exist. The caller is
    /// not required to be the wishlist's owner.
    pub async fn create(&self, input: CreateItemInput) -> AppResult<ItemView> {
        input.validate()?;

        // Wishlist must exist
        self.wishlist_repo.get_by_id(&input.wishlist_id).await?;

        // Priority must exist when given
        if let Some(priority_id) = &input.priority_id {
            self.priority_repo.get_by_id(priority_id).await?;
        }

        let quantity = input.quantity.unwrap_or(1);
        if quantity < 0 {
            return Err(AppError::Validation(
                "Requested quantity must not be negative".to_string(),
            ));
        }

        let model = wishlist_item::ActiveModel {
            id: Set(self.id_gen.generate()),
            wishlist_id: Set(input.wishlist_id),
            name: Set(input.name),
            note: Set(input.note),
            website_url: Set(input.website_url),
            quantity: Set(quantity),
            priority_id: Set(input.priority_id),
            created_at: Set(chrono::Utc::now().into()),
            deleted_at: Set(None),
            deleted_by: Set(None),
        };

        let item = self.item_repo.create(model).await?;
        self.view_of(item).await
    }

    /// Get an item with derived quantities.
    pub async fn get(&self, id: &str) -> AppResult<ItemView> {
        let item = self.item_repo.get_by_id(id).await?;
        self.view_of(item).await
    }

    /// Update an item. Only the owner of the enclosing wishlist may update.
    pub async fn update(&self, caller: &str, id: &str, input: UpdateItemInput) -> AppResult<ItemView> {
        input.validate()?;

        let item = self.item_repo.get_by_id(id).await?;
        let wishlist = self.wishlist_repo.get_by_id(&item.wishlist_id).await?;

        if wishlist.user_id != caller {
            return Err(AppError::Forbidden(
                "You are not authorized to update this wishlist item".to_string(),
            ));
        }

        if let Some(priority_id) = &input.priority_id {
            if self.priority_repo.find_by_id(priority_id).await?.is_none() {
                return Err(AppError::BadRequest("Priority level not found".to_string()));
            }
        }

        if let Some(quantity) = input.quantity {
            if quantity < 0 {
                return Err(AppError::Validation(
                    "Requested quantity must not be negative".to_string(),
                ));
            }
        }

        let mut active: wishlist_item::ActiveModel = item.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(note) = input.note {
            active.note = Set(Some(note));
        }
        if let Some(website_url) = input.website_url {
            active.website_url = Set(Some(website_url));
        }
        if let Some(quantity) = input.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(priority_id) = input.priority_id {
            active.priority_id = Set(Some(priority_id));
        }

        let updated = self.item_repo.update(active).await?;
        self.view_of(updated).await
    }

    /// Tombstone an item. Only the owner of the enclosing wishlist may
    /// delete.
    pub async fn delete(&self, caller: &str, id: &str) -> AppResult<()> {
        let item = self.item_repo.get_by_id(id).await?;
        let wishlist = self.wishlist_repo.get_by_id(&item.wishlist_id).await?;

        if wishlist.user_id != caller {
            return Err(AppError::Forbidden(
                "You are not authorized to delete this wishlist item".to_string(),
            ));
        }

        self.item_repo.soft_delete(item).await?;
        Ok(())
    }

    /// Attach derived quantities to an item.
    pub async fn view_of(&self, item: wishlist_item::Model) -> AppResult<ItemView> {
        let purchased = self.purchase_repo.total_quantity_for_item(&item.id).await?;
        let leftover = i64::from(item.quantity) - purchased;

        Ok(ItemView {
            item,
            purchased_quantity: purchased,
            leftover_quantity: leftover,
        })
    }
}
