//! Wishlist service.

use chrono::Duration;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;
use wishlinker_common::{AppError, AppResult, IdGenerator};
use wishlinker_db::{
    entities::wishlist,
    repositories::{
        FriendRepository, PriorityRepository, PurchaseRepository, WishlistItemRepository,
        WishlistRepository,
    },
};

use super::wishlist_item::ItemView;

/// Trailing window for "friends' recent wishlists".
const RECENT_WINDOW_DAYS: i64 = 14;

/// Wishlist service for list CRUD, search, and the friend-facing feeds.
#[derive(Clone)]
pub struct WishlistService {
    wishlist_repo: WishlistRepository,
    item_repo: WishlistItemRepository,
    priority_repo: PriorityRepository,
    purchase_repo: PurchaseRepository,
    friend_repo: FriendRepository,
    id_gen: IdGenerator,
}

/// The caller's wishlists partitioned by privacy.
#[derive(Debug, Clone)]
pub struct WishlistBuckets {
    /// Public wishlists.
    pub public: Vec<wishlist::Model>,
    /// Private wishlists.
    pub private: Vec<wishlist::Model>,
}

/// A wishlist with its live items and their derived quantities.
#[derive(Debug, Clone)]
pub struct WishlistDetail {
    /// The wishlist row.
    pub wishlist: wishlist::Model,
    /// Live items, filters applied.
    pub items: Vec<ItemView>,
}

/// Input for creating a wishlist.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWishlistInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(max = 256))]
    pub description: String,

    pub spoil_surprises: Option<bool>,

    pub private: Option<bool>,

    #[validate(length(max = 256))]
    pub address: Option<String>,

    pub date_of_event: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// Input for updating a wishlist.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWishlistInput {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,

    #[validate(length(max = 256))]
    pub description: Option<String>,

    pub spoil_surprises: Option<bool>,

    pub private: Option<bool>,

    #[validate(length(max = 256))]
    pub address: Option<String>,

    pub date_of_event: Option<chrono::DateTime<chrono::FixedOffset>>,
}

impl WishlistService {
    /// Create a new wishlist service.
    #[must_use]
    pub const fn new(
        wishlist_repo: WishlistRepository,
        item_repo: WishlistItemRepository,
        priority_repo: PriorityRepository,
        purchase_repo: PurchaseRepository,
        friend_repo: FriendRepository,
    ) -> Self {
        Self {
            wishlist_repo,
            item_repo,
            priority_repo,
            purchase_repo,
            friend_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// The caller's own wishlists, partitioned into public and private
    /// buckets, each optionally filtered by a title/description substring.
    pub async fn list_mine(&self, owner: &str, search: Option<&str>) -> AppResult<WishlistBuckets> {
        let public = self.wishlist_repo.find_by_owner(owner, false, search).await?;
        let private = self.wishlist_repo.find_by_owner(owner, true, search).await?;

        Ok(WishlistBuckets { public, private })
    }

    /// A wishlist with its live items.
    ///
    /// Item filters (name substring, priority name) are applied after the
    /// fetch. Access is not restricted to the owner or friends; any
    /// authenticated caller may retrieve any wishlist by ID.
    pub async fn get(
        &self,
        id: &str,
        item_search: Option<&str>,
        priority_name: Option<&str>,
    ) -> AppResult<WishlistDetail> {
        let wishlist = self.wishlist_repo.get_by_id(id).await?;
        let mut items = self.item_repo.find_by_wishlist(id).await?;

        if let Some(q) = item_search {
            let needle = q.to_lowercase();
            items.retain(|i| i.name.to_lowercase().contains(&needle));
        }

        if let Some(name) = priority_name {
            let priority = self.priority_repo.find_by_name(name).await?;
            match priority {
                Some(p) => items.retain(|i| i.priority_id.as_deref() == Some(p.id.as_str())),
                None => items.clear(),
            }
        }

        let mut views = Vec::with_capacity(items.len());
        for item in items {
            let purchased = self.purchase_repo.total_quantity_for_item(&item.id).await?;
            let leftover = i64::from(item.quantity) - purchased;
            views.push(ItemView {
                item,
                purchased_quantity: purchased,
                leftover_quantity: leftover,
            });
        }

        Ok(WishlistDetail { wishlist, items: views })
    }

    /// Create a wishlist owned by the caller.
    ///
    /// The owner always comes from the caller identity; a client-supplied
    /// owner field has no effect by construction.
    pub async fn create(&self, owner: &str, input: CreateWishlistInput) -> AppResult<wishlist::Model> {
        input.validate()?;

        let model = wishlist::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(owner.to_string()),
            title: Set(input.title),
            description: Set(input.description),
            spoil_surprises: Set(input.spoil_surprises.unwrap_or(false)),
            private: Set(input.private.unwrap_or(false)),
            address: Set(input.address),
            date_of_event: Set(input.date_of_event),
            pinned: Set(false),
            created_at: Set(chrono::Utc::now().into()),
            deleted_at: Set(None),
            deleted_by: Set(None),
        };

        self.wishlist_repo.create(model).await
    }

    /// Update a wishlist. Owner only.
    pub async fn update(
        &self,
        caller: &str,
        id: &str,
        input: UpdateWishlistInput,
    ) -> AppResult<wishlist::Model> {
        input.validate()?;

        let wishlist = self.wishlist_repo.get_by_id(id).await?;
        if wishlist.user_id != caller {
            return Err(AppError::Forbidden(
                "You are not authorized to update this wishlist".to_string(),
            ));
        }

        let mut active: wishlist::ActiveModel = wishlist.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(spoil_surprises) = input.spoil_surprises {
            active.spoil_surprises = Set(spoil_surprises);
        }
        if let Some(private) = input.private {
            active.private = Set(private);
        }
        if let Some(address) = input.address {
            active.address = Set(Some(address));
        }
        if let Some(date_of_event) = input.date_of_event {
            active.date_of_event = Set(Some(date_of_event));
        }

        self.wishlist_repo.update(active).await
    }

    /// Tombstone a wishlist and cascade to its live items. Owner only.
    pub async fn delete(&self, caller: &str, id: &str) -> AppResult<()> {
        let wishlist = self.wishlist_repo.get_by_id(id).await?;
        if wishlist.user_id != caller {
            return Err(AppError::Forbidden(
                "You are not authorized to delete this wishlist".to_string(),
            ));
        }

        self.wishlist_repo.soft_delete(wishlist).await?;
        let cascaded = self.item_repo.soft_delete_by_wishlist(id).await?;
        tracing::debug!(wishlist_id = id, items = cascaded, "Tombstoned wishlist");

        Ok(())
    }

    /// Flip the owner's personal `pinned` flag. Owner only. Distinct from
    /// the pin entity.
    pub async fn set_pinned(&self, caller: &str, id: &str, pinned: bool) -> AppResult<wishlist::Model> {
        let wishlist = self.wishlist_repo.get_by_id(id).await?;
        if wishlist.user_id != caller {
            return Err(AppError::Forbidden(
                "You are not authorized to update this wishlist".to_string(),
            ));
        }

        let mut active: wishlist::ActiveModel = wishlist.into();
        active.pinned = Set(pinned);

        self.wishlist_repo.update(active).await
    }

    /// Public wishlists created by the caller's accepted friends within the
    /// trailing window.
    pub async fn friends_recent(&self, caller: &str) -> AppResult<Vec<wishlist::Model>> {
        let friend_ids = self.accepted_friend_ids(caller).await?;
        let since = chrono::Utc::now() - Duration::days(RECENT_WINDOW_DAYS);

        self.wishlist_repo
            .find_recent_public_by_owners(&friend_ids, since.into())
            .await
    }

    /// The caller's own wishlists with an event date, merged with accepted
    /// friends' public wishlists with an event date, soonest first.
    pub async fn upcoming_events(&self, caller: &str) -> AppResult<Vec<wishlist::Model>> {
        let own = self.wishlist_repo.find_with_event_by_owner(caller).await?;

        let friend_ids = self.accepted_friend_ids(caller).await?;
        let friends = self
            .wishlist_repo
            .find_public_with_event_by_owners(&friend_ids)
            .await?;

        let mut merged: Vec<wishlist::Model> = own.into_iter().chain(friends).collect();
        merged.sort_by_key(|w| w.date_of_event);

        Ok(merged)
    }

    async fn accepted_friend_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        let edges = self.friend_repo.find_for_user(user_id, true).await?;
        Ok(edges
            .iter()
            .map(|e| e.other_endpoint(user_id).to_string())
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use wishlinker_db::entities::{friend, wishlist::DeletionKind, wishlist_item};

    fn test_wishlist(id: &str, owner: &str, private: bool) -> wishlist::Model {
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

    fn test_item(id: &str, wishlist_id: &str, name: &str, priority: Option<&str>) -> wishlist_item::Model {
        wishlist_item::Model {
            id: id.to_string(),
            wishlist_id: wishlist_id.to_string(),
            name: name.to_string(),
            note: None,
            website_url: None,
            quantity: 1,
            priority_id: priority.map(ToString::to_string),
            created_at: Utc::now().into(),
            deleted_at: None,
            deleted_by: None,
        }
    }

    fn test_edge(id: &str, user1: &str, user2: &str) -> friend::Model {
        friend::Model {
            id: id.to_string(),
            user1_id: user1.to_string(),
            user2_id: user2.to_string(),
            accepted: true,
            created_at: Utc::now().into(),
        }
    }

    fn service(
        wishlist_db: MockDatabase,
        item_db: MockDatabase,
        priority_db: MockDatabase,
        purchase_db: MockDatabase,
        friend_db: MockDatabase,
    ) -> WishlistService {
        WishlistService::new(
            WishlistRepository::new(Arc::new(wishlist_db.into_connection())),
            WishlistItemRepository::new(Arc::new(item_db.into_connection())),
            PriorityRepository::new(Arc::new(priority_db.into_connection())),
            PurchaseRepository::new(Arc::new(purchase_db.into_connection())),
            FriendRepository::new(Arc::new(friend_db.into_connection())),
        )
    }

    #[tokio::test]
    async fn test_list_mine_partitions_buckets() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![test_wishlist("w1", "u1", false)]])
                .append_query_results([vec![test_wishlist("w2", "u1", true)]]),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
        );

        let buckets = svc.list_mine("u1", None).await.unwrap();
        assert_eq!(buckets.public.len(), 1);
        assert_eq!(buckets.private.len(), 1);
        assert!(!buckets.public[0].private);
        assert!(buckets.private[0].private);
    }

    #[tokio::test]
    async fn test_get_applies_item_name_filter_post_fetch() {
        let items = vec![
            test_item("i1", "w1", "Red Bicycle", None),
            test_item("i2", "w1", "Espresso Machine", None),
        ];

        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_wishlist("w1", "u1", false)]]),
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([items]),
            MockDatabase::new(DatabaseBackend::Postgres),
            // One SUM query for the single surviving item
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<wishlist_item::Model>::new()]),
            MockDatabase::new(DatabaseBackend::Postgres),
        );

        let detail = svc.get("w1", Some("bicycle"), None).await.unwrap();
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].item.name, "Red Bicycle");
    }

    #[tokio::test]
    async fn test_update_forbidden_for_non_owner() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_wishlist("w1", "u1", false)]]),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
        );

        let result = svc
            .update(
                "u2",
                "w1",
                UpdateWishlistInput {
                    title: Some("Hijacked".to_string()),
                    description: None,
                    spoil_surprises: None,
                    private: None,
                    address: None,
                    date_of_event: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_items() {
        let live = test_wishlist("w1", "u1", false);
        let mut tombstoned = live.clone();
        tombstoned.deleted_at = Some(Utc::now().into());
        tombstoned.deleted_by = Some(DeletionKind::Direct);

        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[live]])
                .append_query_results([[tombstoned]]),
            MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            }]),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
        );

        let result = svc.delete("u1", "w1").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_forbidden_for_non_owner() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_wishlist("w1", "u1", false)]]),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
        );

        let result = svc.delete("u2", "w1").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_friends_recent_queries_friend_owned_lists() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![test_wishlist("w9", "u2", false)]]),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_edge("f1", "u1", "u2")]]),
        );

        let recent = svc.friends_recent("u1").await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].user_id, "u2");
    }

    #[tokio::test]
    async fn test_friends_recent_no_friends_short_circuits() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<friend::Model>::new()]),
        );

        let recent = svc.friends_recent("u1").await.unwrap();
        assert!(recent.is_empty());
    }

    #[tokio::test]
    async fn test_upcoming_events_merges_and_sorts() {
        let mut own = test_wishlist("w1", "u1", false);
        own.date_of_event = Some((Utc::now() + Duration::days(30)).into());
        let mut friends = test_wishlist("w2", "u2", false);
        friends.date_of_event = Some((Utc::now() + Duration::days(5)).into());

        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![own]])
                .append_query_results([vec![friends]]),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_edge("f1", "u1", "u2")]]),
        );

        let events = svc.upcoming_events("u1").await.unwrap();
        assert_eq!(events.len(), 2);
        // The friend's event is sooner, so it sorts first
        assert_eq!(events[0].id, "w2");
        assert_eq!(events[1].id, "w1");
    }
}
