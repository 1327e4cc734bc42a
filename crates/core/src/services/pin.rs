//! Pin service (wishlist bookmarks).

use sea_orm::Set;
use wishlinker_common::{AppError, AppResult, IdGenerator};
use wishlinker_db::{
    entities::{pin, user, wishlist},
    repositories::{PinRepository, UserRepository, WishlistRepository},
};

/// Pin service for bookmarking wishlists.
#[derive(Clone)]
pub struct PinService {
    pin_repo: PinRepository,
    wishlist_repo: WishlistRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// A pin resolved to its wishlist and the wishlist's owner.
#[derive(Debug, Clone)]
pub struct PinView {
    /// The pin row.
    pub pin: pin::Model,
    /// The pinned wishlist, if it is still live.
    pub wishlist: Option<wishlist::Model>,
    /// The wishlist's owner.
    pub owner: Option<user::Model>,
}

impl PinService {
    /// Create a new pin service.
    #[must_use]
    pub const fn new(
        pin_repo: PinRepository,
        wishlist_repo: WishlistRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            pin_repo,
            wishlist_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Pin a wishlist to the caller's homepage.
    ///
    /// The wishlist must exist. Pinning the same wishlist twice creates a
    /// second pin row.
    pub async fn create(&self, caller: &str, wishlist_id: &str) -> AppResult<PinView> {
        let wishlist = self.wishlist_repo.get_by_id(wishlist_id).await?;
        let owner = self.user_repo.find_by_id(&wishlist.user_id).await?;

        let model = pin::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(caller.to_string()),
            wishlist_id: Set(wishlist_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        let pin = self.pin_repo.create(model).await?;

        Ok(PinView {
            pin,
            wishlist: Some(wishlist),
            owner,
        })
    }

    /// The caller's pins, joined with each pinned wishlist and its owner.
    pub async fn list(&self, caller: &str) -> AppResult<Vec<PinView>> {
        let pins = self.pin_repo.find_by_user(caller).await?;

        let mut views = Vec::with_capacity(pins.len());
        for pin in pins {
            let wishlist = self.wishlist_repo.find_by_id(&pin.wishlist_id).await?;
            let owner = match &wishlist {
                Some(w) => self.user_repo.find_by_id(&w.user_id).await?,
                None => None,
            };
            views.push(PinView {
                pin,
                wishlist,
                owner,
            });
        }

        Ok(views)
    }

    /// Remove a pin. Only the pin's creator may remove it.
    pub async fn delete(&self, caller: &str, pin_id: &str) -> AppResult<()> {
        let pin = self.pin_repo.get_by_id(pin_id).await?;

        if pin.user_id != caller {
            return Err(AppError::Forbidden(
                "You don't have permission to delete this pin".to_string(),
            ));
        }

        self.pin_repo.delete(pin_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_pin(id: &str, user_id: &str, wishlist_id: &str) -> pin::Model {
        pin::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            wishlist_id: wishlist_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn test_wishlist(id: &str, owner: &str) -> wishlist::Model {
        wishlist::Model {
            id: id.to_string(),
            user_id: owner.to_string(),
            title: "My 40th Birthday".to_string(),
            description: "A few things I like".to_string(),
            spoil_surprises: false,
            private: false,
            address: None,
            date_of_event: None,
            pinned: false,
            created_at: Utc::now().into(),
            deleted_at: None,
            deleted_by: None,
        }
    }

    fn test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            token: None,
            password: None,
            first_name: None,
            last_name: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(
        pin_db: MockDatabase,
        wishlist_db: MockDatabase,
        user_db: MockDatabase,
    ) -> PinService {
        PinService::new(
            PinRepository::new(Arc::new(pin_db.into_connection())),
            WishlistRepository::new(Arc::new(wishlist_db.into_connection())),
            UserRepository::new(Arc::new(user_db.into_connection())),
        )
    }

    #[tokio::test]
    async fn test_create_missing_wishlist() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<wishlist::Model>::new()]),
            MockDatabase::new(DatabaseBackend::Postgres),
        );

        let result = svc.create("u2", "ghost").await;
        assert!(matches!(result, Err(AppError::WishlistNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_inserts_pin_and_joins_wishlist() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_pin("pn1", "u2", "w1")]]),
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_wishlist("w1", "u1")]]),
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user("u1", "ryan")]]),
        );

        let view = svc.create("u2", "w1").await.unwrap();
        assert_eq!(view.pin.user_id, "u2");
        assert_eq!(view.pin.wishlist_id, "w1");
        assert_eq!(view.wishlist.as_ref().unwrap().id, "w1");
        assert_eq!(view.owner.as_ref().unwrap().username, "ryan");
    }

    #[tokio::test]
    async fn test_list_joins_wishlist_and_owner() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_pin("pn1", "u2", "w1")]]),
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_wishlist("w1", "u1")]]),
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user("u1", "ryan")]]),
        );

        let views = svc.list("u2").await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].wishlist.as_ref().unwrap().id, "w1");
        assert_eq!(views[0].owner.as_ref().unwrap().username, "ryan");
    }

    #[tokio::test]
    async fn test_delete_forbidden_for_other_user() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_pin("pn1", "u2", "w1")]]),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
        );

        let result = svc.delete("u3", "pn1").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_pin() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<pin::Model>::new()]),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
        );

        let result = svc.delete("u2", "ghost").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
