//! Profile service.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::NaiveDate;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;
use wishlinker_common::{
    generate_storage_key, AppError, AppResult, IdGenerator, StorageBackend,
};
use wishlinker_db::{
    entities::{profile, user, wishlist},
    repositories::{FriendRepository, ProfileRepository, UserRepository, WishlistRepository},
};

use super::friend::FriendView;

/// Profile service for profile pages and avatar blobs.
#[derive(Clone)]
pub struct ProfileService {
    profile_repo: ProfileRepository,
    user_repo: UserRepository,
    wishlist_repo: WishlistRepository,
    friend_repo: FriendRepository,
    storage: Arc<dyn StorageBackend>,
    id_gen: IdGenerator,
}

/// A profile page: the user, their public wishlists, and their friends.
///
/// `friend_requests` is populated only when the viewer is looking at their
/// own profile.
#[derive(Debug, Clone)]
pub struct ProfileOverview {
    /// The profiled user.
    pub user: user::Model,
    /// The user's profile row, when one exists.
    pub profile: Option<profile::Model>,
    /// The user's live public wishlists.
    pub wishlists: Vec<wishlist::Model>,
    /// Accepted friends resolved to the far endpoint.
    pub friends: Vec<FriendView>,
    /// Pending edges, own-profile view only.
    pub friend_requests: Option<Vec<FriendView>>,
}

/// Input for creating or updating the caller's profile.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertProfileInput {
    #[validate(length(max = 256))]
    pub bio: Option<String>,

    pub icon: Option<i32>,

    pub birthday: Option<NaiveDate>,

    #[validate(length(max = 256))]
    pub address: Option<String>,

    /// Inline image payload framed as `<mediatype>;base64,<data>`.
    pub image: Option<String>,
}

impl ProfileService {
    /// Create a new profile service.
    #[must_use]
    pub fn new(
        profile_repo: ProfileRepository,
        user_repo: UserRepository,
        wishlist_repo: WishlistRepository,
        friend_repo: FriendRepository,
        storage: Arc<dyn StorageBackend>,
    ) -> Self {
        Self {
            profile_repo,
            user_repo,
            wishlist_repo,
            friend_repo,
            storage,
            id_gen: IdGenerator::new(),
        }
    }

    /// A user's profile page.
    ///
    /// `include_requests` adds the pending friend edges and is set only for
    /// the own-profile view.
    pub async fn overview(&self, user_id: &str, include_requests: bool) -> AppResult<ProfileOverview> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let profile = self.profile_repo.find_by_user_id(user_id).await?;
        let wishlists = self.wishlist_repo.find_by_owner(user_id, false, None).await?;
        let friends = self.resolve_edges(user_id, true).await?;

        let friend_requests = if include_requests {
            Some(self.resolve_edges(user_id, false).await?)
        } else {
            None
        };

        Ok(ProfileOverview {
            user,
            profile,
            wishlists,
            friends,
            friend_requests,
        })
    }

    /// Create or update the caller's profile.
    ///
    /// A supplied image replaces the stored blob; the previous blob is
    /// deleted after the new one is written.
    pub async fn upsert(&self, caller: &str, input: UpsertProfileInput) -> AppResult<profile::Model> {
        input.validate()?;

        let existing = self.profile_repo.find_by_user_id(caller).await?;

        let mut uploaded = None;
        if let Some(image) = &input.image {
            let (content_type, data) = parse_inline_image(image)?;
            let key = generate_storage_key(caller, &content_type);
            uploaded = Some(self.storage.upload(&key, &data, &content_type).await?);
        }

        let model = match existing {
            Some(profile) => {
                let old_image_key = profile.image_key.clone();

                let mut active: profile::ActiveModel = profile.into();
                if let Some(bio) = input.bio {
                    active.bio = Set(bio);
                }
                if let Some(icon) = input.icon {
                    active.icon = Set(Some(icon));
                }
                if let Some(birthday) = input.birthday {
                    active.birthday = Set(Some(birthday));
                }
                if let Some(address) = input.address {
                    active.address = Set(address);
                }
                if let Some(file) = &uploaded {
                    active.image_key = Set(Some(file.key.clone()));
                    active.image_url = Set(Some(file.url.clone()));
                }
                active.updated_at = Set(Some(chrono::Utc::now().into()));

                let updated = self.profile_repo.update(active).await?;

                // Discard the replaced blob only once the row points at the
                // new one
                if let (Some(_), Some(old_key)) = (&uploaded, old_image_key) {
                    if let Err(e) = self.storage.delete(&old_key).await {
                        tracing::warn!(key = %old_key, error = %e, "Failed to delete replaced profile image");
                    }
                }

                updated
            }
            None => {
                let model = profile::ActiveModel {
                    id: Set(self.id_gen.generate()),
                    user_id: Set(caller.to_string()),
                    bio: Set(input.bio.unwrap_or_default()),
                    icon: Set(input.icon),
                    birthday: Set(input.birthday),
                    address: Set(input.address.unwrap_or_default()),
                    image_key: Set(uploaded.as_ref().map(|f| f.key.clone())),
                    image_url: Set(uploaded.as_ref().map(|f| f.url.clone())),
                    created_at: Set(chrono::Utc::now().into()),
                    updated_at: Set(None),
                };

                self.profile_repo.create(model).await?
            }
        };

        Ok(model)
    }

    /// Resolve a user's edges of one acceptance status to the far endpoint.
    async fn resolve_edges(&self, user_id: &str, accepted: bool) -> AppResult<Vec<FriendView>> {
        let edges = self.friend_repo.find_for_user(user_id, accepted).await?;
        let other_ids: Vec<String> = edges
            .iter()
            .map(|e| e.other_endpoint(user_id).to_string())
            .collect();

        let users = self.user_repo.find_by_ids(&other_ids).await?;

        Ok(edges
            .into_iter()
            .filter_map(|edge| {
                let other_id = edge.other_endpoint(user_id).to_string();
                users.iter().find(|u| u.id == other_id).map(|u| FriendView {
                    edge_id: edge.id.clone(),
                    accepted: edge.accepted,
                    user: u.clone(),
                })
            })
            .collect())
    }
}

/// Split an inline image payload into its MIME type and decoded bytes.
///
/// Accepts `<mediatype>;base64,<data>` with an optional `data:` prefix.
fn parse_inline_image(input: &str) -> AppResult<(String, Vec<u8>)> {
    let (mediatype, data) = input.split_once(";base64,").ok_or_else(|| {
        AppError::Validation("Image must be framed as <mediatype>;base64,<data>".to_string())
    })?;

    let content_type = mediatype.strip_prefix("data:").unwrap_or(mediatype);
    if content_type.is_empty() {
        return Err(AppError::Validation("Image mediatype is missing".to_string()));
    }

    let bytes = BASE64
        .decode(data.trim())
        .map_err(|e| AppError::Validation(format!("Invalid base64 image payload: {e}")))?;

    Ok((content_type.to_string(), bytes))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Mutex;
    use wishlinker_common::UploadedFile;
    use wishlinker_db::entities::friend;

    /// In-memory storage backend that records uploads and deletes.
    #[derive(Default)]
    struct RecordingStorage {
        uploads: Mutex<Vec<String>>,
        deletes: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl StorageBackend for RecordingStorage {
        async fn upload(
            &self,
            key: &str,
            data: &[u8],
            content_type: &str,
        ) -> AppResult<UploadedFile> {
            self.uploads.lock().unwrap().push(key.to_string());
            Ok(UploadedFile {
                key: key.to_string(),
                url: format!("/files/{key}"),
                size: data.len() as u64,
                content_type: content_type.to_string(),
                md5: String::new(),
            })
        }

        async fn delete(&self, key: &str) -> AppResult<()> {
            self.deletes.lock().unwrap().push(key.to_string());
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!("/files/{key}")
        }

        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Ok(false)
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

    fn test_profile(id: &str, user_id: &str, image_key: Option<&str>) -> profile::Model {
        profile::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            bio: "Hello".to_string(),
            icon: None,
            birthday: None,
            address: String::new(),
            image_key: image_key.map(ToString::to_string),
            image_url: image_key.map(|k| format!("/files/{k}")),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with_storage(
        profile_db: MockDatabase,
        user_db: MockDatabase,
        wishlist_db: MockDatabase,
        friend_db: MockDatabase,
        storage: Arc<RecordingStorage>,
    ) -> ProfileService {
        ProfileService::new(
            ProfileRepository::new(Arc::new(profile_db.into_connection())),
            UserRepository::new(Arc::new(user_db.into_connection())),
            WishlistRepository::new(Arc::new(wishlist_db.into_connection())),
            FriendRepository::new(Arc::new(friend_db.into_connection())),
            storage,
        )
    }

    #[test]
    fn test_parse_inline_image_plain_framing() {
        let encoded = BASE64.encode(b"pixels");
        let input = format!("image/png;base64,{encoded}");

        let (content_type, data) = parse_inline_image(&input).unwrap();
        assert_eq!(content_type, "image/png");
        assert_eq!(data, b"pixels");
    }

    #[test]
    fn test_parse_inline_image_data_url_prefix() {
        let encoded = BASE64.encode(b"pixels");
        let input = format!("data:image/jpeg;base64,{encoded}");

        let (content_type, _) = parse_inline_image(&input).unwrap();
        assert_eq!(content_type, "image/jpeg");
    }

    #[test]
    fn test_parse_inline_image_rejects_missing_framing() {
        let result = parse_inline_image("not-an-image");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_upsert_creates_profile_when_missing() {
        let storage = Arc::new(RecordingStorage::default());
        let svc = service_with_storage(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<profile::Model>::new()])
                .append_query_results([[test_profile("pf1", "u1", None)]]),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            Arc::clone(&storage),
        );

        let profile = svc
            .upsert(
                "u1",
                UpsertProfileInput {
                    bio: Some("Hello".to_string()),
                    icon: None,
                    birthday: None,
                    address: None,
                    image: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.user_id, "u1");
        assert!(storage.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_image_and_discards_old_blob() {
        let encoded = BASE64.encode(b"newpixels");
        let image = format!("image/png;base64,{encoded}");

        let storage = Arc::new(RecordingStorage::default());
        let svc = service_with_storage(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_profile("pf1", "u1", Some("old/key.png"))]])
                .append_query_results([[test_profile("pf1", "u1", Some("new/key.png"))]]),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            Arc::clone(&storage),
        );

        let result = svc
            .upsert(
                "u1",
                UpsertProfileInput {
                    bio: None,
                    icon: None,
                    birthday: None,
                    address: None,
                    image: Some(image),
                },
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(storage.uploads.lock().unwrap().len(), 1);
        assert_eq!(
            storage.deletes.lock().unwrap().as_slice(),
            ["old/key.png".to_string()]
        );
    }

    #[tokio::test]
    async fn test_overview_includes_requests_only_for_self() {
        let edges = vec![friend::Model {
            id: "f1".to_string(),
            user1_id: "u1".to_string(),
            user2_id: "u2".to_string(),
            accepted: true,
            created_at: Utc::now().into(),
        }];

        let svc = service_with_storage(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<profile::Model>::new()]),
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user("u1", "ryan")]])
                .append_query_results([[test_user("u2", "meg")]]),
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<wishlist::Model>::new()]),
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([edges]),
            Arc::new(RecordingStorage::default()),
        );

        let overview = svc.overview("u1", false).await.unwrap();
        assert_eq!(overview.friends.len(), 1);
        assert_eq!(overview.friends[0].user.username, "meg");
        assert!(overview.friend_requests.is_none());
    }
}
