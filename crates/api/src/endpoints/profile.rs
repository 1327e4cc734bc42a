//! Profile endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wishlinker_common::AppResult;
use wishlinker_core::{FriendView, ProfileOverview};
use wishlinker_db::entities::{profile, wishlist};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

use super::friends::UserResponse;

/// Wishlist summary embedded in profile responses.
#[derive(Serialize)]
pub struct ProfileWishlistResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub creation_date: String,
    pub date_of_event: Option<String>,
}

impl From<wishlist::Model> for ProfileWishlistResponse {
    fn from(w: wishlist::Model) -> Self {
        Self {
            id: w.id,
            title: w.title,
            description: w.description,
            creation_date: w.created_at.to_rfc3339(),
            date_of_event: w.date_of_event.map(|d| d.to_rfc3339()),
        }
    }
}

/// A friend edge with the far endpoint's user info.
#[derive(Serialize)]
pub struct FriendInfoResponse {
    pub id: String,
    pub friend_info: UserResponse,
}

impl From<FriendView> for FriendInfoResponse {
    fn from(view: FriendView) -> Self {
        Self {
            id: view.edge_id,
            friend_info: view.user.into(),
        }
    }
}

/// Profile details (bio, birthday, avatar).
#[derive(Serialize)]
pub struct ProfileDetailsResponse {
    pub id: String,
    pub bio: String,
    pub icon: Option<i32>,
    pub birthday: Option<NaiveDate>,
    pub address: String,
    pub image: Option<String>,
}

impl From<profile::Model> for ProfileDetailsResponse {
    fn from(p: profile::Model) -> Self {
        Self {
            id: p.id,
            bio: p.bio,
            icon: p.icon,
            birthday: p.birthday,
            address: p.address,
            image: p.image_url,
        }
    }
}

/// A profile page: user, public wishlists, friends.
#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileDetailsResponse>,
    pub wishlists: Vec<ProfileWishlistResponse>,
    pub friends: Vec<FriendInfoResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_requests: Option<Vec<FriendInfoResponse>>,
}

impl From<ProfileOverview> for ProfileResponse {
    fn from(overview: ProfileOverview) -> Self {
        Self {
            user: overview.user.into(),
            profile: overview.profile.map(Into::into),
            wishlists: overview.wishlists.into_iter().map(Into::into).collect(),
            friends: overview.friends.into_iter().map(Into::into).collect(),
            friend_requests: overview
                .friend_requests
                .map(|reqs| reqs.into_iter().map(Into::into).collect()),
        }
    }
}

/// Upsert profile request.
#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub bio: Option<String>,
    pub icon: Option<i32>,
    pub birthday: Option<NaiveDate>,
    pub address: Option<String>,
    /// Inline image payload framed as `<mediatype>;base64,<data>`.
    pub image: Option<String>,
}

/// The caller's own profile, including pending friend requests.
async fn own(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let overview = state.profile_service.overview(&user.id, true).await?;

    Ok(ApiResponse::ok(overview.into()))
}

/// Another user's profile; pending requests are not exposed.
async fn retrieve(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let overview = state.profile_service.overview(&id, false).await?;

    Ok(ApiResponse::ok(overview.into()))
}

/// Create or update the caller's profile.
async fn upsert(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpsertProfileRequest>,
) -> AppResult<ApiResponse<ProfileDetailsResponse>> {
    let input = wishlinker_core::UpsertProfileInput {
        bio: req.bio,
        icon: req.icon,
        birthday: req.birthday,
        address: req.address,
        image: req.image,
    };

    let profile = state.profile_service.upsert(&user.id, input).await?;

    Ok(ApiResponse::ok(profile.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(own).post(upsert).put(upsert))
        .route("/profile/{id}", get(retrieve))
}
