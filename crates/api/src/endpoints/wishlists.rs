//! Wishlist endpoints, including the friend-facing feeds.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use wishlinker_common::AppResult;
use wishlinker_db::entities::wishlist;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

use super::wishlist_items::ItemResponse;

/// Wishlist response.
#[derive(Serialize)]
pub struct WishlistResponse {
    pub id: String,
    pub user: String,
    pub title: String,
    pub description: String,
    pub spoil_surprises: bool,
    pub private: bool,
    pub address: Option<String>,
    pub creation_date: String,
    pub date_of_event: Option<String>,
    pub pinned: bool,
}

impl From<wishlist::Model> for WishlistResponse {
    fn from(w: wishlist::Model) -> Self {
        Self {
            id: w.id,
            user: w.user_id,
            title: w.title,
            description: w.description,
            spoil_surprises: w.spoil_surprises,
            private: w.private,
            address: w.address,
            creation_date: w.created_at.to_rfc3339(),
            date_of_event: w.date_of_event.map(|d| d.to_rfc3339()),
            pinned: w.pinned,
        }
    }
}

/// The caller's wishlists partitioned by privacy.
#[derive(Serialize)]
pub struct WishlistBucketsResponse {
    pub public: Vec<WishlistResponse>,
    pub private: Vec<WishlistResponse>,
}

/// A wishlist with its item list.
#[derive(Serialize)]
pub struct WishlistDetailResponse {
    #[serde(flatten)]
    pub wishlist: WishlistResponse,
    pub items: Vec<ItemResponse>,
}

/// List query.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

/// Retrieve query: item filters applied after the fetch.
#[derive(Debug, Deserialize)]
pub struct RetrieveQuery {
    pub q: Option<String>,
    pub priority: Option<String>,
}

/// Create wishlist request. Any client-supplied owner is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateWishlistRequest {
    pub title: String,
    pub description: String,
    pub spoil_surprises: Option<bool>,
    pub private: Option<bool>,
    pub address: Option<String>,
    pub date_of_event: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// Update wishlist request.
#[derive(Debug, Deserialize)]
pub struct UpdateWishlistRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub spoil_surprises: Option<bool>,
    pub private: Option<bool>,
    pub address: Option<String>,
    pub date_of_event: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// Pinned-flag request.
#[derive(Debug, Deserialize)]
pub struct PinnedRequest {
    pub pinned: bool,
}

/// List the caller's wishlists, partitioned into public and private buckets.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<WishlistBucketsResponse>> {
    let buckets = state
        .wishlist_service
        .list_mine(&user.id, query.q.as_deref())
        .await?;

    Ok(ApiResponse::ok(WishlistBucketsResponse {
        public: buckets.public.into_iter().map(Into::into).collect(),
        private: buckets.private.into_iter().map(Into::into).collect(),
    }))
}

/// Retrieve a wishlist with its live items.
async fn retrieve(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RetrieveQuery>,
) -> AppResult<ApiResponse<WishlistDetailResponse>> {
    let detail = state
        .wishlist_service
        .get(&id, query.q.as_deref(), query.priority.as_deref())
        .await?;

    Ok(ApiResponse::ok(WishlistDetailResponse {
        wishlist: detail.wishlist.into(),
        items: detail.items.into_iter().map(Into::into).collect(),
    }))
}

/// Create a wishlist owned by the caller.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateWishlistRequest>,
) -> AppResult<ApiResponse<WishlistResponse>> {
    let input = wishlinker_core::CreateWishlistInput {
        title: req.title,
        description: req.description,
        spoil_surprises: req.spoil_surprises,
        private: req.private,
        address: req.address,
        date_of_event: req.date_of_event,
    };

    let wishlist = state.wishlist_service.create(&user.id, input).await?;

    Ok(ApiResponse::created(wishlist.into()))
}

/// Update a wishlist. Owner only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateWishlistRequest>,
) -> AppResult<ApiResponse<WishlistResponse>> {
    let input = wishlinker_core::UpdateWishlistInput {
        title: req.title,
        description: req.description,
        spoil_surprises: req.spoil_surprises,
        private: req.private,
        address: req.address,
        date_of_event: req.date_of_event,
    };

    let wishlist = state.wishlist_service.update(&user.id, &id, input).await?;

    Ok(ApiResponse::ok(wishlist.into()))
}

/// Delete a wishlist and cascade to its items. Owner only.
async fn destroy(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.wishlist_service.delete(&user.id, &id).await?;

    Ok(crate::response::ok())
}

/// Flip the personal pinned flag. Owner only.
async fn set_pinned(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<PinnedRequest>,
) -> AppResult<impl IntoResponse> {
    state
        .wishlist_service
        .set_pinned(&user.id, &id, req.pinned)
        .await?;

    Ok(crate::response::ok())
}

/// Public wishlists created by accepted friends in the trailing two weeks.
async fn friends_recent(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<WishlistResponse>>> {
    let recent = state.wishlist_service.friends_recent(&user.id).await?;

    Ok(ApiResponse::ok(recent.into_iter().map(Into::into).collect()))
}

/// Own and friends' wishlists with an event date, soonest first.
async fn upcoming_events(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<WishlistResponse>>> {
    let events = state.wishlist_service.upcoming_events(&user.id).await?;

    Ok(ApiResponse::ok(events.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wishlists", get(list).post(create))
        .route(
            "/wishlists/{id}",
            get(retrieve).put(update).delete(destroy),
        )
        .route("/wishlists/{id}/pinned", put(set_pinned))
        .route("/friends_recent_wishlists", get(friends_recent))
        .route("/upcoming_events", get(upcoming_events))
}
