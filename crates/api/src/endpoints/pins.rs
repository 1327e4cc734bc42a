//! Pin endpoints (wishlist bookmarks).

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use wishlinker_common::AppResult;
use wishlinker_core::PinView;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

use super::friends::UserResponse;

/// A pinned wishlist with its owner.
#[derive(Serialize)]
pub struct PinnedWishlistResponse {
    pub id: String,
    pub user: UserResponse,
    pub title: String,
    pub description: String,
    pub creation_date: String,
    pub date_of_event: Option<String>,
}

/// Pin response.
#[derive(Serialize)]
pub struct PinResponse {
    pub id: String,
    pub user: String,
    pub wishlist: Option<PinnedWishlistResponse>,
}

impl From<PinView> for PinResponse {
    fn from(view: PinView) -> Self {
        let wishlist = match (view.wishlist, view.owner) {
            (Some(w), Some(owner)) => Some(PinnedWishlistResponse {
                id: w.id,
                user: owner.into(),
                title: w.title,
                description: w.description,
                creation_date: w.created_at.to_rfc3339(),
                date_of_event: w.date_of_event.map(|d| d.to_rfc3339()),
            }),
            _ => None,
        };

        Self {
            id: view.pin.id,
            user: view.pin.user_id,
            wishlist,
        }
    }
}

/// Create pin request.
#[derive(Debug, Deserialize)]
pub struct CreatePinRequest {
    pub wishlist: String,
}

/// Pin a wishlist to the caller's homepage.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreatePinRequest>,
) -> AppResult<ApiResponse<PinResponse>> {
    let view = state.pin_service.create(&user.id, &req.wishlist).await?;

    Ok(ApiResponse::created(view.into()))
}

/// List the caller's pins, joined with wishlist and owner.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<PinResponse>>> {
    let views = state.pin_service.list(&user.id).await?;

    Ok(ApiResponse::ok(views.into_iter().map(Into::into).collect()))
}

/// Remove a pin. Pin owner only.
async fn destroy(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.pin_service.delete(&user.id, &id).await?;

    Ok(crate::response::ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pins", get(list).post(create))
        .route("/pins/{id}", delete(destroy))
}
