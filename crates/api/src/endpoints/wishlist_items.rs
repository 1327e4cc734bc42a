//! Wishlist item endpoints.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use wishlinker_common::AppResult;
use wishlinker_core::ItemView;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Wishlist item response with derived quantities.
#[derive(Serialize)]
pub struct ItemResponse {
    pub id: String,
    pub wishlist: String,
    pub name: String,
    pub note: Option<String>,
    pub website_url: Option<String>,
    pub quantity: i32,
    pub priority: Option<String>,
    pub creation_date: String,
    pub purchased_quantity: i64,
    pub leftover_quantity: i64,
}

impl From<ItemView> for ItemResponse {
    fn from(view: ItemView) -> Self {
        Self {
            id: view.item.id,
            wishlist: view.item.wishlist_id,
            name: view.item.name,
            note: view.item.note,
            website_url: view.item.website_url,
            quantity: view.item.quantity,
            priority: view.item.priority_id,
            creation_date: view.item.created_at.to_rfc3339(),
            purchased_quantity: view.purchased_quantity,
            leftover_quantity: view.leftover_quantity,
        }
    }
}

/// Create item request.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub wishlist: String,
    pub name: String,
    pub note: Option<String>,
    pub website_url: Option<String>,
    pub quantity: Option<i32>,
    pub priority: Option<String>,
}

/// Update item request.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub note: Option<String>,
    pub website_url: Option<String>,
    pub quantity: Option<i32>,
    pub priority: Option<String>,
}

/// Create a new wishlist item.
async fn create(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> AppResult<ApiResponse<ItemResponse>> {
    let input = wishlinker_core::CreateItemInput {
        wishlist_id: req.wishlist,
        name: req.name,
        note: req.note,
        website_url: req.website_url,
        quantity: req.quantity,
        priority_id: req.priority,
    };

    let view = state.wishlist_item_service.create(input).await?;

    Ok(ApiResponse::created(view.into()))
}

/// Retrieve a wishlist item.
async fn retrieve(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ItemResponse>> {
    let view = state.wishlist_item_service.get(&id).await?;

    Ok(ApiResponse::ok(view.into()))
}

/// Update a wishlist item. Wishlist owner only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> AppResult<ApiResponse<ItemResponse>> {
    let input = wishlinker_core::UpdateItemInput {
        name: req.name,
        note: req.note,
        website_url: req.website_url,
        quantity: req.quantity,
        priority_id: req.priority,
    };

    let view = state.wishlist_item_service.update(&user.id, &id, input).await?;

    Ok(ApiResponse::ok(view.into()))
}

/// Delete a wishlist item. Wishlist owner only.
async fn destroy(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.wishlist_item_service.delete(&user.id, &id).await?;

    Ok(crate::response::ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wishlist_items", post(create))
        .route(
            "/wishlist_items/{id}",
            get(retrieve).put(update).delete(destroy),
        )
}
