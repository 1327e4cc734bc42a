//! Purchase endpoints.
//!
//! Purchases are listed only for the purchaser; no owner-facing path exposes
//! who bought what.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use wishlinker_common::AppResult;
use wishlinker_core::PurchaseView;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Purchase response.
#[derive(Serialize)]
pub struct PurchaseResponse {
    pub id: String,
    pub wishlist_item: String,
    pub user: String,
    pub purchase_date: String,
    pub quantity: i32,
}

/// A purchase in the caller's own listing, resolved to its item.
#[derive(Serialize)]
pub struct MyPurchaseResponse {
    pub id: String,
    pub quantity: i32,
    pub purchase_date: String,
    pub item: Option<PurchasedItemResponse>,
}

/// The purchased item and the wishlist it sits on.
#[derive(Serialize)]
pub struct PurchasedItemResponse {
    pub id: String,
    pub name: String,
    pub website_url: Option<String>,
    pub wishlist: Option<PurchasedWishlistResponse>,
}

/// Wishlist context for a purchase listing.
#[derive(Serialize)]
pub struct PurchasedWishlistResponse {
    pub id: String,
    pub user: String,
    pub title: String,
    pub address: Option<String>,
}

impl From<PurchaseView> for MyPurchaseResponse {
    fn from(view: PurchaseView) -> Self {
        Self {
            id: view.purchase.id,
            quantity: view.purchase.quantity,
            purchase_date: view.purchase.purchase_date.to_rfc3339(),
            item: view.item.map(|i| PurchasedItemResponse {
                id: i.id,
                name: i.name,
                website_url: i.website_url,
                wishlist: view.wishlist.map(|w| PurchasedWishlistResponse {
                    id: w.id,
                    user: w.user_id,
                    title: w.title,
                    address: w.address,
                }),
            }),
        }
    }
}

/// Create purchase request.
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseRequest {
    pub wishlist_item: String,
    pub quantity: Option<i32>,
}

/// Record a purchase of a wishlist item by the caller.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreatePurchaseRequest>,
) -> AppResult<ApiResponse<PurchaseResponse>> {
    let purchase = state
        .purchase_service
        .create(&user.id, &req.wishlist_item, req.quantity.unwrap_or(1))
        .await?;

    Ok(ApiResponse::created(PurchaseResponse {
        id: purchase.id,
        wishlist_item: purchase.wishlist_item_id,
        user: purchase.user_id,
        purchase_date: purchase.purchase_date.to_rfc3339(),
        quantity: purchase.quantity,
    }))
}

/// List the caller's own purchases.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<MyPurchaseResponse>>> {
    let views = state.purchase_service.list_mine(&user.id).await?;

    Ok(ApiResponse::ok(views.into_iter().map(Into::into).collect()))
}

/// Delete a purchase. Purchaser only.
async fn destroy(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.purchase_service.delete(&user.id, &id).await?;

    Ok(crate::response::ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/purchases", get(list).post(create))
        .route("/purchases/{id}", delete(destroy))
}
