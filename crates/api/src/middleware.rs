//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use wishlinker_core::{
    FriendService, PinService, PriorityService, ProfileService, PurchaseService, UserService,
    WishlistItemService, WishlistService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub friend_service: FriendService,
    pub wishlist_service: WishlistService,
    pub wishlist_item_service: WishlistItemService,
    pub priority_service: PriorityService,
    pub purchase_service: PurchaseService,
    pub pin_service: PinService,
    pub profile_service: ProfileService,
}

/// Authentication middleware.
///
/// Accepts both `Bearer <token>` and the legacy `Token <token>` scheme.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
    {
        let token = auth_str
            .strip_prefix("Bearer ")
            .or_else(|| auth_str.strip_prefix("Token "));

        if let Some(token) = token {
            match state.user_service.authenticate_by_token(token).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                }
                Err(_) => {
                    tracing::debug!("Rejected unknown bearer token");
                }
            }
        }
    }

    next.run(req).await
}
