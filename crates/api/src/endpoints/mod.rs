//! API endpoints.

mod auth;
mod friends;
mod pins;
mod priorities;
mod profile;
mod purchases;
mod wishlist_items;
mod wishlists;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(wishlists::router())
        .merge(wishlist_items::router())
        .merge(priorities::router())
        .merge(friends::router())
        .merge(purchases::router())
        .merge(pins::router())
        .merge(profile::router())
}
