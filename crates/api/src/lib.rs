//! HTTP API layer for wishlinker-rs.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: wishlists, items, friends, purchases, pins, profiles
//! - **Extractors**: bearer-token authentication
//! - **Middleware**: auth, logging, CORS
//! - **Response**: the `{data}` / `{error}` envelope
//!
//! Built on Axum 0.8 with Tower middleware stack.

// Allow dead_code for API compatibility fields in request structs
#![allow(dead_code)]

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
