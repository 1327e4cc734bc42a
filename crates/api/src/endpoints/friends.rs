//! Friend graph endpoints.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use wishlinker_common::AppResult;
use wishlinker_db::entities::user;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// User info embedded in friend responses.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

/// Friend edge response.
#[derive(Serialize)]
pub struct FriendResponse {
    pub id: String,
    pub user1: String,
    pub user2: String,
    pub accepted: bool,
}

/// A friend-candidate annotated with pending-request state.
#[derive(Serialize)]
pub struct CandidateResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub pending_sent: bool,
    pub pending_received: bool,
}

/// Create friend request body.
#[derive(Debug, Deserialize)]
pub struct CreateFriendRequest {
    pub user: String,
}

/// Update friend request body.
#[derive(Debug, Deserialize)]
pub struct UpdateFriendRequest {
    pub accepted: bool,
}

/// Candidate discovery query.
#[derive(Debug, Deserialize)]
pub struct DiscoveryQuery {
    pub q: Option<String>,
}

/// Send a friend request.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateFriendRequest>,
) -> AppResult<ApiResponse<FriendResponse>> {
    let edge = state.friend_service.create(&user.id, &req.user).await?;

    Ok(ApiResponse::created(FriendResponse {
        id: edge.id,
        user1: edge.user1_id,
        user2: edge.user2_id,
        accepted: edge.accepted,
    }))
}

/// Flip the acceptance status of a friend edge.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateFriendRequest>,
) -> AppResult<impl IntoResponse> {
    state.friend_service.update(&user.id, &id, req.accepted).await?;

    Ok(crate::response::ok())
}

/// Remove a friend edge (unfriend or reject).
async fn destroy(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.friend_service.delete(&user.id, &id).await?;

    Ok(crate::response::ok())
}

/// Candidate discovery: users who could be friended, annotated with
/// pending-request state.
async fn candidates(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<DiscoveryQuery>,
) -> AppResult<ApiResponse<Vec<CandidateResponse>>> {
    let candidates = state
        .friend_service
        .candidates(&user.id, query.q.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        candidates
            .into_iter()
            .map(|c| CandidateResponse {
                user: c.user.into(),
                pending_sent: c.pending_sent,
                pending_received: c.pending_received,
            })
            .collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/friends", get(candidates).post(create))
        .route("/friends/{id}", put(update).delete(destroy))
}
