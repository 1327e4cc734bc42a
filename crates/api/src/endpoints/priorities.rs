//! Priority lookup endpoint.

use axum::{extract::State, routing::get, Router};
use serde::Serialize;
use wishlinker_common::AppResult;
use wishlinker_db::entities::priority;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Priority response.
#[derive(Serialize)]
pub struct PriorityResponse {
    pub id: String,
    pub name: String,
}

impl From<priority::Model> for PriorityResponse {
    fn from(p: priority::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

/// List the global priority levels.
async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<PriorityResponse>>> {
    let priorities = state.priority_service.list().await?;

    Ok(ApiResponse::ok(
        priorities.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/priorities", get(list))
}
