use axum::{extract::State, Json};
use chrono::Utc;
use http::StatusCode;
use std::sync::Arc;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::models::CreateContestReq;
use crate::state::AppState;
use crate::views::ContestView;

pub async fn create(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateContestReq>,
) -> ApiResult<(StatusCode, Json<ContestView>)> {
    let view = state.contests.create(&user, req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<Vec<ContestView>>> {
    Ok(Json(state.contests.list(&user, Utc::now()).await?))
}
