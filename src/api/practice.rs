use axum::{
    extract::{Path, State},
    Json,
};
use http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::models::{CreateChallengeReq, PracticeChallenge, RunChallengeReq};
use crate::state::AppState;
use crate::views::RunReport;

pub async fn list(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<PracticeChallenge>>> {
    Ok(Json(state.practice.list().await?))
}

pub async fn get_challenge(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PracticeChallenge>> {
    Ok(Json(state.practice.get(id).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateChallengeReq>,
) -> ApiResult<(StatusCode, Json<PracticeChallenge>)> {
    let challenge = state.practice.create(&user, req).await?;
    Ok((StatusCode::CREATED, Json(challenge)))
}

pub async fn run(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RunChallengeReq>,
) -> ApiResult<Json<RunReport>> {
    Ok(Json(state.practice.run(&user, id, req).await?))
}
