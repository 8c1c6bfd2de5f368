use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{sync_identity, AuthUser, BearerToken};
use crate::error::{ApiError, ApiResult};
use crate::models::SetStatusReq;
use crate::state::AppState;
use crate::views::{LoginResp, MessageResp, UserProfile};

pub async fn login(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<LoginResp>> {
    let user = sync_identity(&state, &token).await?;
    tracing::info!(user_id = %user.id, role = %user.role, status = %user.status, "identity synced");
    Ok(Json(LoginResp {
        user: UserProfile::from(user),
    }))
}

pub async fn me(user: AuthUser) -> Json<UserProfile> {
    Json(UserProfile::from(user.0))
}

pub async fn set_user_status(
    State(state): State<Arc<AppState>>,
    admin: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusReq>,
) -> ApiResult<Json<MessageResp>> {
    admin.require_admin()?;
    if !state.store.set_user_status(id, req.status).await? {
        return Err(ApiError::NotFound("User"));
    }
    tracing::info!(user_id = %id, status = %req.status, "user status changed");
    Ok(Json(MessageResp::new("Status updated")))
}
