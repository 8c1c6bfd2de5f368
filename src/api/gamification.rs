use axum::{extract::State, Json};
use std::sync::Arc;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;
use crate::views::{CertificateView, LeaderboardRow};

/// Public: the ranking shows on the landing page before login.
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<LeaderboardRow>>> {
    Ok(Json(state.gamification.leaderboard().await?))
}

pub async fn certificates(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<Vec<CertificateView>>> {
    Ok(Json(state.gamification.certificates(&user).await?))
}
