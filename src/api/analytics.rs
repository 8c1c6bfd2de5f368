use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;
use crate::views::{InstructorSummary, RosterRow, StudentDashboard};

pub async fn instructor_summary(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<InstructorSummary>> {
    Ok(Json(state.analytics.instructor_summary(&user).await?))
}

pub async fn instructor_students(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<Vec<RosterRow>>> {
    Ok(Json(state.analytics.instructor_roster(&user).await?))
}

pub async fn student_dashboard(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<StudentDashboard>> {
    Ok(Json(
        state.analytics.student_dashboard(&user, Utc::now()).await?,
    ))
}
