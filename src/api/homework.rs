use axum::{
    extract::{Path, State},
    Json,
};
use http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::models::{Assignment, CreateAssignmentReq, GradeReq, SubmitHomeworkReq};
use crate::state::AppState;
use crate::views::{AssignmentWithStatus, MessageResp, SubmissionWithAuthor};

pub async fn create_assignment(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateAssignmentReq>,
) -> ApiResult<(StatusCode, Json<Assignment>)> {
    let assignment = state.assignments.create(&user, req).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

pub async fn list_by_course(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(course_id): Path<Uuid>,
) -> ApiResult<Json<Vec<AssignmentWithStatus>>> {
    Ok(Json(
        state.assignments.list_for_course(&user, course_id).await?,
    ))
}

/// 201 with "Submitted" on the first submission, 200 with "Updated" when
/// an existing row was overwritten.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitHomeworkReq>,
) -> ApiResult<(StatusCode, Json<MessageResp>)> {
    let up = state.assignments.submit(&user, id, req).await?;
    let (code, msg) = if up.created {
        (StatusCode::CREATED, "Submitted")
    } else {
        (StatusCode::OK, "Updated")
    };
    Ok((code, Json(MessageResp::new(msg))))
}

pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<SubmissionWithAuthor>>> {
    Ok(Json(state.assignments.submissions(&user, id).await?))
}

pub async fn grade(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(sub_id): Path<Uuid>,
    Json(req): Json<GradeReq>,
) -> ApiResult<Json<MessageResp>> {
    state.assignments.grade(&user, sub_id, req).await?;
    Ok(Json(MessageResp::new("Graded")))
}

pub async fn delete_assignment(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResp>> {
    state.assignments.delete(&user, id).await?;
    Ok(Json(MessageResp::new("Assignment deleted")))
}
