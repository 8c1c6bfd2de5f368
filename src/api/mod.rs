//! HTTP surface. Handlers stay thin: extract, call the service, wrap the
//! view. All policy lives in the services.

pub mod analytics;
pub mod auth;
pub mod contests;
pub mod gamification;
pub mod homework;
pub mod practice;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // identity
        .route("/api/auth/login", post(auth::login))
        .route("/api/users/me", get(auth::me))
        .route("/api/admin/users/:id/status", post(auth::set_user_status))
        // homework
        .route("/api/homework", post(homework::create_assignment))
        .route("/api/homework/course/:course_id", get(homework::list_by_course))
        .route("/api/homework/:id/submit", post(homework::submit))
        .route("/api/homework/:id/submissions", get(homework::list_submissions))
        .route("/api/homework/submission/:sub_id/grade", post(homework::grade))
        .route("/api/homework/:id", delete(homework::delete_assignment))
        // analytics
        .route("/api/analytics/instructor", get(analytics::instructor_summary))
        .route("/api/analytics/instructor/students", get(analytics::instructor_students))
        .route("/api/analytics/student", get(analytics::student_dashboard))
        // gamification
        .route("/api/gamification/leaderboard", get(gamification::leaderboard))
        .route("/api/gamification/certificates", get(gamification::certificates))
        // contests & practice
        .route("/api/contests", post(contests::create).get(contests::list))
        .route("/api/practice", get(practice::list).post(practice::create))
        .route("/api/practice/:id", get(practice::get_challenge))
        .route("/api/practice/:id/run", post(practice::run))
        .with_state(state)
}
