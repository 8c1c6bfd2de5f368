//! Response bodies. Every endpoint serializes one of these structs; field
//! renames pin the wire casing the web client relies on.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_with::skip_serializing_none;
use uuid::Uuid;

use crate::models::{Assignment, Contest, Role, Submission, SubmissionStatus, User, UserStatus};

#[skip_serializing_none]
#[derive(Serialize, Debug, Clone)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    pub xp: i64,
    pub streak: i32,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        Self {
            user_id: u.id,
            full_name: u.full_name,
            email: u.email,
            photo_url: u.photo_url,
            role: u.role,
            status: u.status,
            xp: u.xp,
            streak: u.streak,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct LoginResp {
    pub user: UserProfile,
}

#[derive(Serialize, Debug, Clone)]
pub struct MessageResp {
    pub message: String,
}

impl MessageResp {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

/// Assignment plus the requesting student's own submission state, if any.
#[derive(Serialize, Debug, Clone)]
pub struct AssignmentWithStatus {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub status: Option<SubmissionStatus>,
}

#[skip_serializing_none]
#[derive(Serialize, Debug, Clone)]
pub struct SubmissionWithAuthor {
    #[serde(flatten)]
    pub submission: Submission,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct InstructorSummary {
    pub courses: i64,
    pub students: i64,
    pub rating: f64,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskStatus {
    Excellent,
    Good,
    #[serde(rename = "At Risk")]
    AtRisk,
}

#[derive(Serialize, Debug, Clone)]
pub struct RosterRow {
    pub student_id: Uuid,
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub course_title: String,
    pub course_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
    pub completed_modules: i64,
    pub total_modules: i64,
    pub avg_score: i32,
    pub progress: i32,
    pub status: RiskStatus,
}

/// Most recently joined course, with progress through its modules.
/// `current_module` is null for module-less courses, so the distinction
/// from "Completed" survives serialization.
#[derive(Serialize, Debug, Clone)]
pub struct LastLearning {
    pub id: Uuid,
    pub title: String,
    pub thumbnail: Option<String>,
    pub completed_modules: i64,
    pub total_modules: i64,
    pub progress: i32,
    pub current_module: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct DeadlineView {
    pub id: Uuid,
    pub title: String,
    pub course: String,
    #[serde(rename = "courseId")]
    pub course_id: Uuid,
    #[serde(rename = "dueDate")]
    pub due_date: DateTime<Utc>,
    #[serde(rename = "isUrgent")]
    pub is_urgent: bool,
}

#[derive(Serialize, Debug, Clone)]
pub struct ActivityView {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub score: f64,
    pub date: DateTime<Utc>,
}

#[derive(Serialize, Debug, Clone)]
pub struct StudentDashboard {
    pub enrolled_count: i64,
    pub xp: i64,
    pub streak: i32,
    pub last_learning: Option<LastLearning>,
    pub upcoming_deadlines: Vec<DeadlineView>,
    pub recent_activity: Vec<ActivityView>,
}

#[derive(Serialize, Debug, Clone)]
pub struct LeaderboardRow {
    pub id: Uuid,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub xp: i64,
    pub role: Role,
}

#[derive(Serialize, Debug, Clone)]
pub struct CertificateView {
    pub id: Uuid,
    pub course: String,
    pub date: NaiveDate,
    pub score: i32,
    pub status: &'static str,
    #[serde(rename = "previewColor")]
    pub preview_color: &'static str,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContestPhase {
    Upcoming,
    Live,
    Ended,
}

/// Contest as stored, plus the phase the clock puts it in and whether it
/// is currently joinable (`phase == live` and the kill-switch is on).
#[derive(Serialize, Debug, Clone)]
pub struct ContestView {
    #[serde(flatten)]
    pub contest: Contest,
    pub phase: ContestPhase,
    pub open: bool,
}

#[derive(Serialize, Debug, Clone)]
pub struct RunReport {
    pub passed: usize,
    pub total: usize,
    pub results: Vec<crate::judge::TestRun>,
}
