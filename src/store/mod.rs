//! Persistence seam. `PgStore` is the production backend, `MemStore` backs
//! the test suites; handlers and services only ever see `dyn Store`.

pub mod memory;
pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    Assignment, Contest, Course, PracticeChallenge, Submission, SubmissionStatus, User, UserStatus,
};

pub use memory::MemStore;
pub use postgres::PgStore;

/// Identity fields captured from a verified token, used on first sync.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub subject: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub max_marks: i32,
}

#[derive(Debug, Clone)]
pub struct NewContest {
    pub instructor_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub rules: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewChallenge {
    pub title: String,
    pub description: String,
    pub difficulty: crate::models::Difficulty,
    pub starter_code: Option<String>,
    pub test_cases: serde_json::Value,
}

/// Result of a submission write: the stored row plus whether it was the
/// student's first submission for the assignment.
#[derive(Debug, Clone)]
pub struct SubmissionUpsert {
    pub submission: Submission,
    pub created: bool,
}

#[derive(Debug, Clone)]
pub struct LastCourseStats {
    pub course: Course,
    pub enrolled_at: DateTime<Utc>,
    pub completed_modules: i64,
    pub total_modules: i64,
}

#[derive(Debug, Clone)]
pub struct RosterStats {
    pub student_id: Uuid,
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub course_id: Uuid,
    pub course_title: String,
    pub enrolled_at: DateTime<Utc>,
    pub completed_modules: i64,
    pub total_modules: i64,
    /// Unrounded mean exam percentage, 0 when the student has no results.
    pub avg_score: f64,
}

#[derive(Debug, Clone)]
pub struct DeadlineStats {
    pub assignment_id: Uuid,
    pub title: String,
    pub course_id: Uuid,
    pub course_title: String,
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ActivityStats {
    pub exam_id: Uuid,
    pub title: String,
    pub score: f64,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct EnrolledCourse {
    pub course_id: Uuid,
    pub course_title: String,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SubmissionAuthorRow {
    pub submission: Submission,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

#[async_trait]
pub trait Store: Send + Sync {
    // users
    async fn user_by_subject(&self, subject: &str) -> Result<Option<User>>;
    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>>;
    /// Get-or-create keyed on the identity subject. Existing rows keep
    /// their role, status, xp and streak untouched.
    async fn upsert_user_by_subject(&self, new: NewUser) -> Result<User>;
    async fn set_user_status(&self, id: Uuid, status: UserStatus) -> Result<bool>;
    async fn top_students_by_xp(&self, limit: i64) -> Result<Vec<User>>;

    // courses and enrollment
    async fn course_by_id(&self, id: Uuid) -> Result<Option<Course>>;
    async fn is_enrolled(&self, student_id: Uuid, course_id: Uuid) -> Result<bool>;
    async fn count_courses_by_instructor(&self, instructor_id: Uuid) -> Result<i64>;
    async fn count_distinct_students(&self, instructor_id: Uuid) -> Result<i64>;
    async fn count_enrollments(&self, student_id: Uuid) -> Result<i64>;
    async fn latest_enrollment(&self, student_id: Uuid) -> Result<Option<LastCourseStats>>;
    /// Title of the lowest-ordered module the student has not completed.
    async fn next_module_title(&self, student_id: Uuid, course_id: Uuid)
        -> Result<Option<String>>;
    async fn roster_for_instructor(&self, instructor_id: Uuid) -> Result<Vec<RosterStats>>;
    async fn enrolled_courses(&self, student_id: Uuid) -> Result<Vec<EnrolledCourse>>;

    // assignments and submissions
    async fn create_assignment(&self, new: NewAssignment) -> Result<Assignment>;
    async fn assignment_by_id(&self, id: Uuid) -> Result<Option<Assignment>>;
    async fn assignments_with_own_status(
        &self,
        course_id: Uuid,
        student_id: Uuid,
    ) -> Result<Vec<(Assignment, Option<SubmissionStatus>)>>;
    /// Insert or overwrite the (assignment, student) row in one atomic
    /// step. An overwrite resets the row to `submitted` and clears any
    /// previous grade and feedback.
    async fn upsert_submission(
        &self,
        assignment_id: Uuid,
        student_id: Uuid,
        file_url: Option<&str>,
        text_answer: Option<&str>,
    ) -> Result<SubmissionUpsert>;
    async fn submission_by_id(&self, id: Uuid) -> Result<Option<Submission>>;
    async fn submissions_with_authors(
        &self,
        assignment_id: Uuid,
    ) -> Result<Vec<SubmissionAuthorRow>>;
    /// Set grade, feedback and `graded` status in one write. False when the
    /// submission no longer exists.
    async fn apply_grade(
        &self,
        submission_id: Uuid,
        grade: f64,
        feedback: Option<&str>,
    ) -> Result<bool>;
    async fn delete_assignment(&self, id: Uuid) -> Result<bool>;
    async fn upcoming_deadlines(
        &self,
        student_id: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<DeadlineStats>>;
    async fn recent_exam_activity(&self, student_id: Uuid, limit: i64)
        -> Result<Vec<ActivityStats>>;

    // contests
    async fn create_contest(&self, new: NewContest) -> Result<Contest>;
    async fn contests_all(&self) -> Result<Vec<Contest>>;
    async fn contests_by_instructor(&self, instructor_id: Uuid) -> Result<Vec<Contest>>;

    // practice
    async fn practice_challenges(&self) -> Result<Vec<PracticeChallenge>>;
    async fn practice_challenge_by_id(&self, id: Uuid) -> Result<Option<PracticeChallenge>>;
    async fn create_practice_challenge(&self, new: NewChallenge) -> Result<PracticeChallenge>;
}
