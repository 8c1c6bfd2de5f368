//! Read-side aggregation for the two dashboards and the roster. All
//! primitive calculations live here as free functions so the boundary
//! cases are testable without a store.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::store::Store;
use crate::views::{
    ActivityView, DeadlineView, InstructorSummary, LastLearning, RiskStatus, RosterRow,
    StudentDashboard,
};

pub const DEADLINE_LIMIT: i64 = 5;
pub const ACTIVITY_LIMIT: i64 = 5;
pub const COMPLETED_MARKER: &str = "Completed";

/// Instructor rating is fed from outside the store (reviews live in
/// another system). The default source pins the launch placeholder.
pub trait RatingSource: Send + Sync {
    fn rating_for(&self, instructor_id: Uuid) -> f64;
}

pub struct FixedRating(pub f64);

pub const DEFAULT_INSTRUCTOR_RATING: f64 = 4.8;

impl RatingSource for FixedRating {
    fn rating_for(&self, _instructor_id: Uuid) -> f64 {
        self.0
    }
}

/// Completed-over-total as a whole percentage. A course without modules
/// reports zero, not a division error.
pub fn progress_percent(completed: i64, total: i64) -> i32 {
    if total <= 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i32
}

/// Risk bands over the unrounded mean: 80 and up is Excellent, below 60
/// is At Risk, the rest is Good.
pub fn classify_avg_score(avg: f64) -> RiskStatus {
    if avg >= 80.0 {
        RiskStatus::Excellent
    } else if avg < 60.0 {
        RiskStatus::AtRisk
    } else {
        RiskStatus::Good
    }
}

/// A deadline inside the next 48 hours counts as urgent.
pub fn is_urgent(due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    due < now + Duration::days(2)
}

pub struct AnalyticsService {
    store: Arc<dyn Store>,
    rating: Arc<dyn RatingSource>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn Store>, rating: Arc<dyn RatingSource>) -> Self {
        Self { store, rating }
    }

    pub async fn instructor_summary(&self, actor: &AuthUser) -> ApiResult<InstructorSummary> {
        actor.require_instructor()?;
        let courses = self.store.count_courses_by_instructor(actor.id()).await?;
        let students = self.store.count_distinct_students(actor.id()).await?;
        Ok(InstructorSummary {
            courses,
            students,
            rating: self.rating.rating_for(actor.id()),
        })
    }

    /// One roster row per enrollment across the instructor's courses; a
    /// student following two courses appears twice.
    pub async fn instructor_roster(&self, actor: &AuthUser) -> ApiResult<Vec<RosterRow>> {
        actor.require_instructor()?;
        let rows = self.store.roster_for_instructor(actor.id()).await?;
        Ok(rows
            .into_iter()
            .map(|r| RosterRow {
                student_id: r.student_id,
                student_name: r.student_name,
                student_email: r.student_email,
                course_title: r.course_title,
                course_id: r.course_id,
                enrolled_at: r.enrolled_at,
                completed_modules: r.completed_modules,
                total_modules: r.total_modules,
                avg_score: r.avg_score.round() as i32,
                progress: progress_percent(r.completed_modules, r.total_modules),
                status: classify_avg_score(r.avg_score),
            })
            .collect())
    }

    pub async fn student_dashboard(
        &self,
        actor: &AuthUser,
        now: DateTime<Utc>,
    ) -> ApiResult<StudentDashboard> {
        actor.require_student()?;
        let student_id = actor.id();

        let enrolled_count = self.store.count_enrollments(student_id).await?;

        let last_learning = match self.store.latest_enrollment(student_id).await? {
            Some(last) => {
                // No modules means nothing to point at; null keeps that
                // distinct from a fully completed course.
                let current_module = if last.total_modules == 0 {
                    None
                } else {
                    Some(
                        self.store
                            .next_module_title(student_id, last.course.id)
                            .await?
                            .unwrap_or_else(|| COMPLETED_MARKER.to_string()),
                    )
                };
                Some(LastLearning {
                    id: last.course.id,
                    title: last.course.title,
                    thumbnail: last.course.thumbnail_url,
                    completed_modules: last.completed_modules,
                    total_modules: last.total_modules,
                    progress: progress_percent(last.completed_modules, last.total_modules),
                    current_module,
                })
            }
            None => None,
        };

        let upcoming_deadlines = self
            .store
            .upcoming_deadlines(student_id, now, DEADLINE_LIMIT)
            .await?
            .into_iter()
            .map(|d| DeadlineView {
                id: d.assignment_id,
                title: d.title,
                course: d.course_title,
                course_id: d.course_id,
                due_date: d.due_date,
                is_urgent: is_urgent(d.due_date, now),
            })
            .collect();

        let recent_activity = self
            .store
            .recent_exam_activity(student_id, ACTIVITY_LIMIT)
            .await?
            .into_iter()
            .map(|a| ActivityView {
                id: a.exam_id,
                title: a.title,
                kind: "quiz",
                score: a.score,
                date: a.submitted_at,
            })
            .collect();

        Ok(StudentDashboard {
            enrolled_count,
            xp: actor.0.xp,
            streak: actor.0.streak,
            last_learning,
            upcoming_deadlines,
            recent_activity,
        })
    }
}
