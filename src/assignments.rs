//! Homework lifecycle: instructors post assignments against their own
//! courses, enrolled students submit (and resubmit), instructors grade.
//! A (assignment, student) pair never holds more than one submission.

use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Assignment, CreateAssignmentReq, GradeReq, Role, SubmitHomeworkReq,
};
use crate::store::{NewAssignment, Store, SubmissionUpsert};
use crate::views::{AssignmentWithStatus, SubmissionWithAuthor};

pub const DEFAULT_MAX_MARKS: i32 = 100;

pub struct AssignmentService {
    store: Arc<dyn Store>,
}

impl AssignmentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, actor: &AuthUser, req: CreateAssignmentReq) -> ApiResult<Assignment> {
        actor.require_instructor()?;
        let course = self
            .store
            .course_by_id(req.course_id)
            .await?
            .ok_or(ApiError::NotFound("Course"))?;
        if course.instructor_id != actor.id() {
            return Err(ApiError::Forbidden("not the course instructor"));
        }
        if req.title.trim().is_empty() {
            return Err(ApiError::Validation("title is required".into()));
        }
        let max_marks = req.max_marks.unwrap_or(DEFAULT_MAX_MARKS);
        if max_marks <= 0 {
            return Err(ApiError::Validation("maxMarks must be positive".into()));
        }

        let assignment = self
            .store
            .create_assignment(NewAssignment {
                course_id: req.course_id,
                title: req.title,
                description: req.description,
                due_date: req.due_date,
                max_marks,
            })
            .await?;
        tracing::info!(assignment_id = %assignment.id, course_id = %course.id, "assignment created");
        Ok(assignment)
    }

    /// Course assignment list, due-date ascending, each row annotated with
    /// the caller's own submission status.
    pub async fn list_for_course(
        &self,
        actor: &AuthUser,
        course_id: Uuid,
    ) -> ApiResult<Vec<AssignmentWithStatus>> {
        actor.require_role(&[Role::Instructor, Role::Student, Role::Learner])?;
        let course = self
            .store
            .course_by_id(course_id)
            .await?
            .ok_or(ApiError::NotFound("Course"))?;

        match actor.role() {
            Role::Instructor => {
                if course.instructor_id != actor.id() {
                    return Err(ApiError::Forbidden("not the course instructor"));
                }
            }
            _ => {
                if !self.store.is_enrolled(actor.id(), course_id).await? {
                    return Err(ApiError::Forbidden("not enrolled in this course"));
                }
            }
        }

        let rows = self
            .store
            .assignments_with_own_status(course_id, actor.id())
            .await?;
        Ok(rows
            .into_iter()
            .map(|(assignment, status)| AssignmentWithStatus { assignment, status })
            .collect())
    }

    pub async fn submit(
        &self,
        actor: &AuthUser,
        assignment_id: Uuid,
        req: SubmitHomeworkReq,
    ) -> ApiResult<SubmissionUpsert> {
        actor.require_student()?;
        if req.file_url.is_none() && req.text_answer.is_none() {
            return Err(ApiError::Validation(
                "a file or a text answer is required".into(),
            ));
        }
        let assignment = self
            .store
            .assignment_by_id(assignment_id)
            .await?
            .ok_or(ApiError::NotFound("Assignment"))?;
        if !self
            .store
            .is_enrolled(actor.id(), assignment.course_id)
            .await?
        {
            return Err(ApiError::Forbidden("not enrolled in this course"));
        }

        let up = self
            .store
            .upsert_submission(
                assignment_id,
                actor.id(),
                req.file_url.as_deref(),
                req.text_answer.as_deref(),
            )
            .await?;
        tracing::info!(
            submission_id = %up.submission.id,
            assignment_id = %assignment_id,
            created = up.created,
            "submission stored"
        );
        Ok(up)
    }

    pub async fn submissions(
        &self,
        actor: &AuthUser,
        assignment_id: Uuid,
    ) -> ApiResult<Vec<SubmissionWithAuthor>> {
        self.owned_assignment(actor, assignment_id).await?;
        let rows = self.store.submissions_with_authors(assignment_id).await?;
        Ok(rows
            .into_iter()
            .map(|r| SubmissionWithAuthor {
                submission: r.submission,
                full_name: r.full_name,
                email: r.email,
                photo_url: r.photo_url,
            })
            .collect())
    }

    pub async fn grade(
        &self,
        actor: &AuthUser,
        submission_id: Uuid,
        req: GradeReq,
    ) -> ApiResult<()> {
        actor.require_instructor()?;
        let submission = self
            .store
            .submission_by_id(submission_id)
            .await?
            .ok_or(ApiError::NotFound("Submission"))?;
        let assignment = self
            .owned_assignment(actor, submission.assignment_id)
            .await?;

        if !req.grade.is_finite() || req.grade < 0.0 || req.grade > assignment.max_marks as f64 {
            return Err(ApiError::Validation(format!(
                "grade must be between 0 and {}",
                assignment.max_marks
            )));
        }

        // The write sets grade, feedback and status together; a reader can
        // never observe one without the others.
        if !self
            .store
            .apply_grade(submission_id, req.grade, req.feedback.as_deref())
            .await?
        {
            return Err(ApiError::NotFound("Submission"));
        }
        tracing::info!(submission_id = %submission_id, grade = req.grade, "submission graded");
        Ok(())
    }

    pub async fn delete(&self, actor: &AuthUser, assignment_id: Uuid) -> ApiResult<()> {
        self.owned_assignment(actor, assignment_id).await?;
        if !self.store.delete_assignment(assignment_id).await? {
            return Err(ApiError::NotFound("Assignment"));
        }
        tracing::info!(assignment_id = %assignment_id, "assignment deleted");
        Ok(())
    }

    /// Load the assignment and reject callers other than the instructor of
    /// its course.
    async fn owned_assignment(
        &self,
        actor: &AuthUser,
        assignment_id: Uuid,
    ) -> ApiResult<Assignment> {
        actor.require_instructor()?;
        let assignment = self
            .store
            .assignment_by_id(assignment_id)
            .await?
            .ok_or(ApiError::NotFound("Assignment"))?;
        let course = self
            .store
            .course_by_id(assignment.course_id)
            .await?
            .ok_or(ApiError::NotFound("Course"))?;
        if course.instructor_id != actor.id() {
            return Err(ApiError::Forbidden("not the course instructor"));
        }
        Ok(assignment)
    }
}
