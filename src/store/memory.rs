//! In-memory `Store` used by the test suites. One mutex over the whole
//! dataset keeps every operation as atomic as its SQL counterpart.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{
    Assignment, Contest, Course, PracticeChallenge, Role, Submission, SubmissionStatus, User,
    UserStatus,
};

use super::{
    ActivityStats, DeadlineStats, EnrolledCourse, LastCourseStats, NewAssignment, NewChallenge,
    NewContest, NewUser, RosterStats, Store, SubmissionAuthorRow, SubmissionUpsert,
};

#[derive(Debug, Clone)]
struct EnrollmentRec {
    student_id: Uuid,
    course_id: Uuid,
    enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct ModuleRec {
    id: Uuid,
    course_id: Uuid,
    title: String,
    module_order: i32,
}

#[derive(Debug, Clone)]
struct ProgressRec {
    student_id: Uuid,
    module_id: Uuid,
    course_id: Uuid,
    completed: bool,
}

#[derive(Debug, Clone)]
struct ExamRec {
    id: Uuid,
    course_id: Option<Uuid>,
    title: String,
}

#[derive(Debug, Clone)]
struct ExamSubmissionRec {
    student_id: Uuid,
    exam_id: Uuid,
    submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct ExamResultRec {
    student_id: Uuid,
    exam_id: Uuid,
    percentage: f64,
}

#[derive(Default)]
struct MemInner {
    users: Vec<User>,
    courses: Vec<Course>,
    enrollments: Vec<EnrollmentRec>,
    modules: Vec<ModuleRec>,
    progress: Vec<ProgressRec>,
    assignments: Vec<Assignment>,
    submissions: Vec<Submission>,
    exams: Vec<ExamRec>,
    exam_submissions: Vec<ExamSubmissionRec>,
    exam_results: Vec<ExamResultRec>,
    contests: Vec<Contest>,
    challenges: Vec<PracticeChallenge>,
}

#[derive(Default)]
pub struct MemStore {
    inner: Mutex<MemInner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- seeding helpers ---

    pub async fn add_user(&self, name: &str, role: Role, status: UserStatus) -> User {
        let slug = name.to_lowercase().replace(' ', ".");
        let user = User {
            id: Uuid::new_v4(),
            subject: format!("sub-{slug}"),
            full_name: Some(name.to_string()),
            email: Some(format!("{slug}@example.com")),
            photo_url: None,
            role,
            status,
            xp: 0,
            streak: 0,
            created_at: Utc::now(),
        };
        self.inner.lock().await.users.push(user.clone());
        user
    }

    pub async fn set_xp(&self, user_id: Uuid, xp: i64) {
        let mut inner = self.inner.lock().await;
        if let Some(u) = inner.users.iter_mut().find(|u| u.id == user_id) {
            u.xp = xp;
        }
    }

    pub async fn set_streak(&self, user_id: Uuid, streak: i32) {
        let mut inner = self.inner.lock().await;
        if let Some(u) = inner.users.iter_mut().find(|u| u.id == user_id) {
            u.streak = streak;
        }
    }

    pub async fn add_course(&self, instructor_id: Uuid, title: &str) -> Course {
        let course = Course {
            id: Uuid::new_v4(),
            instructor_id,
            title: title.to_string(),
            thumbnail_url: None,
            created_at: Utc::now(),
        };
        self.inner.lock().await.courses.push(course.clone());
        course
    }

    pub async fn enroll(&self, student_id: Uuid, course_id: Uuid, enrolled_at: DateTime<Utc>) {
        self.inner.lock().await.enrollments.push(EnrollmentRec {
            student_id,
            course_id,
            enrolled_at,
        });
    }

    pub async fn add_module(&self, course_id: Uuid, module_order: i32, title: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().await.modules.push(ModuleRec {
            id,
            course_id,
            title: title.to_string(),
            module_order,
        });
        id
    }

    pub async fn set_module_progress(&self, student_id: Uuid, module_id: Uuid, completed: bool) {
        let mut inner = self.inner.lock().await;
        let Some(course_id) = inner
            .modules
            .iter()
            .find(|m| m.id == module_id)
            .map(|m| m.course_id)
        else {
            return;
        };
        if let Some(p) = inner
            .progress
            .iter_mut()
            .find(|p| p.student_id == student_id && p.module_id == module_id)
        {
            p.completed = completed;
        } else {
            inner.progress.push(ProgressRec {
                student_id,
                module_id,
                course_id,
                completed,
            });
        }
    }

    pub async fn add_exam(&self, course_id: Option<Uuid>, title: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().await.exams.push(ExamRec {
            id,
            course_id,
            title: title.to_string(),
        });
        id
    }

    pub async fn add_exam_submission(
        &self,
        student_id: Uuid,
        exam_id: Uuid,
        submitted_at: DateTime<Utc>,
    ) {
        self.inner
            .lock()
            .await
            .exam_submissions
            .push(ExamSubmissionRec {
                student_id,
                exam_id,
                submitted_at,
            });
    }

    pub async fn add_exam_result(&self, student_id: Uuid, exam_id: Uuid, percentage: f64) {
        self.inner.lock().await.exam_results.push(ExamResultRec {
            student_id,
            exam_id,
            percentage,
        });
    }

    pub async fn submission_count(&self, assignment_id: Uuid) -> usize {
        self.inner
            .lock()
            .await
            .submissions
            .iter()
            .filter(|s| s.assignment_id == assignment_id)
            .count()
    }
}

#[async_trait]
impl Store for MemStore {
    // ===== USERS =====

    async fn user_by_subject(&self, subject: &str) -> Result<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.subject == subject).cloned())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn upsert_user_by_subject(&self, new: NewUser) -> Result<User> {
        let mut inner = self.inner.lock().await;
        if let Some(u) = inner.users.iter().find(|u| u.subject == new.subject) {
            return Ok(u.clone());
        }
        let user = User {
            id: Uuid::new_v4(),
            subject: new.subject,
            full_name: new.full_name,
            email: new.email,
            photo_url: new.photo_url,
            role: Role::Student,
            status: UserStatus::Pending,
            xp: 0,
            streak: 0,
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn set_user_status(&self, id: Uuid, status: UserStatus) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        match inner.users.iter_mut().find(|u| u.id == id) {
            Some(u) => {
                u.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn top_students_by_xp(&self, limit: i64) -> Result<Vec<User>> {
        let inner = self.inner.lock().await;
        let mut rows: Vec<User> = inner
            .users
            .iter()
            .filter(|u| u.role == Role::Student)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.xp.cmp(&a.xp).then(a.id.cmp(&b.id)));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    // ===== COURSES & ENROLLMENT =====

    async fn course_by_id(&self, id: Uuid) -> Result<Option<Course>> {
        let inner = self.inner.lock().await;
        Ok(inner.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn is_enrolled(&self, student_id: Uuid, course_id: Uuid) -> Result<bool> {
        let inner = self.inner.lock().await;
        Ok(inner
            .enrollments
            .iter()
            .any(|e| e.student_id == student_id && e.course_id == course_id))
    }

    async fn count_courses_by_instructor(&self, instructor_id: Uuid) -> Result<i64> {
        let inner = self.inner.lock().await;
        Ok(inner
            .courses
            .iter()
            .filter(|c| c.instructor_id == instructor_id)
            .count() as i64)
    }

    async fn count_distinct_students(&self, instructor_id: Uuid) -> Result<i64> {
        let inner = self.inner.lock().await;
        let mut students: Vec<Uuid> = inner
            .enrollments
            .iter()
            .filter(|e| {
                inner
                    .courses
                    .iter()
                    .any(|c| c.id == e.course_id && c.instructor_id == instructor_id)
            })
            .map(|e| e.student_id)
            .collect();
        students.sort();
        students.dedup();
        Ok(students.len() as i64)
    }

    async fn count_enrollments(&self, student_id: Uuid) -> Result<i64> {
        let inner = self.inner.lock().await;
        Ok(inner
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .count() as i64)
    }

    async fn latest_enrollment(&self, student_id: Uuid) -> Result<Option<LastCourseStats>> {
        let inner = self.inner.lock().await;
        let Some(enr) = inner
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .max_by_key(|e| e.enrolled_at)
        else {
            return Ok(None);
        };
        let Some(course) = inner.courses.iter().find(|c| c.id == enr.course_id) else {
            return Ok(None);
        };
        Ok(Some(LastCourseStats {
            course: course.clone(),
            enrolled_at: enr.enrolled_at,
            completed_modules: completed_modules(&inner, student_id, course.id),
            total_modules: total_modules(&inner, course.id),
        }))
    }

    async fn next_module_title(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<String>> {
        let inner = self.inner.lock().await;
        let mut modules: Vec<&ModuleRec> = inner
            .modules
            .iter()
            .filter(|m| m.course_id == course_id)
            .collect();
        modules.sort_by_key(|m| m.module_order);
        Ok(modules
            .iter()
            .find(|m| {
                !inner.progress.iter().any(|p| {
                    p.student_id == student_id && p.module_id == m.id && p.completed
                })
            })
            .map(|m| m.title.clone()))
    }

    async fn roster_for_instructor(&self, instructor_id: Uuid) -> Result<Vec<RosterStats>> {
        let inner = self.inner.lock().await;
        let mut enrollments: Vec<&EnrollmentRec> = inner
            .enrollments
            .iter()
            .filter(|e| {
                inner
                    .courses
                    .iter()
                    .any(|c| c.id == e.course_id && c.instructor_id == instructor_id)
            })
            .collect();
        enrollments.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));

        let mut rows = Vec::with_capacity(enrollments.len());
        for enr in enrollments {
            let Some(course) = inner.courses.iter().find(|c| c.id == enr.course_id) else {
                continue;
            };
            let Some(student) = inner.users.iter().find(|u| u.id == enr.student_id) else {
                continue;
            };
            rows.push(RosterStats {
                student_id: student.id,
                student_name: student.full_name.clone(),
                student_email: student.email.clone(),
                course_id: course.id,
                course_title: course.title.clone(),
                enrolled_at: enr.enrolled_at,
                completed_modules: completed_modules(&inner, student.id, course.id),
                total_modules: total_modules(&inner, course.id),
                avg_score: avg_exam_score(&inner, student.id, course.id),
            });
        }
        Ok(rows)
    }

    async fn enrolled_courses(&self, student_id: Uuid) -> Result<Vec<EnrolledCourse>> {
        let inner = self.inner.lock().await;
        let mut rows: Vec<EnrolledCourse> = inner
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .filter_map(|e| {
                inner
                    .courses
                    .iter()
                    .find(|c| c.id == e.course_id)
                    .map(|c| EnrolledCourse {
                        course_id: c.id,
                        course_title: c.title.clone(),
                        enrolled_at: e.enrolled_at,
                    })
            })
            .collect();
        rows.sort_by(|a, b| {
            a.enrolled_at
                .cmp(&b.enrolled_at)
                .then(a.course_id.cmp(&b.course_id))
        });
        Ok(rows)
    }

    // ===== ASSIGNMENTS & SUBMISSIONS =====

    async fn create_assignment(&self, new: NewAssignment) -> Result<Assignment> {
        let assignment = Assignment {
            id: Uuid::new_v4(),
            course_id: new.course_id,
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            max_marks: new.max_marks,
            created_at: Utc::now(),
        };
        self.inner
            .lock()
            .await
            .assignments
            .push(assignment.clone());
        Ok(assignment)
    }

    async fn assignment_by_id(&self, id: Uuid) -> Result<Option<Assignment>> {
        let inner = self.inner.lock().await;
        Ok(inner.assignments.iter().find(|a| a.id == id).cloned())
    }

    async fn assignments_with_own_status(
        &self,
        course_id: Uuid,
        student_id: Uuid,
    ) -> Result<Vec<(Assignment, Option<SubmissionStatus>)>> {
        let inner = self.inner.lock().await;
        let mut rows: Vec<(Assignment, Option<SubmissionStatus>)> = inner
            .assignments
            .iter()
            .filter(|a| a.course_id == course_id)
            .map(|a| {
                let status = inner
                    .submissions
                    .iter()
                    .find(|s| s.assignment_id == a.id && s.student_id == student_id)
                    .map(|s| s.status);
                (a.clone(), status)
            })
            .collect();
        rows.sort_by_key(|(a, _)| a.due_date);
        Ok(rows)
    }

    async fn upsert_submission(
        &self,
        assignment_id: Uuid,
        student_id: Uuid,
        file_url: Option<&str>,
        text_answer: Option<&str>,
    ) -> Result<SubmissionUpsert> {
        let mut inner = self.inner.lock().await;
        if let Some(s) = inner
            .submissions
            .iter_mut()
            .find(|s| s.assignment_id == assignment_id && s.student_id == student_id)
        {
            s.file_url = file_url.map(str::to_string);
            s.text_answer = text_answer.map(str::to_string);
            s.status = SubmissionStatus::Submitted;
            s.grade = None;
            s.feedback = None;
            s.submitted_at = Utc::now();
            return Ok(SubmissionUpsert {
                submission: s.clone(),
                created: false,
            });
        }
        let submission = Submission {
            id: Uuid::new_v4(),
            assignment_id,
            student_id,
            file_url: file_url.map(str::to_string),
            text_answer: text_answer.map(str::to_string),
            status: SubmissionStatus::Submitted,
            grade: None,
            feedback: None,
            submitted_at: Utc::now(),
        };
        inner.submissions.push(submission.clone());
        Ok(SubmissionUpsert {
            submission,
            created: true,
        })
    }

    async fn submission_by_id(&self, id: Uuid) -> Result<Option<Submission>> {
        let inner = self.inner.lock().await;
        Ok(inner.submissions.iter().find(|s| s.id == id).cloned())
    }

    async fn submissions_with_authors(
        &self,
        assignment_id: Uuid,
    ) -> Result<Vec<SubmissionAuthorRow>> {
        let inner = self.inner.lock().await;
        let mut rows: Vec<SubmissionAuthorRow> = inner
            .submissions
            .iter()
            .filter(|s| s.assignment_id == assignment_id)
            .map(|s| {
                let author = inner.users.iter().find(|u| u.id == s.student_id);
                SubmissionAuthorRow {
                    submission: s.clone(),
                    full_name: author.and_then(|u| u.full_name.clone()),
                    email: author.and_then(|u| u.email.clone()),
                    photo_url: author.and_then(|u| u.photo_url.clone()),
                }
            })
            .collect();
        rows.sort_by(|a, b| {
            b.submission
                .submitted_at
                .cmp(&a.submission.submitted_at)
                .then(a.submission.id.cmp(&b.submission.id))
        });
        Ok(rows)
    }

    async fn apply_grade(
        &self,
        submission_id: Uuid,
        grade: f64,
        feedback: Option<&str>,
    ) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        match inner.submissions.iter_mut().find(|s| s.id == submission_id) {
            Some(s) => {
                s.grade = Some(grade);
                s.feedback = feedback.map(str::to_string);
                s.status = SubmissionStatus::Graded;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_assignment(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        let before = inner.assignments.len();
        inner.assignments.retain(|a| a.id != id);
        if inner.assignments.len() == before {
            return Ok(false);
        }
        inner.submissions.retain(|s| s.assignment_id != id);
        Ok(true)
    }

    async fn upcoming_deadlines(
        &self,
        student_id: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<DeadlineStats>> {
        let inner = self.inner.lock().await;
        let mut rows: Vec<DeadlineStats> = inner
            .assignments
            .iter()
            .filter(|a| a.due_date > now)
            .filter(|a| {
                inner
                    .enrollments
                    .iter()
                    .any(|e| e.student_id == student_id && e.course_id == a.course_id)
            })
            .filter(|a| {
                !inner
                    .submissions
                    .iter()
                    .any(|s| s.assignment_id == a.id && s.student_id == student_id)
            })
            .filter_map(|a| {
                inner
                    .courses
                    .iter()
                    .find(|c| c.id == a.course_id)
                    .map(|c| DeadlineStats {
                        assignment_id: a.id,
                        title: a.title.clone(),
                        course_id: c.id,
                        course_title: c.title.clone(),
                        due_date: a.due_date,
                    })
            })
            .collect();
        rows.sort_by_key(|d| d.due_date);
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn recent_exam_activity(
        &self,
        student_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ActivityStats>> {
        let inner = self.inner.lock().await;
        let mut subs: Vec<&ExamSubmissionRec> = inner
            .exam_submissions
            .iter()
            .filter(|s| s.student_id == student_id)
            .collect();
        subs.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        subs.truncate(limit as usize);
        Ok(subs
            .into_iter()
            .filter_map(|s| {
                inner.exams.iter().find(|x| x.id == s.exam_id).map(|x| {
                    let score = inner
                        .exam_results
                        .iter()
                        .find(|r| r.student_id == student_id && r.exam_id == s.exam_id)
                        .map(|r| r.percentage)
                        .unwrap_or(0.0);
                    ActivityStats {
                        exam_id: x.id,
                        title: x.title.clone(),
                        score,
                        submitted_at: s.submitted_at,
                    }
                })
            })
            .collect())
    }

    // ===== CONTESTS =====

    async fn create_contest(&self, new: NewContest) -> Result<Contest> {
        let contest = Contest {
            id: Uuid::new_v4(),
            instructor_id: new.instructor_id,
            title: new.title,
            description: new.description,
            start_time: new.start_time,
            end_time: new.end_time,
            rules: new.rules,
            is_active: new.is_active,
            created_at: Utc::now(),
        };
        self.inner.lock().await.contests.push(contest.clone());
        Ok(contest)
    }

    async fn contests_all(&self) -> Result<Vec<Contest>> {
        let inner = self.inner.lock().await;
        let mut rows = inner.contests.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn contests_by_instructor(&self, instructor_id: Uuid) -> Result<Vec<Contest>> {
        let inner = self.inner.lock().await;
        let mut rows: Vec<Contest> = inner
            .contests
            .iter()
            .filter(|c| c.instructor_id == instructor_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    // ===== PRACTICE =====

    async fn practice_challenges(&self) -> Result<Vec<PracticeChallenge>> {
        let inner = self.inner.lock().await;
        let mut rows = inner.challenges.clone();
        rows.sort_by(|a, b| {
            a.difficulty
                .rank()
                .cmp(&b.difficulty.rank())
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(rows)
    }

    async fn practice_challenge_by_id(&self, id: Uuid) -> Result<Option<PracticeChallenge>> {
        let inner = self.inner.lock().await;
        Ok(inner.challenges.iter().find(|c| c.id == id).cloned())
    }

    async fn create_practice_challenge(&self, new: NewChallenge) -> Result<PracticeChallenge> {
        let challenge = PracticeChallenge {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            difficulty: new.difficulty,
            starter_code: new.starter_code,
            test_cases: new.test_cases,
            created_at: Utc::now(),
        };
        self.inner.lock().await.challenges.push(challenge.clone());
        Ok(challenge)
    }
}

fn completed_modules(inner: &MemInner, student_id: Uuid, course_id: Uuid) -> i64 {
    inner
        .progress
        .iter()
        .filter(|p| p.student_id == student_id && p.course_id == course_id && p.completed)
        .count() as i64
}

fn total_modules(inner: &MemInner, course_id: Uuid) -> i64 {
    inner
        .modules
        .iter()
        .filter(|m| m.course_id == course_id)
        .count() as i64
}

fn avg_exam_score(inner: &MemInner, student_id: Uuid, course_id: Uuid) -> f64 {
    let scores: Vec<f64> = inner
        .exam_results
        .iter()
        .filter(|r| r.student_id == student_id)
        .filter(|r| {
            inner
                .exams
                .iter()
                .any(|x| x.id == r.exam_id && (x.course_id == Some(course_id) || x.course_id.is_none()))
        })
        .map(|r| r.percentage)
        .collect();
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submission_upsert_keeps_one_row_per_student() {
        let store = MemStore::new();
        let instructor = store
            .add_user("Ada", Role::Instructor, UserStatus::Active)
            .await;
        let student = store
            .add_user("Linus", Role::Student, UserStatus::Active)
            .await;
        let course = store.add_course(instructor.id, "Rust 101").await;
        let assignment = store
            .create_assignment(NewAssignment {
                course_id: course.id,
                title: "hw1".into(),
                description: None,
                due_date: Utc::now(),
                max_marks: 100,
            })
            .await
            .unwrap();

        let first = store
            .upsert_submission(assignment.id, student.id, None, Some("draft"))
            .await
            .unwrap();
        assert!(first.created);

        let second = store
            .upsert_submission(assignment.id, student.id, None, Some("final"))
            .await
            .unwrap();
        assert!(!second.created);
        assert_eq!(second.submission.id, first.submission.id);
        assert_eq!(second.submission.text_answer.as_deref(), Some("final"));
        assert_eq!(store.submission_count(assignment.id).await, 1);
    }

    #[tokio::test]
    async fn resubmission_clears_grade_and_feedback() {
        let store = MemStore::new();
        let instructor = store
            .add_user("Ada", Role::Instructor, UserStatus::Active)
            .await;
        let student = store
            .add_user("Linus", Role::Student, UserStatus::Active)
            .await;
        let course = store.add_course(instructor.id, "Rust 101").await;
        let assignment = store
            .create_assignment(NewAssignment {
                course_id: course.id,
                title: "hw1".into(),
                description: None,
                due_date: Utc::now(),
                max_marks: 100,
            })
            .await
            .unwrap();

        let up = store
            .upsert_submission(assignment.id, student.id, None, Some("v1"))
            .await
            .unwrap();
        assert!(store
            .apply_grade(up.submission.id, 90.0, Some("nice"))
            .await
            .unwrap());

        let again = store
            .upsert_submission(assignment.id, student.id, None, Some("v2"))
            .await
            .unwrap();
        assert_eq!(again.submission.status, SubmissionStatus::Submitted);
        assert_eq!(again.submission.grade, None);
        assert_eq!(again.submission.feedback, None);
    }

    #[tokio::test]
    async fn delete_assignment_removes_its_submissions() {
        let store = MemStore::new();
        let instructor = store
            .add_user("Ada", Role::Instructor, UserStatus::Active)
            .await;
        let student = store
            .add_user("Linus", Role::Student, UserStatus::Active)
            .await;
        let course = store.add_course(instructor.id, "Rust 101").await;
        let assignment = store
            .create_assignment(NewAssignment {
                course_id: course.id,
                title: "hw1".into(),
                description: None,
                due_date: Utc::now(),
                max_marks: 100,
            })
            .await
            .unwrap();
        store
            .upsert_submission(assignment.id, student.id, None, Some("v1"))
            .await
            .unwrap();

        assert!(store.delete_assignment(assignment.id).await.unwrap());
        assert_eq!(store.submission_count(assignment.id).await, 0);
        assert!(!store.delete_assignment(assignment.id).await.unwrap());
    }
}
