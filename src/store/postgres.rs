use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::Db;
use crate::models::{
    Assignment, Contest, Course, Difficulty, PracticeChallenge, Submission, SubmissionStatus,
    User, UserStatus,
};

use super::{
    ActivityStats, DeadlineStats, EnrolledCourse, LastCourseStats, NewAssignment, NewChallenge,
    NewContest, NewUser, RosterStats, Store, SubmissionAuthorRow, SubmissionUpsert,
};

pub struct PgStore {
    db: Db,
}

impl PgStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

// Status and role columns are TEXT; rows come back as strings and are
// mapped to enums here, never further up.

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    subject: String,
    full_name: Option<String>,
    email: Option<String>,
    photo_url: Option<String>,
    role: String,
    status: String,
    xp: i64,
    streak: i32,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            subject: r.subject,
            full_name: r.full_name,
            email: r.email,
            photo_url: r.photo_url,
            role: r.role.as_str().into(),
            status: r.status.as_str().into(),
            xp: r.xp,
            streak: r.streak,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SubmissionRow {
    id: Uuid,
    assignment_id: Uuid,
    student_id: Uuid,
    file_url: Option<String>,
    text_answer: Option<String>,
    status: String,
    grade: Option<f64>,
    feedback: Option<String>,
    submitted_at: DateTime<Utc>,
}

impl From<SubmissionRow> for Submission {
    fn from(r: SubmissionRow) -> Self {
        Submission {
            id: r.id,
            assignment_id: r.assignment_id,
            student_id: r.student_id,
            file_url: r.file_url,
            text_answer: r.text_answer,
            status: r.status.as_str().into(),
            grade: r.grade,
            feedback: r.feedback,
            submitted_at: r.submitted_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AssignmentStatusRow {
    id: Uuid,
    course_id: Uuid,
    title: String,
    description: Option<String>,
    due_date: DateTime<Utc>,
    max_marks: i32,
    created_at: DateTime<Utc>,
    status: Option<String>,
}

#[derive(sqlx::FromRow)]
struct SubmissionAuthorSqlRow {
    id: Uuid,
    assignment_id: Uuid,
    student_id: Uuid,
    file_url: Option<String>,
    text_answer: Option<String>,
    status: String,
    grade: Option<f64>,
    feedback: Option<String>,
    submitted_at: DateTime<Utc>,
    full_name: Option<String>,
    email: Option<String>,
    photo_url: Option<String>,
}

#[derive(sqlx::FromRow)]
struct LastCourseRow {
    id: Uuid,
    instructor_id: Uuid,
    title: String,
    thumbnail_url: Option<String>,
    created_at: DateTime<Utc>,
    enrolled_at: DateTime<Utc>,
    completed_modules: i64,
    total_modules: i64,
}

#[derive(sqlx::FromRow)]
struct RosterSqlRow {
    student_id: Uuid,
    student_name: Option<String>,
    student_email: Option<String>,
    course_id: Uuid,
    course_title: String,
    enrolled_at: DateTime<Utc>,
    completed_modules: i64,
    total_modules: i64,
    avg_score: f64,
}

#[derive(sqlx::FromRow)]
struct DeadlineRow {
    assignment_id: Uuid,
    title: String,
    course_id: Uuid,
    course_title: String,
    due_date: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    exam_id: Uuid,
    title: String,
    score: f64,
    submitted_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct EnrolledCourseRow {
    course_id: Uuid,
    course_title: String,
    enrolled_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ChallengeRow {
    id: Uuid,
    title: String,
    description: String,
    difficulty: String,
    starter_code: Option<String>,
    test_cases: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl From<ChallengeRow> for PracticeChallenge {
    fn from(r: ChallengeRow) -> Self {
        PracticeChallenge {
            id: r.id,
            title: r.title,
            description: r.description,
            difficulty: Difficulty::from(r.difficulty.as_str()),
            starter_code: r.starter_code,
            test_cases: r.test_cases,
            created_at: r.created_at,
        }
    }
}

const USER_COLS: &str = "id, subject, full_name, email, photo_url, role, status, xp, streak, created_at";
const SUBMISSION_COLS: &str =
    "id, assignment_id, student_id, file_url, text_answer, status, grade, feedback, submitted_at";

#[async_trait]
impl Store for PgStore {
    // ===== USERS =====

    async fn user_by_subject(&self, subject: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLS} FROM users WHERE subject = $1"
        ))
        .bind(subject)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(User::from))
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(User::from))
    }

    async fn upsert_user_by_subject(&self, new: NewUser) -> Result<User> {
        // The no-op DO UPDATE makes RETURNING yield the existing row, so a
        // concurrent first login cannot create two accounts.
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, subject, full_name, email, photo_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (subject) DO UPDATE SET subject = EXCLUDED.subject
            RETURNING {USER_COLS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.subject)
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.photo_url)
        .fetch_one(&self.db)
        .await?;
        Ok(row.into())
    }

    async fn set_user_status(&self, id: Uuid, status: UserStatus) -> Result<bool> {
        let done = sqlx::query("UPDATE users SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.db)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    async fn top_students_by_xp(&self, limit: i64) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLS} FROM users
            WHERE role = 'student'
            ORDER BY xp DESC, id ASC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    // ===== COURSES & ENROLLMENT =====

    async fn course_by_id(&self, id: Uuid) -> Result<Option<Course>> {
        Ok(sqlx::query_as::<_, Course>(
            "SELECT id, instructor_id, title, thumbnail_url, created_at FROM courses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?)
    }

    async fn is_enrolled(&self, student_id: Uuid, course_id: Uuid) -> Result<bool> {
        Ok(sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM enrollments WHERE student_id = $1 AND course_id = $2)",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(&self.db)
        .await?)
    }

    async fn count_courses_by_instructor(&self, instructor_id: Uuid) -> Result<i64> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM courses WHERE instructor_id = $1",
        )
        .bind(instructor_id)
        .fetch_one(&self.db)
        .await?)
    }

    async fn count_distinct_students(&self, instructor_id: Uuid) -> Result<i64> {
        Ok(sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT e.student_id)
            FROM enrollments e
            JOIN courses c ON e.course_id = c.id
            WHERE c.instructor_id = $1
            "#,
        )
        .bind(instructor_id)
        .fetch_one(&self.db)
        .await?)
    }

    async fn count_enrollments(&self, student_id: Uuid) -> Result<i64> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enrollments WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_one(&self.db)
        .await?)
    }

    async fn latest_enrollment(&self, student_id: Uuid) -> Result<Option<LastCourseStats>> {
        let row = sqlx::query_as::<_, LastCourseRow>(
            r#"
            SELECT c.id, c.instructor_id, c.title, c.thumbnail_url, c.created_at,
                   e.enrolled_at,
                   (SELECT COUNT(*) FROM module_progress mp
                     WHERE mp.course_id = c.id AND mp.student_id = $1 AND mp.completed) AS completed_modules,
                   (SELECT COUNT(*) FROM modules m WHERE m.course_id = c.id) AS total_modules
            FROM enrollments e
            JOIN courses c ON e.course_id = c.id
            WHERE e.student_id = $1
            ORDER BY e.enrolled_at DESC
            LIMIT 1
            "#,
        )
        .bind(student_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(|r| LastCourseStats {
            course: Course {
                id: r.id,
                instructor_id: r.instructor_id,
                title: r.title,
                thumbnail_url: r.thumbnail_url,
                created_at: r.created_at,
            },
            enrolled_at: r.enrolled_at,
            completed_modules: r.completed_modules,
            total_modules: r.total_modules,
        }))
    }

    async fn next_module_title(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<String>> {
        Ok(sqlx::query_scalar::<_, String>(
            r#"
            SELECT m.title FROM modules m
            WHERE m.course_id = $1
              AND NOT EXISTS (SELECT 1 FROM module_progress mp
                               WHERE mp.module_id = m.id AND mp.student_id = $2 AND mp.completed)
            ORDER BY m.module_order ASC
            LIMIT 1
            "#,
        )
        .bind(course_id)
        .bind(student_id)
        .fetch_optional(&self.db)
        .await?)
    }

    async fn roster_for_instructor(&self, instructor_id: Uuid) -> Result<Vec<RosterStats>> {
        let rows = sqlx::query_as::<_, RosterSqlRow>(
            r#"
            SELECT u.id AS student_id,
                   u.full_name AS student_name,
                   u.email AS student_email,
                   c.id AS course_id,
                   c.title AS course_title,
                   e.enrolled_at,
                   (SELECT COUNT(*) FROM module_progress mp
                     WHERE mp.course_id = c.id AND mp.student_id = u.id AND mp.completed) AS completed_modules,
                   (SELECT COUNT(*) FROM modules m WHERE m.course_id = c.id) AS total_modules,
                   COALESCE((SELECT AVG(er.percentage)
                              FROM exam_results er
                              JOIN exams x ON er.exam_id = x.id
                             WHERE er.student_id = u.id
                               AND (x.course_id = c.id OR x.course_id IS NULL)), 0) AS avg_score
            FROM enrollments e
            JOIN users u ON e.student_id = u.id
            JOIN courses c ON e.course_id = c.id
            WHERE c.instructor_id = $1
            ORDER BY e.enrolled_at DESC
            "#,
        )
        .bind(instructor_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| RosterStats {
                student_id: r.student_id,
                student_name: r.student_name,
                student_email: r.student_email,
                course_id: r.course_id,
                course_title: r.course_title,
                enrolled_at: r.enrolled_at,
                completed_modules: r.completed_modules,
                total_modules: r.total_modules,
                avg_score: r.avg_score,
            })
            .collect())
    }

    async fn enrolled_courses(&self, student_id: Uuid) -> Result<Vec<EnrolledCourse>> {
        let rows = sqlx::query_as::<_, EnrolledCourseRow>(
            r#"
            SELECT c.id AS course_id, c.title AS course_title, e.enrolled_at
            FROM enrollments e
            JOIN courses c ON e.course_id = c.id
            WHERE e.student_id = $1
            ORDER BY e.enrolled_at ASC, c.id ASC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| EnrolledCourse {
                course_id: r.course_id,
                course_title: r.course_title,
                enrolled_at: r.enrolled_at,
            })
            .collect())
    }

    // ===== ASSIGNMENTS & SUBMISSIONS =====

    async fn create_assignment(&self, new: NewAssignment) -> Result<Assignment> {
        Ok(sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO assignments (id, course_id, title, description, due_date, max_marks)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, course_id, title, description, due_date, max_marks, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.course_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.due_date)
        .bind(new.max_marks)
        .fetch_one(&self.db)
        .await?)
    }

    async fn assignment_by_id(&self, id: Uuid) -> Result<Option<Assignment>> {
        Ok(sqlx::query_as::<_, Assignment>(
            r#"
            SELECT id, course_id, title, description, due_date, max_marks, created_at
            FROM assignments WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?)
    }

    async fn assignments_with_own_status(
        &self,
        course_id: Uuid,
        student_id: Uuid,
    ) -> Result<Vec<(Assignment, Option<SubmissionStatus>)>> {
        let rows = sqlx::query_as::<_, AssignmentStatusRow>(
            r#"
            SELECT a.id, a.course_id, a.title, a.description, a.due_date, a.max_marks,
                   a.created_at,
                   (SELECT s.status FROM assignment_submissions s
                     WHERE s.assignment_id = a.id AND s.student_id = $2) AS status
            FROM assignments a
            WHERE a.course_id = $1
            ORDER BY a.due_date ASC
            "#,
        )
        .bind(course_id)
        .bind(student_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let status = r.status.as_deref().map(SubmissionStatus::from);
                (
                    Assignment {
                        id: r.id,
                        course_id: r.course_id,
                        title: r.title,
                        description: r.description,
                        due_date: r.due_date,
                        max_marks: r.max_marks,
                        created_at: r.created_at,
                    },
                    status,
                )
            })
            .collect())
    }

    async fn upsert_submission(
        &self,
        assignment_id: Uuid,
        student_id: Uuid,
        file_url: Option<&str>,
        text_answer: Option<&str>,
    ) -> Result<SubmissionUpsert> {
        let mut tx = self.db.begin().await?;

        let inserted = sqlx::query_as::<_, SubmissionRow>(&format!(
            r#"
            INSERT INTO assignment_submissions (id, assignment_id, student_id, file_url, text_answer)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (assignment_id, student_id) DO NOTHING
            RETURNING {SUBMISSION_COLS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(assignment_id)
        .bind(student_id)
        .bind(file_url)
        .bind(text_answer)
        .fetch_optional(&mut *tx)
        .await?;

        let (row, created) = match inserted {
            Some(row) => (row, true),
            None => {
                // Resubmission: overwrite content and reopen for grading.
                let row = sqlx::query_as::<_, SubmissionRow>(&format!(
                    r#"
                    UPDATE assignment_submissions
                    SET file_url = $3, text_answer = $4, status = 'submitted',
                        grade = NULL, feedback = NULL, submitted_at = now()
                    WHERE assignment_id = $1 AND student_id = $2
                    RETURNING {SUBMISSION_COLS}
                    "#
                ))
                .bind(assignment_id)
                .bind(student_id)
                .bind(file_url)
                .bind(text_answer)
                .fetch_one(&mut *tx)
                .await?;
                (row, false)
            }
        };

        tx.commit().await?;
        Ok(SubmissionUpsert {
            submission: row.into(),
            created,
        })
    }

    async fn submission_by_id(&self, id: Uuid) -> Result<Option<Submission>> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {SUBMISSION_COLS} FROM assignment_submissions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(Submission::from))
    }

    async fn submissions_with_authors(
        &self,
        assignment_id: Uuid,
    ) -> Result<Vec<SubmissionAuthorRow>> {
        let rows = sqlx::query_as::<_, SubmissionAuthorSqlRow>(
            r#"
            SELECT s.id, s.assignment_id, s.student_id, s.file_url, s.text_answer, s.status,
                   s.grade, s.feedback, s.submitted_at,
                   u.full_name, u.email, u.photo_url
            FROM assignment_submissions s
            JOIN users u ON s.student_id = u.id
            WHERE s.assignment_id = $1
            ORDER BY s.submitted_at DESC, s.id ASC
            "#,
        )
        .bind(assignment_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| SubmissionAuthorRow {
                submission: Submission {
                    id: r.id,
                    assignment_id: r.assignment_id,
                    student_id: r.student_id,
                    file_url: r.file_url,
                    text_answer: r.text_answer,
                    status: r.status.as_str().into(),
                    grade: r.grade,
                    feedback: r.feedback,
                    submitted_at: r.submitted_at,
                },
                full_name: r.full_name,
                email: r.email,
                photo_url: r.photo_url,
            })
            .collect())
    }

    async fn apply_grade(
        &self,
        submission_id: Uuid,
        grade: f64,
        feedback: Option<&str>,
    ) -> Result<bool> {
        let done = sqlx::query(
            r#"
            UPDATE assignment_submissions
            SET grade = $2, feedback = $3, status = 'graded'
            WHERE id = $1
            "#,
        )
        .bind(submission_id)
        .bind(grade)
        .bind(feedback)
        .execute(&self.db)
        .await?;
        Ok(done.rows_affected() > 0)
    }

    async fn delete_assignment(&self, id: Uuid) -> Result<bool> {
        // Submissions go with it via ON DELETE CASCADE.
        let done = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    async fn upcoming_deadlines(
        &self,
        student_id: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<DeadlineStats>> {
        let rows = sqlx::query_as::<_, DeadlineRow>(
            r#"
            SELECT a.id AS assignment_id, a.title, c.id AS course_id, c.title AS course_title,
                   a.due_date
            FROM assignments a
            JOIN enrollments e ON a.course_id = e.course_id
            JOIN courses c ON c.id = a.course_id
            WHERE e.student_id = $1
              AND a.due_date > $2
              AND NOT EXISTS (SELECT 1 FROM assignment_submissions s
                               WHERE s.assignment_id = a.id AND s.student_id = $1)
            ORDER BY a.due_date ASC
            LIMIT $3
            "#,
        )
        .bind(student_id)
        .bind(now)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| DeadlineStats {
                assignment_id: r.assignment_id,
                title: r.title,
                course_id: r.course_id,
                course_title: r.course_title,
                due_date: r.due_date,
            })
            .collect())
    }

    async fn recent_exam_activity(
        &self,
        student_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ActivityStats>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT x.id AS exam_id, x.title, COALESCE(r.percentage, 0) AS score, s.submitted_at
            FROM exam_submissions s
            JOIN exams x ON s.exam_id = x.id
            LEFT JOIN exam_results r ON r.exam_id = s.exam_id AND r.student_id = s.student_id
            WHERE s.student_id = $1
            ORDER BY s.submitted_at DESC
            LIMIT $2
            "#,
        )
        .bind(student_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| ActivityStats {
                exam_id: r.exam_id,
                title: r.title,
                score: r.score,
                submitted_at: r.submitted_at,
            })
            .collect())
    }

    // ===== CONTESTS =====

    async fn create_contest(&self, new: NewContest) -> Result<Contest> {
        Ok(sqlx::query_as::<_, Contest>(
            r#"
            INSERT INTO contests (id, instructor_id, title, description, start_time, end_time,
                                  rules, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, instructor_id, title, description, start_time, end_time, rules,
                      is_active, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.instructor_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.start_time)
        .bind(new.end_time)
        .bind(&new.rules)
        .bind(new.is_active)
        .fetch_one(&self.db)
        .await?)
    }

    async fn contests_all(&self) -> Result<Vec<Contest>> {
        Ok(sqlx::query_as::<_, Contest>(
            r#"
            SELECT id, instructor_id, title, description, start_time, end_time, rules,
                   is_active, created_at
            FROM contests ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?)
    }

    async fn contests_by_instructor(&self, instructor_id: Uuid) -> Result<Vec<Contest>> {
        Ok(sqlx::query_as::<_, Contest>(
            r#"
            SELECT id, instructor_id, title, description, start_time, end_time, rules,
                   is_active, created_at
            FROM contests WHERE instructor_id = $1 ORDER BY created_at DESC
            "#,
        )
        .bind(instructor_id)
        .fetch_all(&self.db)
        .await?)
    }

    // ===== PRACTICE =====

    async fn practice_challenges(&self) -> Result<Vec<PracticeChallenge>> {
        let rows = sqlx::query_as::<_, ChallengeRow>(
            r#"
            SELECT id, title, description, difficulty, starter_code, test_cases, created_at
            FROM practice_challenges
            ORDER BY CASE difficulty WHEN 'Easy' THEN 0 WHEN 'Medium' THEN 1 ELSE 2 END,
                     created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(PracticeChallenge::from).collect())
    }

    async fn practice_challenge_by_id(&self, id: Uuid) -> Result<Option<PracticeChallenge>> {
        let row = sqlx::query_as::<_, ChallengeRow>(
            r#"
            SELECT id, title, description, difficulty, starter_code, test_cases, created_at
            FROM practice_challenges WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(PracticeChallenge::from))
    }

    async fn create_practice_challenge(&self, new: NewChallenge) -> Result<PracticeChallenge> {
        let row = sqlx::query_as::<_, ChallengeRow>(
            r#"
            INSERT INTO practice_challenges (id, title, description, difficulty, starter_code,
                                             test_cases)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, difficulty, starter_code, test_cases, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.difficulty.as_str())
        .bind(&new.starter_code)
        .bind(&new.test_cases)
        .fetch_one(&self.db)
        .await?;
        Ok(row.into())
    }
}
