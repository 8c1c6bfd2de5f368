mod support;

use chrono::{Duration, Utc};
use http::StatusCode;
use learnhub::models::{Role, UserStatus};
use serde_json::json;
use support::TestApp;

async fn seeded_instructor(app: &TestApp) -> (uuid::Uuid, String) {
    let (instructor, tok) = app.user("Prof", Role::Instructor, UserStatus::Active).await;
    (instructor.id, tok)
}

async fn post_assignment(
    app: &TestApp,
    tok: &str,
    course_id: uuid::Uuid,
    title: &str,
    due_hours: i64,
) -> String {
    let (_, created) = app
        .post(
            "/api/homework",
            Some(tok),
            json!({
                "courseId": course_id,
                "title": title,
                "dueDate": (Utc::now() + Duration::hours(due_hours)).to_rfc3339(),
            }),
        )
        .await;
    created["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn summary_counts_courses_and_distinct_students() {
    let app = support::spawn_app().await;
    let (instructor_id, tok) = seeded_instructor(&app).await;
    let algebra = app.store.add_course(instructor_id, "Algebra").await;
    let geometry = app.store.add_course(instructor_id, "Geometry").await;

    let (a, _) = app.user("A", Role::Student, UserStatus::Active).await;
    let (b, _) = app.user("B", Role::Student, UserStatus::Active).await;
    let (c, _) = app.user("C", Role::Student, UserStatus::Active).await;
    let now = Utc::now();
    app.store.enroll(a.id, algebra.id, now).await;
    app.store.enroll(b.id, algebra.id, now).await;
    app.store.enroll(c.id, geometry.id, now).await;
    // a follows both courses but counts once
    app.store.enroll(a.id, geometry.id, now).await;

    let (status, body) = app.get("/api/analytics/instructor", Some(&tok)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["courses"], 2);
    assert_eq!(body["students"], 3);
    assert_eq!(body["rating"].as_f64(), Some(4.8));
}

#[tokio::test]
async fn instructor_views_are_closed_to_students() {
    let app = support::spawn_app().await;
    let (_, student_tok) = app.user("S", Role::Student, UserStatus::Active).await;

    for path in ["/api/analytics/instructor", "/api/analytics/instructor/students"] {
        let (status, _) = app.get(path, Some(&student_tok)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{path}");
    }
}

#[tokio::test]
async fn roster_classifies_students_by_average_exam_score() {
    let app = support::spawn_app().await;
    let (instructor_id, tok) = seeded_instructor(&app).await;
    let course = app.store.add_course(instructor_id, "Databases").await;
    let exam = app.store.add_exam(Some(course.id), "Midterm").await;

    let mut expect = Vec::new();
    for (name, score, label) in [
        ("Star", 85.0, "Excellent"),
        ("Mid", 65.0, "Good"),
        ("Risk", 40.0, "At Risk"),
    ] {
        let (u, _) = app.user(name, Role::Student, UserStatus::Active).await;
        app.store.enroll(u.id, course.id, Utc::now()).await;
        app.store.add_exam_result(u.id, exam, score).await;
        expect.push((u.id, label));
    }

    let (status, body) = app.get("/api/analytics/instructor/students", Some(&tok)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    for (id, label) in expect {
        let row = rows
            .iter()
            .find(|r| r["student_id"] == json!(id))
            .unwrap_or_else(|| panic!("no roster row for {id}"));
        assert_eq!(row["status"], label);
        assert_eq!(row["course_title"], "Databases");
    }
}

#[tokio::test]
async fn classification_uses_the_mean_before_rounding() {
    let app = support::spawn_app().await;
    let (instructor_id, tok) = seeded_instructor(&app).await;
    let course = app.store.add_course(instructor_id, "Statistics").await;
    let quiz_a = app.store.add_exam(Some(course.id), "Quiz A").await;
    let quiz_b = app.store.add_exam(Some(course.id), "Quiz B").await;

    let (u, _) = app.user("Edge", Role::Student, UserStatus::Active).await;
    app.store.enroll(u.id, course.id, Utc::now()).await;
    // mean 79.8 rounds up to 80 on display yet stays below the band
    app.store.add_exam_result(u.id, quiz_a, 79.6).await;
    app.store.add_exam_result(u.id, quiz_b, 80.0).await;

    let (_, body) = app.get("/api/analytics/instructor/students", Some(&tok)).await;
    let row = &body.as_array().unwrap()[0];
    assert_eq!(row["avg_score"], 80);
    assert_eq!(row["status"], "Good");
}

#[tokio::test]
async fn roster_progress_counts_completed_modules() {
    let app = support::spawn_app().await;
    let (instructor_id, tok) = seeded_instructor(&app).await;
    let course = app.store.add_course(instructor_id, "Compilers").await;
    let m1 = app.store.add_module(course.id, 1, "Lexing").await;
    let _m2 = app.store.add_module(course.id, 2, "Parsing").await;
    let _m3 = app.store.add_module(course.id, 3, "Codegen").await;
    let empty = app.store.add_course(instructor_id, "Seminar").await;

    let (u, _) = app.user("P", Role::Student, UserStatus::Active).await;
    app.store.enroll(u.id, course.id, Utc::now()).await;
    app.store.enroll(u.id, empty.id, Utc::now()).await;
    app.store.set_module_progress(u.id, m1, true).await;

    let (_, body) = app.get("/api/analytics/instructor/students", Some(&tok)).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let compilers = rows
        .iter()
        .find(|r| r["course_title"] == "Compilers")
        .unwrap();
    assert_eq!(compilers["completed_modules"], 1);
    assert_eq!(compilers["total_modules"], 3);
    assert_eq!(compilers["progress"], 33);
    let seminar = rows.iter().find(|r| r["course_title"] == "Seminar").unwrap();
    assert_eq!(seminar["progress"], 0);
    assert_eq!(seminar["status"], "At Risk");
}

#[tokio::test]
async fn student_dashboard_reports_the_latest_course() {
    let app = support::spawn_app().await;
    let (instructor_id, _) = seeded_instructor(&app).await;
    let old = app.store.add_course(instructor_id, "History").await;
    let fresh = app.store.add_course(instructor_id, "Rust 101").await;
    let m1 = app.store.add_module(fresh.id, 1, "Ownership").await;
    let _m2 = app.store.add_module(fresh.id, 2, "Borrowing").await;
    let _m3 = app.store.add_module(fresh.id, 3, "Lifetimes").await;

    let (u, tok) = app.user("Dash", Role::Student, UserStatus::Active).await;
    let now = Utc::now();
    app.store.enroll(u.id, old.id, now - Duration::days(30)).await;
    app.store.enroll(u.id, fresh.id, now - Duration::days(1)).await;
    app.store.set_module_progress(u.id, m1, true).await;
    app.store.set_xp(u.id, 1200).await;
    app.store.set_streak(u.id, 9).await;

    let (status, body) = app.get("/api/analytics/student", Some(&tok)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enrolled_count"], 2);
    assert_eq!(body["xp"], 1200);
    assert_eq!(body["streak"], 9);
    let last = &body["last_learning"];
    assert_eq!(last["title"], "Rust 101");
    assert_eq!(last["completed_modules"], 1);
    assert_eq!(last["total_modules"], 3);
    assert_eq!(last["progress"], 33);
    assert_eq!(last["current_module"], "Borrowing");
}

#[tokio::test]
async fn moduleless_course_reports_null_current_module() {
    let app = support::spawn_app().await;
    let (instructor_id, _) = seeded_instructor(&app).await;
    let course = app.store.add_course(instructor_id, "Reading Group").await;
    let (u, tok) = app.user("Null", Role::Student, UserStatus::Active).await;
    app.store.enroll(u.id, course.id, Utc::now()).await;

    let (_, body) = app.get("/api/analytics/student", Some(&tok)).await;
    let last = &body["last_learning"];
    assert_eq!(last["title"], "Reading Group");
    assert_eq!(last["progress"], 0);
    assert!(last["current_module"].is_null());
    assert!(last.as_object().unwrap().contains_key("current_module"));
}

#[tokio::test]
async fn finished_course_says_completed() {
    let app = support::spawn_app().await;
    let (instructor_id, _) = seeded_instructor(&app).await;
    let course = app.store.add_course(instructor_id, "Shell 101").await;
    let m1 = app.store.add_module(course.id, 1, "Pipes").await;
    let (u, tok) = app.user("Done", Role::Student, UserStatus::Active).await;
    app.store.enroll(u.id, course.id, Utc::now()).await;
    app.store.set_module_progress(u.id, m1, true).await;

    let (_, body) = app.get("/api/analytics/student", Some(&tok)).await;
    let last = &body["last_learning"];
    assert_eq!(last["progress"], 100);
    assert_eq!(last["current_module"], "Completed");
}

#[tokio::test]
async fn deadlines_skip_past_and_already_submitted_work() {
    let app = support::spawn_app().await;
    let (instructor_id, instructor_tok) = seeded_instructor(&app).await;
    let course = app.store.add_course(instructor_id, "Networks").await;
    let (u, tok) = app.user("Busy", Role::Student, UserStatus::Active).await;
    let now = Utc::now();
    app.store.enroll(u.id, course.id, now).await;

    let _past = post_assignment(&app, &instructor_tok, course.id, "Yesterday", -24).await;
    let soon = post_assignment(&app, &instructor_tok, course.id, "Tonight", 20).await;
    let _next_week = post_assignment(&app, &instructor_tok, course.id, "Next week", 24 * 6).await;
    let handed_in = post_assignment(&app, &instructor_tok, course.id, "Handed in", 30).await;

    app.post(
        &format!("/api/homework/{handed_in}/submit"),
        Some(&tok),
        json!({ "textAnswer": "done early" }),
    )
    .await;

    let (_, body) = app.get("/api/analytics/student", Some(&tok)).await;
    let deadlines = body["upcoming_deadlines"].as_array().unwrap();
    assert_eq!(deadlines.len(), 2);
    assert_eq!(deadlines[0]["title"], "Tonight");
    assert_eq!(deadlines[0]["isUrgent"], true);
    assert_eq!(deadlines[0]["courseId"], json!(course.id));
    assert_eq!(deadlines[1]["title"], "Next week");
    assert_eq!(deadlines[1]["isUrgent"], false);
    assert_eq!(soon, deadlines[0]["id"].as_str().unwrap());
}

#[tokio::test]
async fn deadline_list_caps_at_five() {
    let app = support::spawn_app().await;
    let (instructor_id, instructor_tok) = seeded_instructor(&app).await;
    let course = app.store.add_course(instructor_id, "Workload").await;
    let (u, tok) = app.user("Swamped", Role::Student, UserStatus::Active).await;
    let now = Utc::now();
    app.store.enroll(u.id, course.id, now).await;

    for i in 0..7 {
        app.post(
            "/api/homework",
            Some(&instructor_tok),
            json!({
                "courseId": course.id,
                "title": format!("Sheet {i}"),
                "dueDate": (now + Duration::days(3 + i)).to_rfc3339(),
            }),
        )
        .await;
    }

    let (_, body) = app.get("/api/analytics/student", Some(&tok)).await;
    let deadlines = body["upcoming_deadlines"].as_array().unwrap();
    assert_eq!(deadlines.len(), 5);
    assert_eq!(deadlines[0]["title"], "Sheet 0");
    assert_eq!(deadlines[4]["title"], "Sheet 4");
}

#[tokio::test]
async fn recent_activity_lists_exams_newest_first() {
    let app = support::spawn_app().await;
    let (u, tok) = app.user("Quizzer", Role::Student, UserStatus::Active).await;
    let now = Utc::now();
    let quiz_a = app.store.add_exam(None, "Quiz A").await;
    let quiz_b = app.store.add_exam(None, "Quiz B").await;
    app.store
        .add_exam_submission(u.id, quiz_a, now - Duration::days(2))
        .await;
    app.store
        .add_exam_submission(u.id, quiz_b, now - Duration::days(1))
        .await;
    app.store.add_exam_result(u.id, quiz_a, 92.0).await;
    // quiz_b was never marked, so its score reads zero

    let (_, body) = app.get("/api/analytics/student", Some(&tok)).await;
    let activity = body["recent_activity"].as_array().unwrap();
    assert_eq!(activity.len(), 2);
    assert_eq!(activity[0]["title"], "Quiz B");
    assert_eq!(activity[0]["type"], "quiz");
    assert_eq!(activity[0]["score"].as_f64(), Some(0.0));
    assert_eq!(activity[1]["title"], "Quiz A");
    assert_eq!(activity[1]["score"].as_f64(), Some(92.0));
}

#[tokio::test]
async fn student_dashboard_rejects_instructors() {
    let app = support::spawn_app().await;
    let (_, tok) = seeded_instructor(&app).await;
    let (status, _) = app.get("/api/analytics/student", Some(&tok)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
