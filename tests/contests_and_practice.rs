mod support;

use chrono::{Duration, Utc};
use http::StatusCode;
use learnhub::models::{Role, UserStatus};
use serde_json::json;

fn contest_body(title: &str, start_hours: i64, end_hours: i64) -> serde_json::Value {
    let now = Utc::now();
    json!({
        "title": title,
        "startTime": (now + Duration::hours(start_hours)).to_rfc3339(),
        "endTime": (now + Duration::hours(end_hours)).to_rfc3339(),
    })
}

#[tokio::test]
async fn new_contest_defaults_to_active_and_reports_its_phase() {
    let app = support::spawn_app().await;
    let (_, tok) = app.user("Host", Role::Instructor, UserStatus::Active).await;

    let (status, body) = app
        .post("/api/contests", Some(&tok), contest_body("Spring Cup", 24, 48))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Spring Cup");
    assert_eq!(body["is_active"], true);
    assert_eq!(body["phase"], "upcoming");
    assert_eq!(body["open"], false);
}

#[tokio::test]
async fn contest_window_must_end_after_it_starts() {
    let app = support::spawn_app().await;
    let (_, tok) = app.user("Host", Role::Instructor, UserStatus::Active).await;

    let (status, body) = app
        .post("/api/contests", Some(&tok), contest_body("Backwards", 48, 24))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "endTime must be after startTime");

    let (_, student_tok) = app.user("S", Role::Student, UserStatus::Active).await;
    let (status, _) = app
        .post(
            "/api/contests",
            Some(&student_tok),
            contest_body("Rogue", 24, 48),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn instructors_list_their_own_contests_students_see_all() {
    let app = support::spawn_app().await;
    let (_, host_a) = app.user("Host A", Role::Instructor, UserStatus::Active).await;
    let (_, host_b) = app.user("Host B", Role::Instructor, UserStatus::Active).await;
    let (_, student) = app.user("S", Role::Student, UserStatus::Active).await;

    app.post("/api/contests", Some(&host_a), contest_body("Cup A", 1, 2))
        .await;
    app.post("/api/contests", Some(&host_b), contest_body("Cup B", 1, 2))
        .await;

    let (_, mine) = app.get("/api/contests", Some(&host_a)).await;
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["title"], "Cup A");

    let (_, all) = app.get("/api/contests", Some(&student)).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn open_needs_a_live_window_and_the_active_flag() {
    let app = support::spawn_app().await;
    let (_, tok) = app.user("Host", Role::Instructor, UserStatus::Active).await;

    let (_, live) = app
        .post("/api/contests", Some(&tok), contest_body("Running", -1, 1))
        .await;
    assert_eq!(live["phase"], "live");
    assert_eq!(live["open"], true);

    let mut paused = contest_body("Paused", -1, 1);
    paused["isActive"] = json!(false);
    let (_, paused) = app.post("/api/contests", Some(&tok), paused).await;
    assert_eq!(paused["phase"], "live");
    assert_eq!(paused["open"], false);

    let (_, over) = app
        .post("/api/contests", Some(&tok), contest_body("Over", -3, -1))
        .await;
    assert_eq!(over["phase"], "ended");
    assert_eq!(over["open"], false);
}

#[tokio::test]
async fn challenge_catalog_sorts_easy_to_hard() {
    let app = support::spawn_app().await;
    let (_, tok) = app.user("Setter", Role::Instructor, UserStatus::Active).await;

    for (title, difficulty) in [
        ("Graph paths", "Medium"),
        ("FizzBuzz", "Easy"),
        ("Suffix automaton", "Hard"),
    ] {
        let (status, _) = app
            .post(
                "/api/practice",
                Some(&tok),
                json!({
                    "title": title,
                    "description": "solve it",
                    "difficulty": difficulty,
                    "test_cases": [{ "input": "1", "output": "1" }],
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get("/api/practice", Some(&tok)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    let titles: Vec<&str> = rows.iter().map(|r| r["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["FizzBuzz", "Graph paths", "Suffix automaton"]);
    assert_eq!(rows[0]["difficulty"], "Easy");
}

#[tokio::test]
async fn challenge_lookup_and_guards() {
    let app = support::spawn_app().await;
    let (_, tok) = app.user("Setter", Role::Instructor, UserStatus::Active).await;
    let (_, student_tok) = app.user("S", Role::Student, UserStatus::Active).await;

    let (_, created) = app
        .post(
            "/api/practice",
            Some(&tok),
            json!({
                "title": "Two Sum",
                "description": "classic",
                "difficulty": "Easy",
                "starter_code": "fn main() {}",
                "test_cases": [{ "input": "1 2", "output": "3", "is_hidden": true }],
            }),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = app.get(&format!("/api/practice/{id}"), Some(&student_tok)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Two Sum");
    assert_eq!(body["starter_code"], "fn main() {}");
    assert_eq!(body["test_cases"][0]["is_hidden"], true);

    let (status, body) = app
        .get(
            &format!("/api/practice/{}", uuid::Uuid::new_v4()),
            Some(&student_tok),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Challenge not found");

    // students cannot author challenges
    let (status, _) = app
        .post(
            "/api/practice",
            Some(&student_tok),
            json!({
                "title": "Mine",
                "description": "mine",
                "difficulty": "Easy",
                "test_cases": [],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // blank title is rejected
    let (status, _) = app
        .post(
            "/api/practice",
            Some(&tok),
            json!({
                "title": "  ",
                "description": "oops",
                "difficulty": "Easy",
                "test_cases": [],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn run_scores_each_test_case() {
    let app = support::spawn_app().await;
    let (_, tok) = app.user("Setter", Role::Instructor, UserStatus::Active).await;
    let (_, student_tok) = app.user("S", Role::Student, UserStatus::Active).await;

    let (_, created) = app
        .post(
            "/api/practice",
            Some(&tok),
            json!({
                "title": "Adder",
                "description": "sum two ints",
                "difficulty": "Easy",
                "test_cases": [
                    { "input": "1 2", "output": "3" },
                    { "input": "2 2", "output": "4" },
                ],
            }),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, report) = app
        .post(
            &format!("/api/practice/{id}/run"),
            Some(&student_tok),
            json!({ "code": "print(sum(map(int, input().split())))", "language": "python" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["passed"], 2);
    assert_eq!(report["total"], 2);
    let results = report["results"].as_array().unwrap();
    assert_eq!(results[0]["input"], "1 2");
    assert_eq!(results[0]["expectedOutput"], "3");
    assert_eq!(results[0]["actualOutput"], "3");
    assert_eq!(results[0]["passed"], true);

    // instructors do not run against the judge
    let (status, _) = app
        .post(
            &format!("/api/practice/{id}/run"),
            Some(&tok),
            json!({ "code": "x", "language": "python" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn practice_is_for_signed_in_users_only() {
    let app = support::spawn_app().await;
    let (status, _) = app.get("/api/practice", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/contests", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
