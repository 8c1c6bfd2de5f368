//! Shared fixture for the HTTP suites: the real router over the in-memory
//! store, a static token table instead of the identity provider, and a
//! judge double that passes every case.

#![allow(dead_code)]

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use learnhub::analytics::{FixedRating, RatingSource, DEFAULT_INSTRUCTOR_RATING};
use learnhub::auth::{StaticVerifier, TokenVerifier, VerifiedSubject};
use learnhub::judge::{JudgeClient, TestCase, TestRun};
use learnhub::models::{Role, User, UserStatus};
use learnhub::store::{MemStore, Store};
use learnhub::{api, ApiResult, AppState};

/// Every test case "passes": the judge echoes the expected output back.
pub struct EchoJudge;

#[async_trait::async_trait]
impl JudgeClient for EchoJudge {
    async fn run(
        &self,
        _code: &str,
        _language: &str,
        cases: &[TestCase],
    ) -> ApiResult<Vec<TestRun>> {
        Ok(cases
            .iter()
            .map(|c| TestRun {
                input: c.input.clone(),
                expected_output: c.output.clone(),
                actual_output: c.output.clone(),
                passed: true,
            })
            .collect())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemStore>,
    pub verifier: Arc<StaticVerifier>,
}

pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemStore::new());
    let verifier = Arc::new(StaticVerifier::new());
    let store_dyn: Arc<dyn Store> = store.clone();
    let verifier_dyn: Arc<dyn TokenVerifier> = verifier.clone();
    let judge: Arc<dyn JudgeClient> = Arc::new(EchoJudge);
    let rating: Arc<dyn RatingSource> = Arc::new(FixedRating(DEFAULT_INSTRUCTOR_RATING));
    let state = Arc::new(AppState::new(store_dyn, verifier_dyn, judge, rating));
    TestApp {
        router: api::router(state),
        store,
        verifier,
    }
}

impl TestApp {
    /// Seed a user and register a bearer token for them.
    pub async fn user(&self, name: &str, role: Role, status: UserStatus) -> (User, String) {
        let user = self.store.add_user(name, role, status).await;
        let token = format!("tok-{}", name.to_lowercase().replace(' ', "."));
        self.verifier
            .register(
                &token,
                VerifiedSubject {
                    subject: user.subject.clone(),
                    email: user.email.clone(),
                    name: user.full_name.clone(),
                    picture: None,
                },
            )
            .await;
        (user, token)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", path, token, None).await
    }

    pub async fn post(
        &self,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request("POST", path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("DELETE", path, token, None).await
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
