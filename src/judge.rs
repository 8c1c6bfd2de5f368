//! Client seam for the external code-execution service. Nothing in this
//! crate runs user code; it ships the code and test cases out and relays
//! the verdicts back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TestCase {
    pub input: String,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    pub input: String,
    pub expected_output: String,
    pub actual_output: String,
    pub passed: bool,
}

#[async_trait]
pub trait JudgeClient: Send + Sync {
    async fn run(&self, code: &str, language: &str, cases: &[TestCase])
        -> ApiResult<Vec<TestRun>>;
}

pub struct HttpJudge {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJudge {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunPayload<'a> {
    code: &'a str,
    language: &'a str,
    test_cases: &'a [TestCase],
}

#[async_trait]
impl JudgeClient for HttpJudge {
    async fn run(
        &self,
        code: &str,
        language: &str,
        cases: &[TestCase],
    ) -> ApiResult<Vec<TestRun>> {
        let url = format!("{}/run", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .json(&RunPayload {
                code,
                language,
                test_cases: cases,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "judge request failed");
                ApiError::Server
            })?;

        if !resp.status().is_success() {
            tracing::error!(status = %resp.status(), "judge rejected the run");
            return Err(ApiError::Server);
        }

        resp.json::<Vec<TestRun>>().await.map_err(|e| {
            tracing::error!(error = %e, "judge response malformed");
            ApiError::Server
        })
    }
}

/// Stand-in when `JUDGE_URL` is not configured. Every run fails loudly
/// instead of pretending to execute anything.
pub struct NoJudge;

#[async_trait]
impl JudgeClient for NoJudge {
    async fn run(
        &self,
        _code: &str,
        _language: &str,
        _cases: &[TestCase],
    ) -> ApiResult<Vec<TestRun>> {
        tracing::error!("judge service not configured");
        Err(ApiError::Server)
    }
}
