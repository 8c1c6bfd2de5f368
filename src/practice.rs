//! Practice challenge catalog plus the run path that hands code to the
//! external judge.

use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::judge::{JudgeClient, TestCase};
use crate::models::{CreateChallengeReq, PracticeChallenge, RunChallengeReq};
use crate::store::{NewChallenge, Store};
use crate::views::RunReport;

pub struct PracticeService {
    store: Arc<dyn Store>,
    judge: Arc<dyn JudgeClient>,
}

impl PracticeService {
    pub fn new(store: Arc<dyn Store>, judge: Arc<dyn JudgeClient>) -> Self {
        Self { store, judge }
    }

    pub async fn list(&self) -> ApiResult<Vec<PracticeChallenge>> {
        Ok(self.store.practice_challenges().await?)
    }

    pub async fn get(&self, id: Uuid) -> ApiResult<PracticeChallenge> {
        self.store
            .practice_challenge_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("Challenge"))
    }

    pub async fn create(
        &self,
        actor: &AuthUser,
        req: CreateChallengeReq,
    ) -> ApiResult<PracticeChallenge> {
        actor.require_instructor()?;
        if req.title.trim().is_empty() || req.description.trim().is_empty() {
            return Err(ApiError::Validation(
                "title and description are required".into(),
            ));
        }

        let test_cases = serde_json::to_value(&req.test_cases).map_err(anyhow::Error::from)?;
        let challenge = self
            .store
            .create_practice_challenge(NewChallenge {
                title: req.title,
                description: req.description,
                difficulty: req.difficulty,
                starter_code: req.starter_code,
                test_cases,
            })
            .await?;
        tracing::info!(challenge_id = %challenge.id, "practice challenge created");
        Ok(challenge)
    }

    /// Ship the code and the challenge's test cases to the judge and fold
    /// the verdicts into a pass count.
    pub async fn run(
        &self,
        actor: &AuthUser,
        id: Uuid,
        req: RunChallengeReq,
    ) -> ApiResult<RunReport> {
        actor.require_student()?;
        let challenge = self.get(id).await?;

        let cases: Vec<TestCase> =
            serde_json::from_value(challenge.test_cases).map_err(|e| {
                tracing::error!(error = %e, challenge_id = %id, "stored test cases are malformed");
                ApiError::Server
            })?;

        let results = self.judge.run(&req.code, &req.language, &cases).await?;
        let passed = results.iter().filter(|r| r.passed).count();
        Ok(RunReport {
            passed,
            total: results.len(),
            results,
        })
    }
}
