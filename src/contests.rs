//! Contest management. The time window drives the derived phase; the
//! stored `is_active` flag is an instructor-controlled kill-switch that
//! gates joinability on top of it.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::models::{Contest, CreateContestReq, Role};
use crate::store::{NewContest, Store};
use crate::views::{ContestPhase, ContestView};

pub fn contest_phase(contest: &Contest, now: DateTime<Utc>) -> ContestPhase {
    if now < contest.start_time {
        ContestPhase::Upcoming
    } else if now < contest.end_time {
        ContestPhase::Live
    } else {
        ContestPhase::Ended
    }
}

pub fn contest_view(contest: Contest, now: DateTime<Utc>) -> ContestView {
    let phase = contest_phase(&contest, now);
    let open = contest.is_active && phase == ContestPhase::Live;
    ContestView {
        contest,
        phase,
        open,
    }
}

pub struct ContestService {
    store: Arc<dyn Store>,
}

impl ContestService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        actor: &AuthUser,
        req: CreateContestReq,
        now: DateTime<Utc>,
    ) -> ApiResult<ContestView> {
        actor.require_instructor()?;
        if req.title.trim().is_empty() {
            return Err(ApiError::Validation("title is required".into()));
        }
        if req.end_time <= req.start_time {
            return Err(ApiError::Validation(
                "endTime must be after startTime".into(),
            ));
        }

        let contest = self
            .store
            .create_contest(NewContest {
                instructor_id: actor.id(),
                title: req.title,
                description: req.description,
                start_time: req.start_time,
                end_time: req.end_time,
                rules: req.rules,
                is_active: req.is_active.unwrap_or(true),
            })
            .await?;
        tracing::info!(contest_id = %contest.id, "contest created");
        Ok(contest_view(contest, now))
    }

    /// Instructors see their own contests, everyone else sees all of them.
    /// Newest first either way.
    pub async fn list(&self, actor: &AuthUser, now: DateTime<Utc>) -> ApiResult<Vec<ContestView>> {
        let contests = if actor.role() == Role::Instructor {
            self.store.contests_by_instructor(actor.id()).await?
        } else {
            self.store.contests_all().await?
        };
        Ok(contests
            .into_iter()
            .map(|c| contest_view(c, now))
            .collect())
    }
}
