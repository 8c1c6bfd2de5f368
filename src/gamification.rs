//! Leaderboard and certificates. XP and streaks are written by the course
//! progress pipeline; this module only reads them.

use std::sync::Arc;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::store::Store;
use crate::views::{CertificateView, LeaderboardRow};

pub const LEADERBOARD_LIMIT: i64 = 10;
pub const CERTIFICATE_SCORE: i32 = 95;
const CERT_COLORS: [&str; 2] = ["#003366", "#059669"];

pub struct GamificationService {
    store: Arc<dyn Store>,
}

impl GamificationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Top students by xp, highest first, id as the deterministic
    /// tie-break. Only the student role competes.
    pub async fn leaderboard(&self) -> ApiResult<Vec<LeaderboardRow>> {
        let rows = self.store.top_students_by_xp(LEADERBOARD_LIMIT).await?;
        Ok(rows
            .into_iter()
            .map(|u| LeaderboardRow {
                id: u.id,
                display_name: u.full_name,
                xp: u.xp,
                role: u.role,
            })
            .collect())
    }

    /// One certificate per enrollment, oldest first. Score and status are
    /// placeholders until completion tracking feeds real data; the preview
    /// color alternates by position.
    pub async fn certificates(&self, actor: &AuthUser) -> ApiResult<Vec<CertificateView>> {
        let rows = self.store.enrolled_courses(actor.id()).await?;
        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(idx, e)| CertificateView {
                id: e.course_id,
                course: e.course_title,
                date: e.enrolled_at.date_naive(),
                score: CERTIFICATE_SCORE,
                status: "Unlocked",
                preview_color: CERT_COLORS[idx % CERT_COLORS.len()],
            })
            .collect())
    }
}
