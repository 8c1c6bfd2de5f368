use std::sync::Arc;

use crate::analytics::{AnalyticsService, RatingSource};
use crate::assignments::AssignmentService;
use crate::auth::TokenVerifier;
use crate::contests::ContestService;
use crate::gamification::GamificationService;
use crate::judge::JudgeClient;
use crate::practice::PracticeService;
use crate::store::Store;

/// Shared application state: one store handle, one verifier, and the
/// services that wrap them. Cloned per request via `Arc`.
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub assignments: AssignmentService,
    pub analytics: AnalyticsService,
    pub gamification: GamificationService,
    pub contests: ContestService,
    pub practice: PracticeService,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        verifier: Arc<dyn TokenVerifier>,
        judge: Arc<dyn JudgeClient>,
        rating: Arc<dyn RatingSource>,
    ) -> Self {
        Self {
            assignments: AssignmentService::new(store.clone()),
            analytics: AnalyticsService::new(store.clone(), rating),
            gamification: GamificationService::new(store.clone()),
            contests: ContestService::new(store.clone()),
            practice: PracticeService::new(store.clone(), judge),
            store,
            verifier,
        }
    }
}
