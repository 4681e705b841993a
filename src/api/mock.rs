//! Mock API for deterministic testing
//!
//! Implements `PlanProvider` and `SessionStore` from in-memory data and
//! captures every submitted session for later verification, so runner and
//! UI flows can be exercised without a server.
//!
//! # Example
//! ```no_run
//! use fitrun::api::mock::MockApi;
//! use fitrun::api::{PlannedExercise, SessionStore, WorkoutPlan};
//!
//! #[tokio::test]
//! async fn test_save_fails() {
//!     let plan = WorkoutPlan::new("Push").with_id(1)
//!         .with_exercise(PlannedExercise::new("Bench", 3, "8"));
//!     let api = MockApi::new().with_plan(plan).failing_saves();
//!     // Use api in tests...
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::error::ApiError;
use crate::api::models::{PlanId, SessionLog, SessionRecord, WorkoutPlan};
use crate::api::provider::{PlanProvider, SessionStore};

/// Mock implementation of both API collaborators
#[derive(Clone, Default)]
pub struct MockApi {
    plans: Arc<Mutex<HashMap<PlanId, WorkoutPlan>>>,
    suggestion: Option<WorkoutPlan>,
    history: Vec<SessionLog>,
    /// Whether save_session() should fail
    fail_saves: bool,
    /// Artificial latency for save_session()
    save_delay: Duration,
    /// Captured session records for verification
    saved_sessions: Arc<Mutex<Vec<SessionRecord>>>,
    /// Captured plans passed to save_plan()
    saved_plans: Arc<Mutex<Vec<WorkoutPlan>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a plan. Plans without an id are stored under id 0.
    pub fn with_plan(self, plan: WorkoutPlan) -> Self {
        self.plans.lock().insert(plan.id.unwrap_or(0), plan);
        self
    }

    pub fn with_suggestion(mut self, plan: WorkoutPlan) -> Self {
        self.suggestion = Some(plan);
        self
    }

    pub fn with_history(mut self, sessions: Vec<SessionLog>) -> Self {
        self.history = sessions;
        self
    }

    /// Configure save_session() to reject
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn with_save_delay(mut self, delay: Duration) -> Self {
        self.save_delay = delay;
        self
    }

    /// Sessions submitted so far
    pub fn saved_sessions(&self) -> Vec<SessionRecord> {
        self.saved_sessions.lock().clone()
    }

    /// Plans submitted via save_plan()
    pub fn saved_plans(&self) -> Vec<WorkoutPlan> {
        self.saved_plans.lock().clone()
    }
}

#[async_trait]
impl PlanProvider for MockApi {
    async fn get_plan(&self, id: PlanId) -> Result<WorkoutPlan, ApiError> {
        self.plans
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("plan {}", id)))
    }

    async fn list_plans(&self) -> Result<Vec<WorkoutPlan>, ApiError> {
        let mut plans: Vec<WorkoutPlan> = self.plans.lock().values().cloned().collect();
        plans.sort_by_key(|p| p.id);
        Ok(plans)
    }

    async fn suggest_plan(&self) -> Result<WorkoutPlan, ApiError> {
        self.suggestion
            .clone()
            .ok_or_else(|| ApiError::NotFound("plan suggestion".to_string()))
    }

    async fn save_plan(&self, plan: &WorkoutPlan) -> Result<WorkoutPlan, ApiError> {
        let mut stored = plan.clone();
        let mut plans = self.plans.lock();
        let next_id = plans.keys().max().copied().unwrap_or(0) + 1;
        stored.id = Some(next_id);
        plans.insert(next_id, stored.clone());
        self.saved_plans.lock().push(plan.clone());
        Ok(stored)
    }
}

#[async_trait]
impl SessionStore for MockApi {
    async fn save_session(&self, record: &SessionRecord) -> Result<(), ApiError> {
        if !self.save_delay.is_zero() {
            tokio::time::sleep(self.save_delay).await;
        }
        self.saved_sessions.lock().push(record.clone());
        if self.fail_saves {
            return Err(ApiError::Status {
                status: 500,
                body: "mock failure".to_string(),
            });
        }
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<SessionLog>, ApiError> {
        Ok(self.history.clone())
    }
}
