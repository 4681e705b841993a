use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::api::models::{PlanId, SessionLog, SessionRecord, WorkoutPlan};

/// Source of workout plans
#[async_trait]
pub trait PlanProvider: Send + Sync {
    /// Fetch a single plan with its exercises
    async fn get_plan(&self, id: PlanId) -> Result<WorkoutPlan, ApiError>;

    /// List the user's saved plans
    async fn list_plans(&self) -> Result<Vec<WorkoutPlan>, ApiError>;

    /// Ask the server to generate a plan from the user's profile
    async fn suggest_plan(&self) -> Result<WorkoutPlan, ApiError>;

    /// Save a plan to the user's collection, returning the stored copy
    async fn save_plan(&self, plan: &WorkoutPlan) -> Result<WorkoutPlan, ApiError>;
}

/// Persistence for completed sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a finished session. No retry or idempotency is implied.
    async fn save_session(&self, record: &SessionRecord) -> Result<(), ApiError>;

    /// List previously saved sessions
    async fn list_sessions(&self) -> Result<Vec<SessionLog>, ApiError>;
}
