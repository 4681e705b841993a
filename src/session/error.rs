use thiserror::Error;

use crate::api::{ApiError, PlanId};

/// Errors that prevent a session from running
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No exercises found for this plan.")]
    EmptyPlan,

    #[error("Plan {0} not found.")]
    PlanNotFound(PlanId),

    #[error("Failed to load plan: {0}")]
    Api(#[source] ApiError),
}

impl SessionError {
    /// Map a plan fetch failure, folding 404 into `PlanNotFound`
    pub fn from_plan_fetch(id: PlanId, err: ApiError) -> Self {
        if err.is_not_found() {
            SessionError::PlanNotFound(id)
        } else {
            SessionError::Api(err)
        }
    }
}
