use crate::api::{ApiError, PlanId, SessionLog, WorkoutPlan};

/// Results of background work, delivered to the event loop
#[derive(Debug)]
pub enum AppEvent {
    /// A plan fetch finished
    PlanLoaded {
        plan_id: PlanId,
        result: Result<WorkoutPlan, ApiError>,
    },

    /// Session submission finished
    SessionSaved(Result<(), ApiError>),

    /// History fetch finished
    HistoryLoaded(Result<Vec<SessionLog>, ApiError>),
}
