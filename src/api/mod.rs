pub mod client;
pub mod error;
pub mod mock;
pub mod models;
pub mod provider;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::{
    ExerciseLog, LoggedExercise, PlanId, PlannedExercise, SessionLog, SessionRecord, WorkoutPlan,
};
pub use provider::{PlanProvider, SessionStore};
