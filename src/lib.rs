pub mod api;
pub mod audio;
pub mod config;
pub mod report;
pub mod session;
pub mod ui;
pub mod util;

pub use api::{
    ApiClient, ApiError, ExerciseLog, PlanId, PlanProvider, PlannedExercise, SessionLog,
    SessionRecord, SessionStore, WorkoutPlan,
};
pub use audio::{Cue, CuePlayer};
pub use config::Config;
pub use session::{Clock, Effect, Phase, RunnerSettings, SessionError, SessionRunner};
pub use ui::{App, AppServices};
