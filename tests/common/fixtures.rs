//! Plan and session fixtures, plus a harness that drives the app without a
//! terminal.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use fitrun::api::mock::MockApi;
use fitrun::api::{LoggedExercise, PlanId, PlannedExercise, SessionLog, WorkoutPlan};
use fitrun::audio::RecordingPlayer;
use fitrun::session::ManualClock;
use fitrun::{App, AppServices, Config};

/// Fixed start time for testing (2024-01-01 08:00:00 UTC)
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0)
        .single()
        .expect("Invalid test timestamp")
}

/// A plan with one exercise per name, no rest overrides
pub fn plan_with(id: PlanId, names: &[&str]) -> WorkoutPlan {
    names.iter().fold(
        WorkoutPlan::new("Test Plan")
            .with_id(id)
            .with_description("Generated for tests"),
        |plan, name| plan.with_exercise(PlannedExercise::new(*name, 3, "10")),
    )
}

pub fn two_exercise_plan() -> WorkoutPlan {
    WorkoutPlan::new("Full Body")
        .with_id(1)
        .with_description("Squat then press")
        .with_exercise(
            PlannedExercise::new("Squat", 5, "5").with_tips("Brace before each rep"),
        )
        .with_exercise(PlannedExercise::new("Overhead Press", 3, "8-10"))
}

/// A persisted session lasting `minutes`
pub fn session_log(id: i64, plan_id: PlanId, start: DateTime<Utc>, minutes: i64) -> SessionLog {
    SessionLog {
        id,
        plan_id,
        start_time: start,
        end_time: start + chrono::Duration::minutes(minutes),
        total_calories: 350,
        posture_score_avg: 88.5,
        logs: vec![LoggedExercise {
            exercise_name: "Squat".to_string(),
            sets_completed: 5,
            reps_completed: "5".to_string(),
            weight_kg: Some(100.0),
            posture_feedback: None,
        }],
    }
}

/// App wired to a mock API, a recording player and a manual clock
pub struct Harness {
    pub app: App,
    pub api: MockApi,
    pub player: RecordingPlayer,
    pub clock: ManualClock,
}

impl Harness {
    pub fn new(api: MockApi, plan_id: PlanId) -> Self {
        let player = RecordingPlayer::new();
        let clock = ManualClock::new(test_now());
        let services = AppServices {
            plans: Arc::new(api.clone()),
            sessions: Arc::new(api.clone()),
            player: Arc::new(player.clone()),
            clock: Arc::new(clock.clone()),
        };
        let app = App::new(Config::default(), plan_id, services);
        Self {
            app,
            api,
            player,
            clock,
        }
    }

    /// Start the plan fetch and apply its result
    pub async fn load(&mut self) {
        self.app.load_plan();
        self.settle().await;
    }

    /// Apply the next background result
    pub async fn settle(&mut self) {
        let event = tokio::time::timeout(Duration::from_secs(5), self.app.recv_event())
            .await
            .expect("Timed out waiting for app event")
            .expect("Event channel closed");
        self.app.handle_app_event(event);
    }

    /// Move time forward and run one frame
    pub fn advance(&mut self, by: Duration) {
        self.clock.advance(by);
        self.app.tick();
    }

    pub fn press(&mut self, code: crossterm::event::KeyCode) {
        self.app.handle_key(crossterm::event::KeyEvent::new(
            code,
            crossterm::event::KeyModifiers::NONE,
        ));
    }
}
