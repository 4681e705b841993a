//! Workout session state machine.
//!
//! The runner walks a plan's exercises: countdown, exercise, rest, and so on
//! until the last exercise, then assembles a [`SessionRecord`] for
//! submission. It performs no I/O. Every mutating call returns the
//! [`Effect`]s the host must execute, and every transition is guarded by the
//! current phase, so a late timer or a repeated key press is a no-op.
//!
//! Timers are plain fields: `countdown_due` for the one-second countdown and
//! `rest_deadline` for the break. The host calls [`SessionRunner::tick`] on
//! every frame; leaving a phase clears its timer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::api::{ApiError, ExerciseLog, PlanId, PlannedExercise, SessionRecord, WorkoutPlan};
use crate::audio::Cue;
use crate::session::clock::Clock;
use crate::session::effect::Effect;
use crate::session::error::SessionError;
use crate::session::phase::Phase;

/// Upper bound for any single timer; longer rest times from a plan or the
/// config are clamped to it.
pub const MAX_TIMER: Duration = Duration::from_secs(24 * 60 * 60);

/// Tunables for a session run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunnerSettings {
    /// Countdown value before each exercise
    pub countdown_from: u32,
    /// Time between countdown decrements
    pub countdown_step: Duration,
    /// Rest used when the next exercise has none configured
    pub default_rest: Duration,
    /// Added to the rest deadline by `extend_break`
    pub break_extension: Duration,
    /// Calorie value reported with every session
    pub placeholder_calories: u32,
    /// Posture score reported with every session
    pub placeholder_posture_score: f64,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            countdown_from: 3,
            countdown_step: Duration::from_secs(1),
            default_rest: Duration::from_secs(60),
            break_extension: Duration::from_secs(15),
            placeholder_calories: 350,
            placeholder_posture_score: 88.5,
        }
    }
}

/// Drives one run through a workout plan
pub struct SessionRunner {
    plan_id: PlanId,
    plan: WorkoutPlan,
    settings: RunnerSettings,
    clock: Arc<dyn Clock>,
    phase: Phase,
    index: usize,
    countdown: u32,
    countdown_due: Option<Instant>,
    rest_deadline: Option<Instant>,
    rest_duration: Duration,
    rest_remaining: Duration,
    started_at: Option<DateTime<Utc>>,
    logs: Vec<ExerciseLog>,
}

impl SessionRunner {
    /// Create a runner in the `Detail` phase.
    ///
    /// Fails with [`SessionError::EmptyPlan`] if the plan has no exercises.
    pub fn new(
        plan_id: PlanId,
        plan: WorkoutPlan,
        settings: RunnerSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SessionError> {
        if plan.exercises.is_empty() {
            return Err(SessionError::EmptyPlan);
        }
        Ok(Self {
            plan_id,
            plan,
            settings,
            clock,
            phase: Phase::Detail,
            index: 0,
            countdown: settings.countdown_from,
            countdown_due: None,
            rest_deadline: None,
            rest_duration: Duration::ZERO,
            rest_remaining: Duration::ZERO,
            started_at: None,
            logs: Vec::new(),
        })
    }

    /// "Start Workout": `Detail -> Countdown`
    pub fn start(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Detail {
            return Vec::new();
        }
        if self.started_at.is_none() {
            self.started_at = Some(self.clock.wall());
        }
        tracing::info!(
            plan_id = self.plan_id,
            exercises = self.plan.exercises.len(),
            "Workout started"
        );
        self.enter_countdown();
        Vec::new()
    }

    /// Advance timers. Call once per rendered frame.
    pub fn tick(&mut self) -> Vec<Effect> {
        match self.phase {
            Phase::Countdown => self.tick_countdown(),
            Phase::Break => self.tick_break(),
            _ => Vec::new(),
        }
    }

    /// "Finish": log the current exercise, then rest or save.
    ///
    /// Ignored outside `InProgress`, which makes a repeated press harmless.
    pub fn finish_current(&mut self) -> Vec<Effect> {
        if self.phase != Phase::InProgress {
            tracing::debug!(phase = %self.phase, "Ignoring finish outside of an exercise");
            return Vec::new();
        }
        let Some(exercise) = self.plan.exercises.get(self.index) else {
            return Vec::new();
        };
        self.logs.push(ExerciseLog::completed(exercise));
        tracing::debug!(
            index = self.index,
            exercise = %exercise.name,
            logged = self.logs.len(),
            "Exercise finished"
        );

        match self.plan.exercises.get(self.index + 1) {
            Some(next) => {
                let rest = next
                    .rest_time_seconds
                    .map(Duration::from_secs)
                    .unwrap_or(self.settings.default_rest);
                self.enter_break(rest);
                vec![Effect::PlayCue(Cue::Success)]
            }
            None => {
                let record = self.build_record();
                self.cancel_timers();
                self.phase = Phase::Saving;
                tracing::info!(
                    plan_id = self.plan_id,
                    logs = record.logs.len(),
                    "Workout complete, submitting session"
                );
                vec![Effect::PlayCue(Cue::Finish), Effect::SubmitSession(record)]
            }
        }
    }

    /// "+15s": push the rest deadline back without leaving `Break`
    pub fn extend_break(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Break {
            return Vec::new();
        }
        let Some(deadline) = self.rest_deadline else {
            return Vec::new();
        };
        let remaining = deadline.saturating_duration_since(self.clock.now());
        let extension = self
            .settings
            .break_extension
            .min(MAX_TIMER.saturating_sub(remaining));
        let extended = after(deadline, extension);
        self.rest_deadline = Some(extended);
        self.rest_duration = self.rest_duration.saturating_add(extension);
        self.rest_remaining = extended.saturating_duration_since(self.clock.now());
        Vec::new()
    }

    /// "Start Next": leave `Break` early
    pub fn advance(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Break {
            return Vec::new();
        }
        self.next_exercise();
        Vec::new()
    }

    /// Report the outcome of the submission requested by `finish_current`.
    ///
    /// Always reaches `Finished`; a failure additionally asks for an error dialog.
    pub fn submission_finished(&mut self, result: Result<(), ApiError>) -> Vec<Effect> {
        if self.phase != Phase::Saving {
            return Vec::new();
        }
        self.phase = Phase::Finished;
        match result {
            Ok(()) => {
                tracing::info!(plan_id = self.plan_id, "Session saved");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(plan_id = self.plan_id, error = %e, "Failed to save session");
                vec![Effect::ShowError {
                    title: "Save Failed".to_string(),
                    message: format!("Failed to save session: {}", e),
                }]
            }
        }
    }

    fn tick_countdown(&mut self) -> Vec<Effect> {
        let now = self.clock.now();
        let mut effects = Vec::new();
        while self.countdown > 0 {
            match self.countdown_due {
                Some(due) if now >= due => {
                    self.countdown -= 1;
                    effects.push(Effect::PlayCue(Cue::Beep));
                    // Step from the previous due time, not from `now`, so ticks don't drift
                    self.countdown_due = Some(after(due, self.settings.countdown_step));
                }
                _ => break,
            }
        }
        if self.countdown == 0 {
            self.cancel_timers();
            self.phase = Phase::InProgress;
        }
        effects
    }

    fn tick_break(&mut self) -> Vec<Effect> {
        let Some(deadline) = self.rest_deadline else {
            return Vec::new();
        };
        self.rest_remaining = deadline.saturating_duration_since(self.clock.now());
        if !self.rest_remaining.is_zero() {
            return Vec::new();
        }
        tracing::debug!(index = self.index, "Rest elapsed");
        self.next_exercise();
        vec![Effect::PlayCue(Cue::Beep)]
    }

    fn enter_countdown(&mut self) {
        self.cancel_timers();
        self.countdown = self.settings.countdown_from;
        self.countdown_due = Some(after(self.clock.now(), self.settings.countdown_step));
        self.phase = Phase::Countdown;
    }

    fn enter_break(&mut self, rest: Duration) {
        self.cancel_timers();
        let rest = rest.min(MAX_TIMER);
        self.rest_duration = rest;
        self.rest_remaining = rest;
        self.rest_deadline = Some(after(self.clock.now(), rest));
        self.phase = Phase::Break;
    }

    fn next_exercise(&mut self) {
        self.index += 1;
        self.enter_countdown();
    }

    fn cancel_timers(&mut self) {
        self.countdown_due = None;
        self.rest_deadline = None;
    }

    fn build_record(&self) -> SessionRecord {
        let end_time = self.clock.wall();
        SessionRecord {
            plan_id: self.plan_id,
            start_time: self.started_at.unwrap_or(end_time),
            end_time,
            total_calories: self.settings.placeholder_calories,
            posture_score_avg: self.settings.placeholder_posture_score,
            logs: self.logs.clone(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn plan_id(&self) -> PlanId {
        self.plan_id
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    /// Zero-based index of the current exercise
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn exercise_count(&self) -> usize {
        self.plan.exercises.len()
    }

    pub fn current_exercise(&self) -> Option<&PlannedExercise> {
        self.plan.exercises.get(self.index)
    }

    /// The exercise after the current one, shown during a break
    pub fn next_exercise_preview(&self) -> Option<&PlannedExercise> {
        self.plan.exercises.get(self.index + 1)
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Total length of the current break, including extensions
    pub fn rest_duration(&self) -> Duration {
        self.rest_duration
    }

    /// Rest left as of the last tick
    pub fn rest_remaining(&self) -> Duration {
        self.rest_remaining
    }

    /// Whole seconds left, rounded up for display
    pub fn rest_remaining_secs(&self) -> u64 {
        let millis = self.rest_remaining.as_millis() as u64;
        millis.div_ceil(1000)
    }

    /// Rest already taken in the current break
    pub fn rest_elapsed(&self) -> Duration {
        self.rest_duration.saturating_sub(self.rest_remaining)
    }

    /// Fraction of the break elapsed, in `0.0..=1.0`
    pub fn rest_progress(&self) -> f64 {
        if self.rest_duration.is_zero() {
            return 0.0;
        }
        (self.rest_elapsed().as_secs_f64() / self.rest_duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn logs(&self) -> &[ExerciseLog] {
        &self.logs
    }

    /// Whether a timer is pending
    pub fn has_pending_timer(&self) -> bool {
        self.countdown_due.is_some() || self.rest_deadline.is_some()
    }
}

/// `from + by`, capped at [`MAX_TIMER`] and never overflowing
fn after(from: Instant, by: Duration) -> Instant {
    let by = by.min(MAX_TIMER);
    from.checked_add(by).unwrap_or(from)
}
