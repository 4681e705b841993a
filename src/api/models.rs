//! Wire data model for the fitness API.
//!
//! Field names follow the JSON the API speaks; Rust-side names are renamed
//! where the wire name reads poorly.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a plan on the server
pub type PlanId = i64;

/// A workout plan as served by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PlanId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(rename = "plan_exercises", default)]
    pub exercises: Vec<PlannedExercise>,
}

impl WorkoutPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            schedule: None,
            exercises: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: PlanId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_exercise(mut self, exercise: PlannedExercise) -> Self {
        self.exercises.push(exercise);
        self
    }

    /// Exercises grouped by day number. Exercises without a day land on day 1.
    pub fn exercises_by_day(&self) -> BTreeMap<u32, Vec<&PlannedExercise>> {
        let mut days: BTreeMap<u32, Vec<&PlannedExercise>> = BTreeMap::new();
        for exercise in &self.exercises {
            days.entry(exercise.day_number.unwrap_or(1))
                .or_default()
                .push(exercise);
        }
        days
    }
}

/// One exercise entry within a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedExercise {
    #[serde(rename = "exercise_id", default, skip_serializing_if = "Option::is_none")]
    pub exercise_id: Option<i64>,
    #[serde(rename = "exercise_name")]
    pub name: String,
    pub sets: u32,
    /// Free-form target, e.g. "10" or "8-12"
    pub reps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_number: Option<u32>,
}

impl PlannedExercise {
    pub fn new(name: impl Into<String>, sets: u32, reps: impl Into<String>) -> Self {
        Self {
            exercise_id: None,
            name: name.into(),
            sets,
            reps: reps.into(),
            rest_time_seconds: None,
            tips: None,
            day_number: None,
        }
    }

    pub fn with_rest(mut self, seconds: u64) -> Self {
        self.rest_time_seconds = Some(seconds);
        self
    }

    pub fn with_tips(mut self, tips: impl Into<String>) -> Self {
        self.tips = Some(tips.into());
        self
    }

    pub fn with_day(mut self, day: u32) -> Self {
        self.day_number = Some(day);
        self
    }
}

/// Completion record for one exercise in the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseLog {
    pub exercise_name: String,
    pub sets_completed: u32,
    pub reps_completed: String,
}

impl ExerciseLog {
    /// Log an exercise as completed at its planned targets
    pub fn completed(exercise: &PlannedExercise) -> Self {
        Self {
            exercise_name: exercise.name.clone(),
            sets_completed: exercise.sets,
            reps_completed: exercise.reps.clone(),
        }
    }
}

/// The aggregate submitted when a session ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "plan")]
    pub plan_id: PlanId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_calories: u32,
    pub posture_score_avg: f64,
    pub logs: Vec<ExerciseLog>,
}

/// Per-exercise entry of a persisted session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedExercise {
    pub exercise_name: String,
    pub sets_completed: u32,
    pub reps_completed: String,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub posture_feedback: Option<String>,
}

/// A persisted session as returned by the history endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    pub id: i64,
    #[serde(rename = "plan")]
    pub plan_id: PlanId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_calories: u32,
    pub posture_score_avg: f64,
    #[serde(default)]
    pub logs: Vec<LoggedExercise>,
}

impl SessionLog {
    /// Wall-clock length of the session
    pub fn duration(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }

    /// Local calendar date the session started on
    pub fn local_date(&self) -> NaiveDate {
        self.start_time.with_timezone(&Local).date_naive()
    }
}
