//! Plain-text output for the non-interactive subcommands.

use std::fmt::Write;

use crate::api::{SessionLog, WorkoutPlan};
use crate::session::history::{format_duration, group_by_day};

/// One line per plan: id, name, exercise count
pub fn plan_list(plans: &[WorkoutPlan]) -> String {
    if plans.is_empty() {
        return "No saved plans.\n".to_string();
    }
    let mut out = String::new();
    for plan in plans {
        let id = plan
            .id
            .map(|id| format!("#{}", id))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>6}  {}  ({} exercises)",
            id,
            plan.name,
            plan.exercises.len()
        );
    }
    out
}

/// Full plan listing, exercises grouped by day
pub fn plan_detail(plan: &WorkoutPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", plan.name);
    if !plan.description.is_empty() {
        let _ = writeln!(out, "{}", plan.description);
    }
    if let Some(schedule) = &plan.schedule {
        let _ = writeln!(out, "Schedule: {}", schedule);
    }

    for (day, exercises) in plan.exercises_by_day() {
        let _ = writeln!(out, "\nDay {}", day);
        for exercise in exercises {
            let rest = exercise
                .rest_time_seconds
                .map(|s| format!(", rest {}s", s))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {}: {} x {}{}",
                exercise.name, exercise.sets, exercise.reps, rest
            );
            if let Some(tips) = &exercise.tips {
                let _ = writeln!(out, "    {}", tips);
            }
        }
    }
    out
}

/// Session history grouped by day, newest first
pub fn history(sessions: &[SessionLog]) -> String {
    let days = group_by_day(sessions);
    if days.is_empty() {
        return "No sessions yet.\n".to_string();
    }

    let mut out = String::new();
    for day in days {
        let _ = writeln!(out, "{}  ({} kcal)", day.key(), day.total_calories());
        for session in &day.sessions {
            let _ = writeln!(
                out,
                "  {}  plan #{}  {}  {} exercises  posture {:.1}",
                session
                    .start_time
                    .with_timezone(&chrono::Local)
                    .format("%H:%M"),
                session.plan_id,
                format_duration(session.duration()),
                session.logs.len(),
                session.posture_score_avg
            );
        }
    }
    out
}
