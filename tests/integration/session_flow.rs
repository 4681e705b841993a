//! Integration tests for the workout session flow
//!
//! Drives the app through key presses and a manual clock, with the mock API
//! standing in for the server.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyCode;
use fitrun::api::mock::MockApi;
use fitrun::audio::Cue;
use fitrun::session::{Effect, ManualClock, Phase, RunnerSettings, SessionRunner};
use fitrun::ui::Screen;
use proptest::prelude::*;

use super::common::fixtures::{plan_with, session_log, test_now, two_exercise_plan, Harness};

const SECOND: Duration = Duration::from_secs(1);

fn phase(harness: &Harness) -> Phase {
    harness.app.runner().expect("runner should be loaded").phase()
}

#[tokio::test]
async fn test_full_session_is_saved() {
    let api = MockApi::new().with_plan(two_exercise_plan());
    let mut h = Harness::new(api, 1);
    h.load().await;
    assert_eq!(h.app.screen(), &Screen::Runner);
    assert_eq!(phase(&h), Phase::Detail);

    h.press(KeyCode::Enter);
    assert_eq!(phase(&h), Phase::Countdown);
    for expected in [2, 1] {
        h.advance(SECOND);
        assert_eq!(h.app.runner().unwrap().countdown(), expected);
    }
    h.advance(SECOND);
    assert_eq!(phase(&h), Phase::InProgress);
    assert_eq!(h.player.count(Cue::Beep), 3);

    h.press(KeyCode::Enter);
    assert_eq!(phase(&h), Phase::Break);
    assert_eq!(h.app.runner().unwrap().rest_duration(), 60 * SECOND);
    assert_eq!(h.player.count(Cue::Success), 1);

    h.press(KeyCode::Char('+'));
    assert_eq!(h.app.runner().unwrap().rest_duration(), 75 * SECOND);

    h.press(KeyCode::Char('n'));
    let runner = h.app.runner().unwrap();
    assert_eq!(runner.phase(), Phase::Countdown);
    assert_eq!(runner.current_index(), 1);
    assert_eq!(runner.countdown(), 3);

    h.advance(3 * SECOND);
    assert_eq!(phase(&h), Phase::InProgress);

    h.press(KeyCode::Enter);
    assert_eq!(phase(&h), Phase::Saving);
    assert_eq!(h.player.count(Cue::Finish), 1);

    h.settle().await;
    assert_eq!(phase(&h), Phase::Finished);
    assert!(!h.app.error_dialog().is_visible());

    let saved = h.api.saved_sessions();
    assert_eq!(saved.len(), 1);
    let record = &saved[0];
    assert_eq!(record.plan_id, 1);
    assert_eq!(record.start_time, test_now());
    assert_eq!(record.end_time, test_now() + chrono::Duration::seconds(6));
    let names: Vec<&str> = record.logs.iter().map(|l| l.exercise_name.as_str()).collect();
    assert_eq!(names, vec!["Squat", "Overhead Press"]);
    assert_eq!(record.logs[1].reps_completed, "8-10");
}

#[tokio::test]
async fn test_rest_elapsing_starts_next_countdown() {
    let api = MockApi::new().with_plan(two_exercise_plan());
    let mut h = Harness::new(api, 1);
    h.load().await;

    h.press(KeyCode::Enter);
    h.advance(3 * SECOND);
    h.press(KeyCode::Enter);
    assert_eq!(phase(&h), Phase::Break);

    h.advance(30 * SECOND);
    assert_eq!(h.app.runner().unwrap().rest_remaining_secs(), 30);

    let beeps_before = h.player.count(Cue::Beep);
    h.advance(30 * SECOND);
    let runner = h.app.runner().unwrap();
    assert_eq!(runner.phase(), Phase::Countdown);
    assert_eq!(runner.current_index(), 1);
    assert_eq!(h.player.count(Cue::Beep), beeps_before + 1);

    // The manual path is closed once the break has ended
    h.press(KeyCode::Char('n'));
    assert_eq!(h.app.runner().unwrap().current_index(), 1);
}

#[tokio::test]
async fn test_single_exercise_goes_straight_to_saving() {
    let api = MockApi::new().with_plan(plan_with(4, &["Plank"]));
    let mut h = Harness::new(api, 4);
    h.load().await;

    h.press(KeyCode::Char(' '));
    h.advance(3 * SECOND);
    h.press(KeyCode::Char('f'));
    assert_eq!(phase(&h), Phase::Saving);
    assert_eq!(h.player.count(Cue::Success), 0);
}

#[tokio::test]
async fn test_failed_save_still_finishes_with_one_alert() {
    let api = MockApi::new()
        .with_plan(plan_with(2, &["Push Up"]))
        .failing_saves();
    let mut h = Harness::new(api, 2);
    h.load().await;

    h.press(KeyCode::Enter);
    h.advance(3 * SECOND);
    h.press(KeyCode::Enter);
    // A second press while saving must not submit twice
    h.press(KeyCode::Enter);
    h.settle().await;

    assert_eq!(phase(&h), Phase::Finished);
    let dialog = h.app.error_dialog();
    assert!(dialog.is_visible());
    assert_eq!(dialog.shown_count(), 1);
    assert_eq!(dialog.title, "Save Failed");
    assert!(dialog.message.starts_with("Failed to save session:"));
    assert_eq!(h.api.saved_sessions().len(), 1);

    // Keys go to the dialog until it is dismissed
    h.press(KeyCode::Char('h'));
    assert_eq!(h.app.screen(), &Screen::Runner);
    h.press(KeyCode::Esc);
    assert!(!h.app.error_dialog().is_visible());
    assert_eq!(h.app.error_dialog().shown_count(), 1);
}

#[tokio::test]
async fn test_saving_ignores_everything_but_quit() {
    let api = MockApi::new()
        .with_plan(plan_with(3, &["Row"]))
        .with_save_delay(Duration::from_millis(50));
    let mut h = Harness::new(api, 3);
    h.load().await;

    h.press(KeyCode::Enter);
    h.advance(3 * SECOND);
    h.press(KeyCode::Enter);
    assert_eq!(phase(&h), Phase::Saving);

    for code in [KeyCode::Enter, KeyCode::Char('r'), KeyCode::Char('h'), KeyCode::Char('+')] {
        h.press(code);
        assert_eq!(phase(&h), Phase::Saving);
        assert_eq!(h.app.screen(), &Screen::Runner);
    }

    h.settle().await;
    assert_eq!(phase(&h), Phase::Finished);
    assert_eq!(h.api.saved_sessions().len(), 1);
}

#[tokio::test]
async fn test_restart_reloads_plan() {
    let api = MockApi::new().with_plan(plan_with(5, &["Lunge"]));
    let mut h = Harness::new(api, 5);
    h.load().await;

    h.press(KeyCode::Enter);
    h.advance(3 * SECOND);
    h.press(KeyCode::Enter);
    h.settle().await;
    assert_eq!(phase(&h), Phase::Finished);

    h.press(KeyCode::Char('r'));
    assert_eq!(h.app.screen(), &Screen::Loading);
    assert!(h.app.runner().is_none());

    h.settle().await;
    let runner = h.app.runner().unwrap();
    assert_eq!(runner.phase(), Phase::Detail);
    assert!(runner.logs().is_empty());
}

#[tokio::test]
async fn test_history_opens_from_finished() {
    let start = test_now();
    let api = MockApi::new()
        .with_plan(plan_with(6, &["Deadlift"]))
        .with_history(vec![
            session_log(1, 6, start, 40),
            session_log(2, 6, start - chrono::Duration::days(2), 35),
        ]);
    let mut h = Harness::new(api, 6);
    h.load().await;

    h.press(KeyCode::Enter);
    h.advance(3 * SECOND);
    h.press(KeyCode::Enter);
    h.settle().await;

    h.press(KeyCode::Char('h'));
    assert_eq!(h.app.screen(), &Screen::History);
    assert!(h.app.history().loading);

    h.settle().await;
    let history = h.app.history();
    assert!(!history.loading);
    assert_eq!(history.days.len(), 2);
    assert!(history.days[0].date > history.days[1].date);

    h.press(KeyCode::Esc);
    assert_eq!(h.app.screen(), &Screen::Runner);
}

#[tokio::test]
async fn test_huge_rest_time_from_server_is_clamped() {
    let plan = fitrun::WorkoutPlan::new("Odd")
        .with_id(8)
        .with_exercise(fitrun::PlannedExercise::new("Curl", 3, "12"))
        .with_exercise(fitrun::PlannedExercise::new("Dip", 3, "10").with_rest(u64::MAX));
    let mut h = Harness::new(MockApi::new().with_plan(plan), 8);
    h.load().await;

    h.press(KeyCode::Enter);
    h.advance(3 * SECOND);
    h.press(KeyCode::Enter);
    assert_eq!(phase(&h), Phase::Break);
    assert_eq!(
        h.app.runner().unwrap().rest_duration(),
        fitrun::session::runner::MAX_TIMER
    );

    h.press(KeyCode::Char('+'));
    h.advance(SECOND);
    assert_eq!(phase(&h), Phase::Break);

    h.press(KeyCode::Char('n'));
    assert_eq!(h.app.runner().unwrap().current_index(), 1);
}

/// Run a plan to completion on the bare runner, choosing per break whether to
/// skip it or let it elapse. Returns the submitted logs.
fn run_plan(names: &[String], skip_breaks: &[bool]) -> Vec<String> {
    let plan = names.iter().fold(fitrun::WorkoutPlan::new("Prop"), |plan, name| {
        plan.with_exercise(fitrun::PlannedExercise::new(name.clone(), 3, "10"))
    });
    let clock = ManualClock::new(test_now());
    let mut runner =
        SessionRunner::new(9, plan, RunnerSettings::default(), Arc::new(clock.clone())).unwrap();

    runner.start();
    let mut submitted = None;
    for i in 0..names.len() {
        assert_eq!(runner.phase(), Phase::Countdown);
        assert_eq!(runner.countdown(), 3);
        let mut last = runner.countdown();
        while runner.phase() == Phase::Countdown {
            clock.advance(SECOND);
            runner.tick();
            assert!(runner.countdown() < last || runner.phase() == Phase::InProgress);
            last = runner.countdown();
        }
        assert_eq!(runner.phase(), Phase::InProgress);
        assert_eq!(runner.current_index(), i);

        for effect in runner.finish_current() {
            if let Effect::SubmitSession(record) = effect {
                submitted = Some(record);
            }
        }
        if runner.phase() == Phase::Break {
            if skip_breaks.get(i).copied().unwrap_or(false) {
                runner.advance();
            } else {
                clock.advance(runner.rest_duration());
                runner.tick();
            }
        }
    }

    assert_eq!(runner.phase(), Phase::Saving);
    submitted
        .expect("last exercise should submit")
        .logs
        .into_iter()
        .map(|l| l.exercise_name)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_n_exercises_yield_n_logs_in_order(
        names in prop::collection::vec("[A-Z][a-z]{2,8}", 1..8),
        skip_breaks in prop::collection::vec(any::<bool>(), 8),
    ) {
        let logged = run_plan(&names, &skip_breaks);
        prop_assert_eq!(logged, names);
    }
}
