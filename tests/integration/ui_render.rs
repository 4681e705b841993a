//! Rendering tests using Ratatui's TestBackend

use std::time::Duration;

use crossterm::event::KeyCode;
use fitrun::api::mock::MockApi;

use super::common::fixtures::{plan_with, two_exercise_plan, Harness};
use super::common::terminal::render_app;

#[tokio::test]
async fn test_loading_screen() {
    let h = Harness::new(MockApi::new(), 1);
    let screen = render_app(&h.app);
    assert!(screen.contains("Loading plan..."));
    assert!(screen.contains("q Quit"));
}

#[tokio::test]
async fn test_missing_plan_is_shown() {
    let mut h = Harness::new(MockApi::new(), 12);
    h.load().await;
    assert!(render_app(&h.app).contains("Plan 12 not found."));
}

#[tokio::test]
async fn test_detail_shows_first_exercise() {
    let mut h = Harness::new(MockApi::new().with_plan(two_exercise_plan()), 1);
    h.load().await;

    let screen = render_app(&h.app);
    assert!(screen.contains("Full Body"));
    assert!(screen.contains("Squat then press"));
    assert!(screen.contains("Reps: 5"));
    assert!(screen.contains("Sets: 5"));
    assert!(screen.contains("Brace before each rep"));
    assert!(screen.contains("Exercise 1 / 2"));
    assert!(screen.contains("Enter Start Workout"));
}

#[tokio::test]
async fn test_countdown_and_break_screens() {
    let mut h = Harness::new(MockApi::new().with_plan(two_exercise_plan()), 1);
    h.load().await;

    h.press(KeyCode::Enter);
    let screen = render_app(&h.app);
    assert!(screen.contains("Get Ready"));
    assert!(screen.contains("3"));

    h.advance(Duration::from_secs(3));
    h.press(KeyCode::Enter);
    h.advance(Duration::from_secs(15));

    let screen = render_app(&h.app);
    assert!(screen.contains("Rest"));
    assert!(screen.contains("45s"));
    assert!(screen.contains("15s / 60s"));
    assert!(screen.contains("Up next: Overhead Press (3 x 8-10)"));
    assert!(screen.contains("+ +15s"));
}

#[tokio::test]
async fn test_finished_screen_lists_logs() {
    let mut h = Harness::new(MockApi::new().with_plan(plan_with(3, &["Row"])), 3);
    h.load().await;

    h.press(KeyCode::Enter);
    h.advance(Duration::from_secs(3));
    h.press(KeyCode::Enter);
    assert!(render_app(&h.app).contains("Saving your session..."));

    h.settle().await;
    let screen = render_app(&h.app);
    assert!(screen.contains("Workout Complete"));
    assert!(screen.contains("You completed 1 exercises from Test Plan."));
    assert!(screen.contains("Row  3 x 10"));
    assert!(screen.contains("r Restart"));
}

#[tokio::test]
async fn test_save_failure_dialog_is_drawn() {
    let api = MockApi::new()
        .with_plan(plan_with(3, &["Row"]))
        .failing_saves();
    let mut h = Harness::new(api, 3);
    h.load().await;

    h.press(KeyCode::Enter);
    h.advance(Duration::from_secs(3));
    h.press(KeyCode::Enter);
    h.settle().await;

    let screen = render_app(&h.app);
    assert!(screen.contains("Save Failed"));
    assert!(screen.contains("Enter/Esc Dismiss"));
}

#[tokio::test]
async fn test_extending_break_keeps_elapsed_label() {
    let mut h = Harness::new(MockApi::new().with_plan(two_exercise_plan()), 1);
    h.load().await;

    h.press(KeyCode::Enter);
    h.advance(Duration::from_secs(3));
    h.press(KeyCode::Enter);
    h.advance(Duration::from_secs(15));
    assert!(render_app(&h.app).contains("15s / 60s"));

    // Only the total grows; elapsed seconds shown stay put
    h.press(KeyCode::Char('+'));
    let screen = render_app(&h.app);
    assert!(screen.contains("15s / 75s"));
    assert!(screen.contains("60s"));
}
