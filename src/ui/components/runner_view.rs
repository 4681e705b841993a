//! Rendering of each session phase.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};

use crate::api::PlannedExercise;
use crate::session::{Phase, SessionRunner};

/// Key hints for the footer in a given phase
pub fn phase_hints(phase: Phase) -> Vec<(&'static str, &'static str)> {
    match phase {
        Phase::Detail => vec![("Enter", "Start Workout"), ("q", "Quit")],
        Phase::Countdown => vec![("q", "Quit")],
        Phase::InProgress => vec![("Enter", "Finish"), ("q", "Quit")],
        Phase::Break => vec![("Enter", "Start Next"), ("+", "+15s"), ("q", "Quit")],
        Phase::Saving => vec![("q", "Quit")],
        Phase::Finished => vec![("r", "Restart"), ("h", "History"), ("q", "Quit")],
    }
}

/// Main panel for the session runner
pub struct RunnerView<'a> {
    runner: &'a SessionRunner,
}

impl<'a> RunnerView<'a> {
    pub fn new(runner: &'a SessionRunner) -> Self {
        Self { runner }
    }

    fn progress_line(&self) -> Line<'static> {
        Line::from(Span::styled(
            format!(
                "Exercise {} / {}",
                self.runner.current_index() + 1,
                self.runner.exercise_count()
            ),
            Style::default().fg(Color::DarkGray),
        ))
    }

    fn exercise_lines(exercise: &PlannedExercise) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                exercise.name.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(format!("Reps: {}", exercise.reps)),
            Line::from(format!("Sets: {}", exercise.sets)),
        ];
        if let Some(tips) = &exercise.tips {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                tips.clone(),
                Style::default().fg(Color::Gray),
            )));
        }
        lines
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let runner = self.runner;
        match runner.phase() {
            Phase::Detail => {
                let plan = runner.plan();
                let mut lines = vec![
                    Line::from(Span::styled(
                        plan.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        plan.description.clone(),
                        Style::default().fg(Color::Gray),
                    )),
                    Line::default(),
                ];
                if let Some(exercise) = runner.current_exercise() {
                    lines.extend(Self::exercise_lines(exercise));
                }
                lines.push(Line::default());
                lines.push(self.progress_line());
                lines
            }
            Phase::Countdown => vec![
                Line::from("Get Ready"),
                Line::default(),
                Line::from(Span::styled(
                    runner.countdown().to_string(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(
                    runner
                        .current_exercise()
                        .map(|e| format!("Next: {}", e.name))
                        .unwrap_or_default(),
                ),
            ],
            Phase::InProgress => {
                let mut lines = runner
                    .current_exercise()
                    .map(Self::exercise_lines)
                    .unwrap_or_default();
                lines.push(Line::default());
                lines.push(self.progress_line());
                lines
            }
            Phase::Break => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        "Rest",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::default(),
                    Line::from(Span::styled(
                        format!("{}s", runner.rest_remaining_secs()),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::default(),
                ];
                if let Some(next) = runner.next_exercise_preview() {
                    lines.push(Line::from(format!(
                        "Up next: {} ({} x {})",
                        next.name, next.sets, next.reps
                    )));
                }
                lines
            }
            Phase::Saving => vec![
                Line::from(Span::styled(
                    "Saving your session...",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Please wait a moment.",
                    Style::default().fg(Color::Gray),
                )),
            ],
            Phase::Finished => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        "Workout Complete",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::default(),
                    Line::from(format!(
                        "You completed {} exercises from {}.",
                        runner.logs().len(),
                        runner.plan().name
                    )),
                    Line::default(),
                ];
                for log in runner.logs() {
                    lines.push(Line::from(Span::styled(
                        format!(
                            "{}  {} x {}",
                            log.exercise_name, log.sets_completed, log.reps_completed
                        ),
                        Style::default().fg(Color::Gray),
                    )));
                }
                lines
            }
        }
    }
}

impl Widget for RunnerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let content_height = lines.len() as u16;
        let show_gauge = self.runner.phase() == Phase::Break;
        let gauge_height = if show_gauge { 2 } else { 0 };

        let top = area.height.saturating_sub(content_height + gauge_height) / 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(top),
                Constraint::Length(content_height),
                Constraint::Length(gauge_height),
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);

        if show_gauge && chunks[2].height >= 2 {
            let width = chunks[2].width.min(40);
            let gauge_area = Rect {
                x: chunks[2].x + (chunks[2].width - width) / 2,
                y: chunks[2].y + 1,
                width,
                height: 1,
            };
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Green))
                .ratio(self.runner.rest_progress())
                .label(format!(
                    "{}s / {}s",
                    self.runner.rest_elapsed().as_secs(),
                    self.runner.rest_duration().as_secs()
                ))
                .render(gauge_area, buf);
        }
    }
}
