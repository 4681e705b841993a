//! Past sessions, grouped by day.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::api::SessionLog;
use crate::session::history::{format_duration, group_by_day, HistoryDay};

/// Load state of the history screen
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    pub loading: bool,
    pub days: Vec<HistoryDay>,
    pub error: Option<String>,
    pub scroll: u16,
}

impl HistoryState {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn set_sessions(&mut self, sessions: &[SessionLog]) {
        self.loading = false;
        self.error = None;
        self.days = group_by_day(sessions);
        self.scroll = 0;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn lines(&self) -> Vec<Line<'static>> {
        if self.loading {
            return vec![Line::from("Loading history...")];
        }
        if let Some(error) = &self.error {
            return vec![Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            ))];
        }
        if self.days.is_empty() {
            return vec![Line::from(Span::styled(
                "No sessions yet.",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        let mut lines = Vec::new();
        for day in &self.days {
            lines.push(Line::from(vec![
                Span::styled(
                    day.key(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} kcal", day.total_calories()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            for session in &day.sessions {
                lines.push(Line::from(format!(
                    "  {}  plan #{}  {}  {} kcal  posture {:.1}",
                    session
                        .start_time
                        .with_timezone(&chrono::Local)
                        .format("%H:%M"),
                    session.plan_id,
                    format_duration(session.duration()),
                    session.total_calories,
                    session.posture_score_avg,
                )));
                for log in &session.logs {
                    lines.push(Line::from(Span::styled(
                        format!(
                            "      {}  {} x {}",
                            log.exercise_name, log.sets_completed, log.reps_completed
                        ),
                        Style::default().fg(Color::Gray),
                    )));
                }
            }
            lines.push(Line::default());
        }
        lines
    }
}

/// History screen widget
pub struct HistoryView<'a> {
    state: &'a HistoryState,
}

impl<'a> HistoryView<'a> {
    pub fn new(state: &'a HistoryState) -> Self {
        Self { state }
    }
}

impl Widget for HistoryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" History ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let alignment = if self.state.days.is_empty() {
            Alignment::Center
        } else {
            Alignment::Left
        };

        Paragraph::new(self.state.lines())
            .block(block)
            .alignment(alignment)
            .wrap(Wrap { trim: false })
            .scroll((self.state.scroll, 0))
            .render(area, buf);
    }
}
