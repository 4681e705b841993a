//! Error dialog component for displaying errors to users

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::footer::hint_line;

const DIALOG_WIDTH: u16 = 50;

/// Clear a bordered box of at most `width` x `height` centered in `area`
/// and return its inner area.
fn centered_box(area: Rect, width: u16, height: u16, title: &str, buf: &mut Buffer) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let outer = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    Clear.render(outer, buf);
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(outer);
    block.render(outer, buf);
    inner
}

/// State for the error dialog
#[derive(Debug, Clone, Default)]
pub struct ErrorDialogState {
    /// Whether the dialog is visible
    pub visible: bool,
    /// Dialog title
    pub title: String,
    /// Main error message
    pub message: String,
    /// Number of times the dialog has been shown
    shown_count: usize,
}

impl ErrorDialogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the dialog with an error message
    pub fn show(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.visible = true;
        self.title = title.into();
        self.message = message.into();
        self.shown_count += 1;
    }

    /// Hide the dialog
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn shown_count(&self) -> usize {
        self.shown_count
    }
}

/// Error dialog widget
pub struct ErrorDialog<'a> {
    state: &'a ErrorDialogState,
}

impl<'a> ErrorDialog<'a> {
    pub fn new(state: &'a ErrorDialogState) -> Self {
        Self { state }
    }

    /// Calculate message height based on text length and available width
    fn calculate_message_lines(&self, width: u16) -> u16 {
        if self.state.message.is_empty() {
            return 0;
        }
        // Border plus two columns of padding per side
        let available_width = width.saturating_sub(6) as usize;
        if available_width == 0 {
            return 1;
        }
        self.state.message.len().div_ceil(available_width).max(1) as u16
    }
}

impl Widget for ErrorDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.state.visible {
            return;
        }

        // borders + padding + button + instructions
        let message_lines = self.calculate_message_lines(DIALOG_WIDTH);
        let dialog_height = 8 + message_lines;

        let inner = centered_box(area, DIALOG_WIDTH, dialog_height, &self.state.title, buf);

        if inner.height < 4 {
            return;
        }

        Paragraph::new(self.state.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(
                Rect {
                    x: inner.x + 1,
                    y: inner.y + 1,
                    width: inner.width.saturating_sub(2),
                    height: message_lines.min(inner.height.saturating_sub(4)),
                },
                buf,
            );

        let button_style = Style::default()
            .fg(Color::Black)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD);
        Paragraph::new(Line::from(Span::styled("  OK  ", button_style)))
            .alignment(Alignment::Center)
            .render(
                Rect {
                    x: inner.x,
                    y: inner.y + inner.height.saturating_sub(3),
                    width: inner.width,
                    height: 1,
                },
                buf,
            );

        Paragraph::new(hint_line(&[("Enter/Esc", "Dismiss")])).render(
            Rect {
                x: inner.x,
                y: inner.y + inner.height.saturating_sub(1),
                width: inner.width,
                height: 1,
            },
            buf,
        );
    }
}
