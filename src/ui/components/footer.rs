use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Centered row of `key action` pairs
pub(crate) fn hint_line<'a>(hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let spans = hints
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let gap = (i > 0).then(|| Span::raw("  "));
            gap.into_iter().chain([
                Span::styled(*key, Style::default().fg(Color::Cyan)),
                Span::raw(format!(" {}", action)),
            ])
        })
        .collect::<Vec<_>>();
    Line::from(spans).alignment(Alignment::Center)
}

/// Bottom bar with key hints for the current screen
pub struct Footer<'a> {
    hints: Vec<(&'a str, &'a str)>,
}

impl<'a> Footer<'a> {
    pub fn new(hints: Vec<(&'a str, &'a str)>) -> Self {
        Self { hints }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(hint_line(&self.hints))
            .style(Style::default().bg(Color::Black))
            .render(area, buf);
    }
}
