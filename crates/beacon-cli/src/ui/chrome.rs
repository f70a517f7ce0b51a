use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::{ACCENT, error_style, muted_style};
use crate::app::Session;

/// Title bar with the profile status indicator.
pub struct HeaderView<'a> {
    session: &'a Session,
}

impl<'a> HeaderView<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }
}

impl<'a> Widget for HeaderView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(ACCENT));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(inner);

        Paragraph::new(Span::styled(
            "Figma Beacon",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .render(chunks[0], buf);

        Paragraph::new(Line::from(self.session.status_line()))
            .alignment(Alignment::Right)
            .render(chunks[1], buf);
    }
}

/// Key hints plus an optional notice line.
pub struct FooterView<'a> {
    hints: &'a [(&'a str, &'a str)],
    notice: Option<&'a str>,
}

impl<'a> FooterView<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)], notice: Option<&'a str>) -> Self {
        Self { hints, notice }
    }
}

impl<'a> Widget for FooterView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(ACCENT));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();
        if let Some(notice) = self.notice {
            lines.push(Line::from(Span::styled(notice, error_style())));
        }

        let mut spans = Vec::new();
        for (i, (key, action)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" • ", muted_style()));
            }
            spans.push(Span::styled(*key, Style::default().fg(ratatui::style::Color::Yellow)));
            spans.push(Span::raw(format!(" {}", action)));
        }
        lines.push(Line::from(spans));

        Paragraph::new(lines).render(inner, buf);
    }
}
