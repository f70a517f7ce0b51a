use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{muted_style, selected_style};
use crate::app::MenuEntry;

pub struct MainMenuView<'a> {
    entries: &'a [MenuEntry],
    cursor: usize,
}

impl<'a> MainMenuView<'a> {
    pub fn new(entries: &'a [MenuEntry], cursor: usize) -> Self {
        Self { entries, cursor }
    }
}

impl<'a> Widget for MainMenuView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            let MenuEntry::Item(item) = entry else {
                lines.push(Line::default());
                continue;
            };

            let selected = index == self.cursor;
            let marker = if selected { "▸ " } else { "  " };
            let style = if selected { selected_style() } else { Style::default() };

            let mut spans = vec![Span::styled(format!("{}{}", marker, item.title), style)];
            if let Some(warning) = &item.warning {
                spans.push(Span::styled(
                    format!("  ({})", warning),
                    Style::default().fg(Color::Yellow),
                ));
            }
            if selected {
                spans.push(Span::styled(format!("  {}", item.description), muted_style()));
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).render(area, buf);
    }
}
