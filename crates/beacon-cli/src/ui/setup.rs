use beacon_types::OutputFormat;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::{error_style, muted_style, selected_style};
use crate::app::session::SetupState;
use crate::app::{Session, SetupRow};

pub struct SetupView<'a> {
    session: &'a Session,
    state: &'a SetupState,
}

impl<'a> SetupView<'a> {
    pub fn new(session: &'a Session, state: &'a SetupState) -> Self {
        Self { session, state }
    }

    fn value(&self, row: SetupRow) -> String {
        let config = &self.session.config;
        match row {
            SetupRow::Token if config.figma_token.is_empty() => "not set".to_string(),
            SetupRow::Token => mask(&config.figma_token),
            SetupRow::UserId if self.session.fetching_user.is_some() => "Gathering...".to_string(),
            SetupRow::UserId if self.session.user_error.is_some() => "Error".to_string(),
            SetupRow::UserId if config.user_id.is_empty() => "Gather".to_string(),
            SetupRow::UserId if !config.user_handle.is_empty() => {
                format!("{} / ({})", config.user_handle, config.user_id)
            }
            SetupRow::UserId => config.user_id.clone(),
            SetupRow::TeamId if config.team_id.is_empty() => "not set".to_string(),
            SetupRow::TeamId => config.team_id.clone(),
            SetupRow::Format => config.output_format.label().to_string(),
            SetupRow::Back => String::new(),
        }
    }
}

/// Show only the last four characters of a secret.
fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    let tail: String = secret.chars().skip(count.saturating_sub(4)).collect();
    format!("{}{}", "•".repeat(count.saturating_sub(4).min(12)), tail)
}

impl<'a> Widget for SetupView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().title("Setup").borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();
        for (index, row) in SetupRow::ALL.iter().enumerate() {
            let selected = index == self.state.cursor;
            let style = if selected { selected_style() } else { Style::default() };
            let marker = if selected { "▸ " } else { "  " };

            let value = match &self.state.editing {
                Some((editing, input)) if editing == row => format!("{}▏", input.value()),
                _ => self.value(*row),
            };
            let mut spans = vec![Span::styled(format!("{}{}", marker, row.title()), style)];
            if !value.is_empty() {
                spans.push(Span::styled(format!("  {}", value), muted_style()));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::default());
        let config = &self.session.config;
        if !config.user_email.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Signed in as {}", config.user_email),
                muted_style(),
            )));
        }
        if let Some(err) = &self.session.user_error {
            lines.push(Line::from(Span::styled(format!("Error: {}", err), error_style())));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

pub struct FormatSelectionView {
    cursor: usize,
}

impl FormatSelectionView {
    pub fn new(cursor: usize) -> Self {
        Self { cursor }
    }
}

impl Widget for FormatSelectionView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().title("Output Format").borders(Borders::ALL);
        let lines: Vec<Line> = OutputFormat::ALL
            .iter()
            .enumerate()
            .map(|(index, format)| {
                if index == self.cursor {
                    Line::from(Span::styled(format!("▸ {}", format.label()), selected_style()))
                } else {
                    Line::from(format!("  {}", format.label()))
                }
            })
            .collect();
        Paragraph::new(lines).block(block).render(area, buf);
    }
}
