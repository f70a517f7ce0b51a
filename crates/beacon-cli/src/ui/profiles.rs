use beacon_types::Profile;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::{error_style, muted_style, selected_style};
use crate::app::session::ManageState;

pub struct ManageProfilesView<'a> {
    profiles: &'a [Profile],
    state: &'a ManageState,
}

impl<'a> ManageProfilesView<'a> {
    pub fn new(profiles: &'a [Profile], state: &'a ManageState) -> Self {
        Self { profiles, state }
    }

    fn row(&self, index: usize) -> Line<'a> {
        let selected = index == self.state.list.cursor;
        let style = if selected { selected_style() } else { Style::default() };
        let marker = if selected { "▸ " } else { "  " };

        if index == 0 {
            return Line::from(Span::styled(format!("{}+ Create profile", marker), style));
        }
        let Some(profile) = self.profiles.get(index - 1) else {
            return Line::from(Span::styled(format!("{}← Back", marker), style));
        };

        let mut spans = vec![Span::styled(format!("{}{}", marker, profile.name), style)];
        if profile.is_default {
            spans.push(Span::styled(" (default)", Style::default().fg(Color::Green)));
        }
        if selected {
            spans.push(Span::styled(
                format!("  {} projects", profile.project_count()),
                muted_style(),
            ));
        }
        Line::from(spans)
    }
}

impl<'a> Widget for ManageProfilesView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!("Profiles ({})", self.profiles.len()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).split(inner);

        let rows = self.profiles.len() + 2;
        let lines: Vec<Line> = self.state.list.visible(rows).map(|i| self.row(i)).collect();
        Paragraph::new(lines).render(chunks[0], buf);

        let status = if let Some(name) = &self.state.confirm_delete {
            Line::from(Span::styled(
                format!("Delete profile '{}'? (y/n)", name),
                Style::default().fg(Color::Yellow),
            ))
        } else if let Some(err) = &self.state.error {
            Line::from(Span::styled(err.as_str(), error_style()))
        } else {
            Line::default()
        };
        Paragraph::new(status).render(chunks[1], buf);
    }
}

pub struct ProfilePreviewView<'a> {
    profile: &'a Profile,
}

impl<'a> ProfilePreviewView<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        Self { profile }
    }
}

impl<'a> Widget for ProfilePreviewView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!("Profile: {}", self.profile.name))
            .borders(Borders::ALL);

        let field = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<10}", label), muted_style()),
                Span::raw(value),
            ])
        };

        let mut lines = vec![
            field("Name", self.profile.name.clone()),
            field("Team ID", self.profile.team_id.clone()),
            field(
                "Created",
                self.profile.created_at.format("%Y-%m-%d %H:%M").to_string(),
            ),
            field(
                "Default",
                if self.profile.is_default { "yes" } else { "no" }.to_string(),
            ),
            Line::default(),
            Line::from(Span::styled(
                format!("Projects ({})", self.profile.project_count()),
                selected_style(),
            )),
        ];
        lines.extend(
            self.profile
                .selected_projects
                .iter()
                .map(|project| Line::from(format!("  • {}", project.name))),
        );

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
