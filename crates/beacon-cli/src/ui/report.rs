use beacon_types::{Profile, TimeMode};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::{error_style, muted_style, selected_style};
use crate::app::session::{ReportConfigState, ReportViewState, SPINNER};

pub struct ReportConfigView<'a> {
    profiles: &'a [Profile],
    state: &'a ReportConfigState,
}

impl<'a> ReportConfigView<'a> {
    pub fn new(profiles: &'a [Profile], state: &'a ReportConfigState) -> Self {
        Self { profiles, state }
    }
}

impl<'a> Widget for ReportConfigView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().title("Generate Activity Report").borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();
        let profile = match self.profiles.get(self.state.profile_index) {
            Some(profile) => Span::styled(
                format!("◂ {} ▸", profile.name),
                selected_style(),
            ),
            None => Span::styled("no profiles", muted_style()),
        };
        lines.push(Line::from(vec![Span::raw("Profile: "), profile]));
        lines.push(Line::default());
        lines.push(Line::from("Time period:"));

        for (index, mode) in TimeMode::ALL.iter().enumerate() {
            if index == self.state.mode_index {
                lines.push(Line::from(Span::styled(format!("▸ {}", mode.label()), selected_style())));
            } else {
                lines.push(Line::from(format!("  {}", mode.label())));
            }
        }

        if let Some(err) = &self.state.error {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(err.as_str(), error_style())));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

pub struct GeneratingView<'a> {
    profile: &'a Profile,
    mode: TimeMode,
    frame: usize,
}

impl<'a> GeneratingView<'a> {
    pub fn new(profile: &'a Profile, mode: TimeMode, frame: usize) -> Self {
        Self {
            profile,
            mode,
            frame,
        }
    }
}

impl<'a> Widget for GeneratingView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spinner = SPINNER[self.frame % SPINNER.len()];
        let lines = vec![
            Line::from(Span::styled(
                format!("{} Generating report for {}", spinner, self.profile.name),
                selected_style(),
            )),
            Line::from(Span::styled(
                format!(
                    "{} · {} projects",
                    self.mode.label(),
                    self.profile.project_count()
                ),
                muted_style(),
            )),
        ];
        Paragraph::new(lines)
            .block(Block::default().title("Report").borders(Borders::ALL))
            .render(area, buf);
    }
}

pub struct ReportView<'a> {
    view: &'a ReportViewState,
}

impl<'a> ReportView<'a> {
    pub fn new(view: &'a ReportViewState) -> Self {
        Self { view }
    }
}

impl<'a> Widget for ReportView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!("Report: {}", self.view.profile_name))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

        if let Some(err) = &self.view.error {
            Paragraph::new(Span::styled(format!("Error: {}", err), error_style()))
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
            return;
        }

        if let Some(report) = &self.view.report {
            let mut summary = format!(
                "{} files · {} changes",
                report.total_files, report.total_changes
            );
            if report.skipped_files > 0 {
                summary.push_str(&format!(" · {} skipped", report.skipped_files));
            }
            Paragraph::new(Span::styled(summary, muted_style())).render(chunks[0], buf);
        }

        Paragraph::new(self.view.content.as_str())
            .scroll((self.view.scroll, 0))
            .render(chunks[1], buf);

        let export = match (&self.view.exporting, &self.view.export) {
            (Some(_), _) => Span::styled("Saving report...", muted_style()),
            (None, Some(Ok(path))) => Span::styled(
                format!("Report saved to: {}", path.display()),
                Style::default().fg(Color::Green),
            ),
            (None, Some(Err(err))) => Span::styled(format!("Export failed: {}", err), error_style()),
            (None, None) => Span::raw(""),
        };
        Paragraph::new(export).render(chunks[2], buf);
    }
}
