use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::{error_style, muted_style, selected_style};
use crate::app::{Wizard, WizardStep};

pub struct WizardView<'a> {
    wizard: &'a Wizard,
}

impl<'a> WizardView<'a> {
    pub fn new(wizard: &'a Wizard) -> Self {
        Self { wizard }
    }

    fn text_field(&self, label: &str, value: &str) -> Vec<Line<'a>> {
        let shown = match &self.wizard.editing {
            Some(input) => Span::styled(format!("{}▏", input.value()), selected_style()),
            None if value.is_empty() => Span::styled("press enter to edit", muted_style()),
            None => Span::raw(value.to_string()),
        };
        vec![Line::from(vec![Span::raw(format!("{}: ", label)), shown])]
    }

    fn project_lines(&self) -> Vec<Line<'a>> {
        if self.wizard.loading.is_some() {
            return vec![Line::from(Span::styled("Loading projects...", muted_style()))];
        }
        let projects = &self.wizard.projects;
        if projects.is_empty() {
            return vec![Line::from(Span::styled("No projects found", muted_style()))];
        }

        let list = &self.wizard.list;
        let mut lines: Vec<Line> = list
            .visible(projects.len())
            .map(|index| {
                let project = &projects[index];
                let check = if self.wizard.is_selected(project) { "[x]" } else { "[ ]" };
                let style = if index == list.cursor { selected_style() } else { Style::default() };
                Line::from(Span::styled(format!("{} {}", check, project.name), style))
            })
            .collect();
        lines.push(Line::from(Span::styled(
            format!(
                "{} of {} selected",
                self.wizard.selected_projects().len(),
                projects.len()
            ),
            muted_style(),
        )));
        lines
    }
}

impl<'a> Widget for WizardView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let verb = if self.wizard.is_edit() { "Edit profile" } else { "New profile" };
        let step = self.wizard.step;
        let block = Block::default()
            .title(format!("{} · Step {} of 3: {}", verb, step.number(), step.title()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).split(inner);

        let lines = match step {
            WizardStep::Team => self.text_field("Team ID", &self.wizard.team_id),
            WizardStep::Projects => self.project_lines(),
            WizardStep::Name => self.text_field("Profile name", &self.wizard.name),
        };
        Paragraph::new(lines).render(chunks[0], buf);

        let status = if self.wizard.saving {
            Line::from(Span::styled("Saving...", muted_style()))
        } else if let Some(err) = &self.wizard.error {
            Line::from(Span::styled(err.as_str(), error_style()))
        } else if let Some(progress) = &self.wizard.progress {
            Line::from(Span::styled(progress.as_str(), muted_style()))
        } else {
            Line::default()
        };
        Paragraph::new(status).render(chunks[1], buf);
    }
}
