//! Terminal views.
//!
//! Each view is a thin [`Widget`](ratatui::widgets::Widget) wrapper around a
//! reference to session state. Views do no state changes; key handling lives in
//! [`crate::app::dispatch`].

pub mod chrome;
pub mod menu;
pub mod profiles;
pub mod report;
pub mod setup;
pub mod tui;
pub mod wizard;

pub use chrome::{FooterView, HeaderView};
pub use menu::MainMenuView;
pub use profiles::{ManageProfilesView, ProfilePreviewView};
pub use report::{GeneratingView, ReportConfigView, ReportView};
pub use setup::{FormatSelectionView, SetupView};
pub use tui::TuiRenderer;
pub use wizard::WizardView;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
};

use crate::app::{Screen, Session};

pub(crate) const ACCENT: Color = Color::Magenta;

pub(crate) fn selected_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub(crate) fn muted_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub(crate) fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Key hints for the footer of each screen.
pub(crate) fn key_hints(session: &Session) -> &'static [(&'static str, &'static str)] {
    match &session.screen {
        Screen::MainMenu { .. } => &[("↑/↓", "move"), ("enter", "select"), ("q", "quit")],
        Screen::Setup(state) if state.editing.is_some() => &[("enter", "save"), ("esc", "cancel")],
        Screen::Setup(_) => &[("↑/↓", "move"), ("enter", "edit"), ("esc", "back"), ("q", "quit")],
        Screen::FormatSelection { .. } => &[("↑/↓", "move"), ("enter", "choose"), ("esc", "back")],
        Screen::ManageProfiles(state) if state.confirm_delete.is_some() => {
            &[("y", "delete"), ("any key", "cancel")]
        }
        Screen::ManageProfiles(_) => &[
            ("enter", "open"),
            ("d", "make default"),
            ("backspace", "delete"),
            ("esc", "back"),
        ],
        Screen::ProfileWizard(wizard) if wizard.editing.is_some() => {
            &[("enter", "confirm"), ("esc", "discard")]
        }
        Screen::ProfileWizard(_) => &[
            ("↑/↓", "move"),
            ("space", "toggle"),
            ("r", "reload"),
            ("enter", "continue"),
            ("esc", "cancel"),
        ],
        Screen::ProfilePreview { .. } => &[("e", "edit"), ("d", "delete"), ("esc", "back")],
        Screen::ReportConfig(_) => &[
            ("←/→", "profile"),
            ("↑/↓", "period"),
            ("enter", "generate"),
            ("esc", "back"),
        ],
        Screen::ReportGenerating { .. } => &[("esc", "cancel")],
        Screen::ReportView(_) => &[("↑/↓", "scroll"), ("s", "save"), ("esc", "menu")],
    }
}

/// Draw one frame: header, current screen, footer.
pub fn render(frame: &mut Frame, session: &Session) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .split(frame.area());

    frame.render_widget(HeaderView::new(session), chunks[0]);

    let body = chunks[1];
    match &session.screen {
        Screen::MainMenu { cursor } => {
            frame.render_widget(MainMenuView::new(&session.menu, *cursor), body)
        }
        Screen::Setup(state) => frame.render_widget(SetupView::new(session, state), body),
        Screen::FormatSelection { cursor } => {
            frame.render_widget(FormatSelectionView::new(*cursor), body)
        }
        Screen::ManageProfiles(state) => {
            frame.render_widget(ManageProfilesView::new(&session.profiles, state), body)
        }
        Screen::ProfileWizard(wizard) => frame.render_widget(WizardView::new(wizard), body),
        Screen::ProfilePreview { profile } => {
            frame.render_widget(ProfilePreviewView::new(profile), body)
        }
        Screen::ReportConfig(state) => {
            frame.render_widget(ReportConfigView::new(&session.profiles, state), body)
        }
        Screen::ReportGenerating { profile, mode, .. } => {
            frame.render_widget(GeneratingView::new(profile, *mode, session.spinner_frame), body)
        }
        Screen::ReportView(view) => frame.render_widget(ReportView::new(view), body),
    }

    frame.render_widget(FooterView::new(key_hints(session), session.notice.as_deref()), chunks[2]);
}
