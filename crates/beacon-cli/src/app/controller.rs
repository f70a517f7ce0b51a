//! Session state transitions.
//!
//! `dispatch` is the only place session state changes. Each screen handler takes
//! the screen state by value and hands back the next screen plus at most one
//! command. Results of commands come back as events; results whose ticket no
//! longer matches the screen that asked for them are dropped.

use beacon_engine::Credentials;
use beacon_types::{OutputFormat, Profile, TimeMode};

use super::command::Command;
use super::event::{Event, GeneratedReport, Key, Ticket};
use super::menu::{MenuAction, MenuEntry, next_selectable, previous_selectable};
use super::session::{
    ManageState, ReportConfigState, ReportViewState, Screen, Session, SetupRow, SetupState,
};
use super::text_input::TextInput;
use super::wizard::{Wizard, WizardOutcome};

type Transition = (Screen, Option<Command>);

pub fn dispatch(mut session: Session, event: Event) -> (Session, Option<Command>) {
    let command = match event {
        Event::Input(Key::CtrlC) => {
            session.should_quit = true;
            None
        }
        Event::Input(key) => on_key(&mut session, key),
        Event::Tick { ticket } => on_tick(&mut session, ticket),
        Event::UserFetched { ticket, result } => on_user_fetched(&mut session, ticket, result),
        Event::ProjectsFetched { ticket, result } => {
            if let Screen::ProfileWizard(wizard) = &mut session.screen {
                wizard.projects_loaded(ticket, result);
            }
            None
        }
        Event::ReportGenerated { ticket, result } => {
            on_report_generated(&mut session, ticket, result)
        }
        Event::ReportExported { ticket, result } => {
            if let Screen::ReportView(view) = &mut session.screen
                && view.exporting == Some(ticket)
            {
                view.exporting = None;
                view.export = Some(result);
            }
            None
        }
        Event::ConfigSaved(result) => {
            if let Err(err) = result {
                session.notice = Some(format!("Failed to save config: {}", err));
            }
            None
        }
        Event::ProfileSaved {
            profile,
            replaces,
            result,
        } => {
            on_profile_saved(&mut session, profile, replaces, result);
            None
        }
        Event::ProfileDeleted { name, result } => {
            on_profile_deleted(&mut session, &name, result);
            None
        }
        Event::DefaultChanged { name, result } => {
            on_default_changed(&mut session, &name, result);
            None
        }
    };
    (session, command)
}

fn on_key(session: &mut Session, key: Key) -> Option<Command> {
    session.notice = None;
    let screen = std::mem::take(&mut session.screen);
    let (screen, command) = match screen {
        Screen::MainMenu { cursor } => main_menu_key(session, cursor, key),
        Screen::Setup(state) => setup_key(session, state, key),
        Screen::FormatSelection { cursor } => format_key(session, cursor, key),
        Screen::ManageProfiles(state) => manage_key(session, state, key),
        Screen::ProfileWizard(wizard) => wizard_key(session, wizard, key),
        Screen::ProfilePreview { profile } => preview_key(session, profile, key),
        Screen::ReportConfig(state) => report_config_key(session, state, key),
        generating @ Screen::ReportGenerating { .. } => match key {
            Key::Esc => (session.main_menu(), None),
            _ => (generating, None),
        },
        Screen::ReportView(view) => report_view_key(session, view, key),
    };
    session.screen = screen;
    command
}

fn main_menu_key(session: &mut Session, cursor: usize, key: Key) -> Transition {
    let stay = |cursor| (Screen::MainMenu { cursor }, None);
    match key {
        Key::Char('q') => {
            session.should_quit = true;
            stay(cursor)
        }
        Key::Esc => (session.main_menu(), None),
        Key::Up | Key::Char('k') => stay(previous_selectable(&session.menu, cursor)),
        Key::Down | Key::Char('j') => stay(next_selectable(&session.menu, cursor)),
        Key::Enter => {
            let action = session
                .menu
                .get(cursor)
                .and_then(MenuEntry::item)
                .map(|item| item.action.clone());
            match action {
                Some(MenuAction::GenerateReport) => {
                    let profile_index = session
                        .active_profile
                        .as_ref()
                        .and_then(|active| session.profiles.iter().position(|p| p.name == active.name))
                        .unwrap_or(0);
                    let state = ReportConfigState {
                        profile_index,
                        mode_index: 0,
                        error: None,
                    };
                    (Screen::ReportConfig(state), None)
                }
                Some(MenuAction::ManageProfiles) => {
                    (Screen::ManageProfiles(ManageState::default()), None)
                }
                Some(MenuAction::ActivateProfile(name)) => {
                    (Screen::MainMenu { cursor }, Some(Command::SetDefault { name }))
                }
                Some(MenuAction::Setup) => {
                    let state = SetupState {
                        cursor: 0,
                        editing: None,
                    };
                    (Screen::Setup(state), None)
                }
                Some(MenuAction::Exit) => {
                    session.should_quit = true;
                    stay(cursor)
                }
                None => stay(cursor),
            }
        }
        _ => stay(cursor),
    }
}

fn setup_key(session: &mut Session, mut state: SetupState, key: Key) -> Transition {
    if let Some((row, mut input)) = state.editing.take() {
        return match key {
            Key::Esc => (Screen::Setup(state), None),
            Key::Enter => {
                let value = input.value().trim().to_string();
                match row {
                    SetupRow::Token => session.config.figma_token = value,
                    SetupRow::TeamId => session.config.team_id = value,
                    _ => {}
                }
                session.refresh_menu();
                let save = Command::SaveConfig(session.config.clone());
                (Screen::Setup(state), Some(save))
            }
            other => {
                input.handle(other);
                state.editing = Some((row, input));
                (Screen::Setup(state), None)
            }
        };
    }

    match key {
        Key::Char('q') => {
            session.should_quit = true;
            (Screen::Setup(state), None)
        }
        Key::Esc => (session.main_menu(), None),
        Key::Up | Key::Char('k') => {
            state.cursor = state.cursor.saturating_sub(1);
            (Screen::Setup(state), None)
        }
        Key::Down | Key::Char('j') => {
            state.cursor = (state.cursor + 1).min(SetupRow::ALL.len() - 1);
            (Screen::Setup(state), None)
        }
        Key::Enter => match state.row() {
            SetupRow::Token => {
                let input = TextInput::with_value(&session.config.figma_token);
                state.editing = Some((SetupRow::Token, input));
                (Screen::Setup(state), None)
            }
            SetupRow::TeamId => {
                let input = TextInput::with_value(&session.config.team_id);
                state.editing = Some((SetupRow::TeamId, input));
                (Screen::Setup(state), None)
            }
            SetupRow::UserId => {
                if session.fetching_user.is_some() {
                    return (Screen::Setup(state), None);
                }
                let ticket = session.issue_ticket();
                session.fetching_user = Some(ticket);
                session.user_error = None;
                let fetch = Command::FetchUser {
                    ticket,
                    token: session.config.figma_token.clone(),
                };
                (Screen::Setup(state), Some(fetch))
            }
            SetupRow::Format => {
                let cursor = OutputFormat::ALL
                    .iter()
                    .position(|f| *f == session.config.output_format)
                    .unwrap_or(0);
                (Screen::FormatSelection { cursor }, None)
            }
            SetupRow::Back => (session.main_menu(), None),
        },
        _ => (Screen::Setup(state), None),
    }
}

fn format_key(session: &mut Session, cursor: usize, key: Key) -> Transition {
    let back_to_setup = Screen::Setup(SetupState {
        cursor: SetupRow::ALL
            .iter()
            .position(|row| *row == SetupRow::Format)
            .unwrap_or(0),
        editing: None,
    });
    match key {
        Key::Esc => (back_to_setup, None),
        Key::Up | Key::Char('k') => (
            Screen::FormatSelection {
                cursor: cursor.saturating_sub(1),
            },
            None,
        ),
        Key::Down | Key::Char('j') => (
            Screen::FormatSelection {
                cursor: (cursor + 1).min(OutputFormat::ALL.len() - 1),
            },
            None,
        ),
        Key::Enter => {
            session.config.output_format = OutputFormat::ALL[cursor.min(OutputFormat::ALL.len() - 1)];
            (back_to_setup, Some(Command::SaveConfig(session.config.clone())))
        }
        _ => (Screen::FormatSelection { cursor }, None),
    }
}

fn manage_key(session: &mut Session, mut state: ManageState, key: Key) -> Transition {
    if let Some(name) = state.confirm_delete.take() {
        let command = matches!(key, Key::Char('y') | Key::Char('Y'))
            .then_some(Command::DeleteProfile { name });
        return (Screen::ManageProfiles(state), command);
    }

    let rows = session.profiles.len() + 2;
    let selected = state
        .list
        .cursor
        .checked_sub(1)
        .and_then(|index| session.profiles.get(index))
        .cloned();

    match key {
        Key::Esc => (session.main_menu(), None),
        Key::Up | Key::Char('k') => {
            state.list.up();
            (Screen::ManageProfiles(state), None)
        }
        Key::Down | Key::Char('j') => {
            state.list.down(rows);
            (Screen::ManageProfiles(state), None)
        }
        Key::Backspace | Key::Delete => {
            if let Some(profile) = selected {
                state.confirm_delete = Some(profile.name);
            }
            (Screen::ManageProfiles(state), None)
        }
        Key::Char('d') | Key::Char('D') => {
            let command = selected.map(|profile| Command::SetDefault { name: profile.name });
            (Screen::ManageProfiles(state), command)
        }
        Key::Enter => {
            if state.list.cursor == 0 {
                let wizard = Wizard::create(&session.config.team_id);
                (Screen::ProfileWizard(Box::new(wizard)), None)
            } else if let Some(profile) = selected {
                (Screen::ProfilePreview { profile }, None)
            } else {
                (session.main_menu(), None)
            }
        }
        _ => (Screen::ManageProfiles(state), None),
    }
}

/// Manage screen with the cursor on `name`'s row.
fn manage_at(session: &Session, name: &str) -> ManageState {
    let mut state = ManageState::default();
    if let Some(index) = session.profiles.iter().position(|p| p.name == name) {
        for _ in 0..=index {
            state.list.down(session.profiles.len() + 2);
        }
    }
    state
}

fn preview_key(session: &mut Session, profile: Profile, key: Key) -> Transition {
    match key {
        Key::Esc => (Screen::ManageProfiles(manage_at(session, &profile.name)), None),
        Key::Char('e') | Key::Char('E') => {
            (Screen::ProfileWizard(Box::new(Wizard::edit(&profile))), None)
        }
        Key::Char('d') | Key::Char('D') => {
            let mut state = manage_at(session, &profile.name);
            state.confirm_delete = Some(profile.name);
            (Screen::ManageProfiles(state), None)
        }
        _ => (Screen::ProfilePreview { profile }, None),
    }
}

fn wizard_key(session: &mut Session, mut wizard: Box<Wizard>, key: Key) -> Transition {
    match wizard.on_key(key, &session.profiles) {
        WizardOutcome::Stay => (Screen::ProfileWizard(wizard), None),
        WizardOutcome::Cancel => (Screen::ManageProfiles(ManageState::default()), None),
        WizardOutcome::FetchProjects { team_id } => {
            let ticket = session.issue_ticket();
            wizard.begin_loading(ticket);
            let fetch = Command::FetchProjects {
                ticket,
                token: session.config.figma_token.clone(),
                team_id,
            };
            (Screen::ProfileWizard(wizard), Some(fetch))
        }
        WizardOutcome::Commit { profile, replaces } => (
            Screen::ProfileWizard(wizard),
            Some(Command::SaveProfile { profile, replaces }),
        ),
    }
}

fn report_config_key(session: &mut Session, mut state: ReportConfigState, key: Key) -> Transition {
    match key {
        Key::Esc => return (session.main_menu(), None),
        Key::Left | Key::Char('h') => {
            state.profile_index = state.profile_index.saturating_sub(1);
        }
        Key::Right | Key::Char('l') => {
            if state.profile_index + 1 < session.profiles.len() {
                state.profile_index += 1;
            }
        }
        Key::Up | Key::Char('k') => {
            state.mode_index = state.mode_index.saturating_sub(1);
        }
        Key::Down | Key::Char('j') => {
            state.mode_index = (state.mode_index + 1).min(TimeMode::ALL.len() - 1);
        }
        Key::Enter => {
            let Some(profile) = session.profiles.get(state.profile_index).cloned() else {
                state.error =
                    Some("No profiles available. Please create a profile first.".to_string());
                return (Screen::ReportConfig(state), None);
            };
            let mode = state.mode();
            let ticket = session.issue_ticket();
            session.spinner_frame = 0;
            let credentials = Credentials::new(session.config.figma_token.clone())
                .with_user(session.config.user_id.clone(), session.config.user_handle.clone());
            let start = Command::StartReport {
                ticket,
                profile: profile.clone(),
                mode,
                credentials,
                format: session.config.output_format,
            };
            let screen = Screen::ReportGenerating {
                ticket,
                profile,
                mode,
            };
            return (screen, Some(start));
        }
        _ => {}
    }
    (Screen::ReportConfig(state), None)
}

fn report_view_key(session: &mut Session, mut view: Box<ReportViewState>, key: Key) -> Transition {
    match key {
        Key::Esc => return (session.main_menu(), None),
        Key::Up | Key::Char('k') => view.scroll = view.scroll.saturating_sub(1),
        Key::Down | Key::Char('j') => view.scroll = view.scroll.saturating_add(1),
        Key::Char('s') | Key::Char('S') if view.report.is_some() && view.exporting.is_none() => {
            let ticket = session.issue_ticket();
            view.exporting = Some(ticket);
            view.export = None;
            let export = Command::ExportReport {
                ticket,
                dir: session.config.reports_dir(),
                profile_name: view.profile_name.clone(),
                content: view.content.clone(),
                format: view.format,
            };
            return (Screen::ReportView(view), Some(export));
        }
        _ => {}
    }
    (Screen::ReportView(view), None)
}

/// Advance the spinner and re-arm, but only for the run currently on screen.
fn on_tick(session: &mut Session, ticket: Ticket) -> Option<Command> {
    match &session.screen {
        Screen::ReportGenerating { ticket: current, .. } if *current == ticket => {
            session.spinner_frame = session.spinner_frame.wrapping_add(1);
            Some(Command::Tick { ticket })
        }
        _ => None,
    }
}

fn on_user_fetched(
    session: &mut Session,
    ticket: Ticket,
    result: Result<beacon_types::CurrentUser, String>,
) -> Option<Command> {
    if session.fetching_user != Some(ticket) {
        return None;
    }
    session.fetching_user = None;
    match result {
        Ok(user) => {
            session.config.user_id = user.id;
            session.config.user_handle = user.handle;
            session.config.user_email = user.email;
            session.user_error = None;
            Some(Command::SaveConfig(session.config.clone()))
        }
        Err(err) => {
            session.user_error = Some(err);
            None
        }
    }
}

fn on_report_generated(
    session: &mut Session,
    ticket: Ticket,
    result: Result<GeneratedReport, String>,
) -> Option<Command> {
    let Screen::ReportGenerating {
        ticket: current,
        profile,
        ..
    } = &session.screen
    else {
        return None;
    };
    if *current != ticket {
        return None;
    }

    let profile_name = profile.name.clone();
    let format = session.config.output_format;
    let mut view = ReportViewState {
        profile_name,
        format,
        report: None,
        content: String::new(),
        error: None,
        scroll: 0,
        exporting: None,
        export: None,
    };

    let command = match result {
        Ok(generated) => {
            let export_ticket = session.issue_ticket();
            view.exporting = Some(export_ticket);
            view.content = generated.content;
            view.report = Some(generated.report);
            Some(Command::ExportReport {
                ticket: export_ticket,
                dir: session.config.reports_dir(),
                profile_name: view.profile_name.clone(),
                content: view.content.clone(),
                format,
            })
        }
        Err(err) => {
            view.error = Some(err);
            None
        }
    };
    session.screen = Screen::ReportView(Box::new(view));
    command
}

fn on_profile_saved(
    session: &mut Session,
    profile: Profile,
    replaces: Option<String>,
    result: Result<Vec<Profile>, String>,
) {
    let profiles = match result {
        Ok(profiles) => profiles,
        Err(err) => {
            match &mut session.screen {
                Screen::ProfileWizard(wizard) if wizard.saving => wizard.save_failed(err),
                _ => session.notice = Some(format!("Failed to save profile: {}", err)),
            }
            return;
        }
    };

    let previous_name = replaces.as_deref().unwrap_or(&profile.name);
    let edited_active = session
        .active_profile
        .as_ref()
        .is_some_and(|active| active.name == previous_name);
    if edited_active || (replaces.is_none() && profile.is_default) {
        let stored = profiles.iter().find(|p| p.name == profile.name).cloned();
        session.active_profile = Some(stored.unwrap_or(profile));
    }
    session.set_profiles(profiles);

    if matches!(&session.screen, Screen::ProfileWizard(wizard) if wizard.saving) {
        session.screen = Screen::ManageProfiles(ManageState::default());
    }
}

fn on_profile_deleted(session: &mut Session, name: &str, result: Result<Vec<Profile>, String>) {
    let profiles = match result {
        Ok(profiles) => profiles,
        Err(err) => {
            let message = format!("Failed to delete profile: {}", err);
            match &mut session.screen {
                Screen::ManageProfiles(state) => state.error = Some(message),
                _ => session.notice = Some(message),
            }
            return;
        }
    };

    session.set_profiles(profiles);
    if session
        .active_profile
        .as_ref()
        .is_some_and(|active| active.name == name)
    {
        session.active_profile = session.default_profile();
    }

    let rows = session.profiles.len() + 2;
    if let Screen::ManageProfiles(state) = &mut session.screen {
        state.list.clamp(rows);
        state.error = None;
    }
}

fn on_default_changed(session: &mut Session, name: &str, result: Result<Vec<Profile>, String>) {
    match result {
        Ok(profiles) => {
            session.set_profiles(profiles);
            session.active_profile = session
                .default_profile()
                .or_else(|| session.profiles.iter().find(|p| p.name == name).cloned());
        }
        Err(err) => {
            let message = format!("Failed to set default profile: {}", err);
            match &mut session.screen {
                Screen::ManageProfiles(state) => state.error = Some(message),
                _ => session.notice = Some(message),
            }
        }
    }
}
