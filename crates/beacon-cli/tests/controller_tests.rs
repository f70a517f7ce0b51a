use std::path::PathBuf;

use beacon_testing::fixtures::{fixed, profile, utc};
use beacon_types::{
    ActivityReport, Config, CurrentUser, OutputFormat, Profile, RemoteProject, TimeMode,
    TimeWindow,
};
use figma_beacon::app::{
    Command, Event, GeneratedReport, Key, Screen, Session, WizardStep, dispatch,
};

fn configured() -> Config {
    Config {
        figma_token: "tok".to_string(),
        team_id: "team".to_string(),
        ..Config::default()
    }
}

fn default_profile(name: &str) -> Profile {
    let mut p = profile(name, "team", &[("p1", "Web")]);
    p.is_default = true;
    p
}

/// Feed keys, asserting none of them produced a command.
fn keys(mut session: Session, keys: &[Key]) -> Session {
    for key in keys {
        let (next, command) = dispatch(session, Event::Input(*key));
        assert_eq!(command, None, "unexpected command after {:?}", key);
        session = next;
    }
    session
}

fn press(session: Session, key: Key) -> (Session, Option<Command>) {
    dispatch(session, Event::Input(key))
}

fn typed(text: &str) -> Vec<Key> {
    text.chars().map(Key::Char).collect()
}

fn remote(id: &str, name: &str) -> RemoteProject {
    RemoteProject {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn sample_report() -> ActivityReport {
    let window = TimeWindow {
        start: fixed("2024-05-25T00:00:00Z"),
        end: fixed("2024-06-01T00:00:00Z"),
        end_inclusive: true,
    };
    ActivityReport::new(window, "1001", "ada", Vec::new(), 0, utc("2024-06-01T00:00:00Z"))
}

/// Main menu -> Manage Profiles -> create wizard, then submit the team id.
fn wizard_fetching(session: Session) -> (Session, u64) {
    let session = keys(session, &[Key::Down, Key::Enter, Key::Enter, Key::Enter]);
    let (session, command) = press(session, Key::Enter);
    let Some(Command::FetchProjects {
        ticket,
        token,
        team_id,
    }) = command
    else {
        panic!("expected project fetch, got {:?}", command);
    };
    assert_eq!(token, "tok");
    assert_eq!(team_id, "team");
    (session, ticket)
}

fn wizard(session: &Session) -> &figma_beacon::app::Wizard {
    match &session.screen {
        Screen::ProfileWizard(wizard) => wizard,
        other => panic!("expected wizard, got {:?}", other),
    }
}

#[test]
fn continuing_without_projects_shows_inline_error() {
    let (session, ticket) = wizard_fetching(Session::new(configured(), Vec::new()));
    let (session, _) = dispatch(
        session,
        Event::ProjectsFetched {
            ticket,
            result: Ok(vec![remote("p1", "Web"), remote("p2", "Mobile")]),
        },
    );

    let (session, command) = press(session, Key::Enter);

    assert_eq!(command, None);
    let wizard = wizard(&session);
    assert_eq!(wizard.step, WizardStep::Projects);
    assert!(
        wizard
            .error
            .as_deref()
            .is_some_and(|e| e.contains("select at least one project"))
    );
}

#[test]
fn failed_project_fetch_can_be_retried() {
    let (session, first) = wizard_fetching(Session::new(configured(), Vec::new()));
    let (session, command) = dispatch(
        session,
        Event::ProjectsFetched {
            ticket: first,
            result: Err("connection refused".to_string()),
        },
    );
    assert_eq!(command, None);
    assert_eq!(wizard(&session).error.as_deref(), Some("connection refused"));

    let (session, command) = press(session, Key::Enter);
    let Some(Command::FetchProjects {
        ticket: second,
        team_id,
        ..
    }) = command
    else {
        panic!("expected project fetch, got {:?}", command);
    };
    assert_ne!(second, first);
    assert_eq!(team_id, "team");
    assert!(wizard(&session).is_busy());

    let (session, _) = dispatch(
        session,
        Event::ProjectsFetched {
            ticket: second,
            result: Ok(vec![remote("p1", "Web")]),
        },
    );
    assert_eq!(wizard(&session).projects.len(), 1);

    let (_, command) = press(session, Key::Char('r'));
    assert!(matches!(command, Some(Command::FetchProjects { ticket, .. }) if ticket != second));
}

#[test]
fn wizard_saves_first_profile_as_default() {
    let (session, ticket) = wizard_fetching(Session::new(configured(), Vec::new()));
    let (session, _) = dispatch(
        session,
        Event::ProjectsFetched {
            ticket,
            result: Ok(vec![remote("p1", "Web"), remote("p2", "Mobile")]),
        },
    );
    let mut steps = vec![Key::Down, Key::Char(' '), Key::Enter, Key::Enter];
    steps.extend(typed("mobile"));
    let session = keys(session, &steps);

    let (session, command) = press(session, Key::Enter);
    let Some(Command::SaveProfile { profile, replaces }) = command else {
        panic!("expected save, got {:?}", command);
    };
    assert!(profile.is_default);
    assert_eq!(profile.selected_projects.len(), 1);
    assert_eq!(profile.selected_projects[0].name, "Mobile");
    assert_eq!(replaces, None);

    let (session, command) = dispatch(
        session,
        Event::ProfileSaved {
            profile: profile.clone(),
            replaces: None,
            result: Ok(vec![profile]),
        },
    );
    assert_eq!(command, None);
    assert!(matches!(session.screen, Screen::ManageProfiles(_)));
    assert_eq!(session.status_line(), "⬥ Profile: mobile");
    assert_eq!(session.profiles.len(), 1);
}

#[test]
fn failed_project_fetch_keeps_wizard_on_step() {
    let (session, ticket) = wizard_fetching(Session::new(configured(), Vec::new()));
    let (session, _) = dispatch(
        session,
        Event::ProjectsFetched {
            ticket,
            result: Err("API error: Not found".to_string()),
        },
    );

    let wizard = wizard(&session);
    assert_eq!(wizard.step, WizardStep::Projects);
    assert_eq!(wizard.error.as_deref(), Some("API error: Not found"));
}

#[test]
fn cancelling_wizard_drops_late_projects() {
    let (session, ticket) = wizard_fetching(Session::new(configured(), Vec::new()));
    let session = keys(session, &[Key::Esc]);
    assert!(matches!(session.screen, Screen::ManageProfiles(_)));

    let (session, command) = dispatch(
        session,
        Event::ProjectsFetched {
            ticket,
            result: Ok(vec![remote("p1", "Web")]),
        },
    );
    assert_eq!(command, None);
    assert!(matches!(session.screen, Screen::ManageProfiles(_)));
}

#[test]
fn deleting_the_only_profile_clears_active_profile() {
    let session = Session::new(configured(), vec![default_profile("web")]);
    assert_eq!(session.status_line(), "⬥ Profile: web");

    let session = keys(session, &[Key::Down, Key::Enter, Key::Down, Key::Backspace]);
    let Screen::ManageProfiles(state) = &session.screen else {
        panic!("expected manage screen");
    };
    assert_eq!(state.confirm_delete.as_deref(), Some("web"));

    let (session, command) = press(session, Key::Char('y'));
    assert_eq!(
        command,
        Some(Command::DeleteProfile {
            name: "web".to_string()
        })
    );

    let (session, _) = dispatch(
        session,
        Event::ProfileDeleted {
            name: "web".to_string(),
            result: Ok(Vec::new()),
        },
    );
    assert_eq!(session.active_profile, None);
    assert_eq!(session.status_line(), "⬥ No profile selected");
    assert!(session.profiles.is_empty());
    let Screen::ManageProfiles(state) = &session.screen else {
        panic!("expected manage screen");
    };
    assert_eq!(state.list.cursor, 1);
}

#[test]
fn deleting_active_profile_follows_promoted_default() {
    let session = Session::new(
        configured(),
        vec![profile("app", "team", &[]), default_profile("web")],
    );
    let session = keys(session, &[Key::Down, Key::Enter, Key::Down, Key::Down]);
    let session = keys(session, &[Key::Delete]);
    let (session, _) = press(session, Key::Char('Y'));

    let mut promoted = profile("app", "team", &[]);
    promoted.is_default = true;
    let (session, _) = dispatch(
        session,
        Event::ProfileDeleted {
            name: "web".to_string(),
            result: Ok(vec![promoted]),
        },
    );
    assert_eq!(session.status_line(), "⬥ Profile: app");
}

#[test]
fn any_other_key_aborts_delete() {
    let session = Session::new(configured(), vec![default_profile("web")]);
    let session = keys(
        session,
        &[Key::Down, Key::Enter, Key::Down, Key::Backspace, Key::Char('x')],
    );
    let Screen::ManageProfiles(state) = &session.screen else {
        panic!("expected manage screen");
    };
    assert_eq!(state.confirm_delete, None);
    assert_eq!(session.profiles.len(), 1);
}

#[test]
fn renaming_active_profile_in_edit_mode() {
    let original = default_profile("web");
    let session = Session::new(configured(), vec![original.clone()]);
    let session = keys(session, &[Key::Down, Key::Enter, Key::Down, Key::Enter]);
    assert!(matches!(session.screen, Screen::ProfilePreview { .. }));

    let session = keys(session, &[Key::Char('e'), Key::Enter]);
    let (session, command) = press(session, Key::Enter);
    let Some(Command::FetchProjects { ticket, .. }) = command else {
        panic!("expected fetch, got {:?}", command);
    };
    let (session, _) = dispatch(
        session,
        Event::ProjectsFetched {
            ticket,
            result: Ok(vec![remote("p1", "Web")]),
        },
    );
    let mut steps = vec![Key::Enter, Key::Enter];
    steps.extend([Key::Backspace; 3]);
    steps.extend(typed("website"));
    let session = keys(session, &steps);

    let (session, command) = press(session, Key::Enter);
    let Some(Command::SaveProfile { profile, replaces }) = command else {
        panic!("expected save, got {:?}", command);
    };
    assert_eq!(profile.name, "website");
    assert_eq!(profile.created_at, original.created_at);
    assert!(profile.is_default);
    assert_eq!(replaces.as_deref(), Some("web"));

    let (session, _) = dispatch(
        session,
        Event::ProfileSaved {
            profile: profile.clone(),
            replaces,
            result: Ok(vec![profile]),
        },
    );
    assert_eq!(session.status_line(), "⬥ Profile: website");
    assert!(matches!(session.screen, Screen::ManageProfiles(_)));
}

#[test]
fn failed_save_stays_in_wizard() {
    let (session, ticket) = wizard_fetching(Session::new(configured(), Vec::new()));
    let (session, _) = dispatch(
        session,
        Event::ProjectsFetched {
            ticket,
            result: Ok(vec![remote("p1", "Web")]),
        },
    );
    let mut steps = vec![Key::Char(' '), Key::Enter, Key::Enter];
    steps.extend(typed("web"));
    let session = keys(session, &steps);
    let (session, command) = press(session, Key::Enter);
    let Some(Command::SaveProfile { profile, .. }) = command else {
        panic!("expected save");
    };

    let (session, _) = dispatch(
        session,
        Event::ProfileSaved {
            profile,
            replaces: None,
            result: Err("IO error: permission denied".to_string()),
        },
    );
    let wizard = wizard(&session);
    assert_eq!(wizard.step, WizardStep::Name);
    assert!(!wizard.saving);
    assert_eq!(
        wizard.error.as_deref(),
        Some("Failed to save profile: IO error: permission denied")
    );
}

#[test]
fn report_config_without_profiles_reports_error() {
    let session = Session::new(configured(), Vec::new());
    let session = keys(session, &[Key::Enter]);
    let (session, command) = press(session, Key::Enter);

    assert_eq!(command, None);
    let Screen::ReportConfig(state) = &session.screen else {
        panic!("expected report config");
    };
    assert_eq!(
        state.error.as_deref(),
        Some("No profiles available. Please create a profile first.")
    );
}

fn start_report(session: Session) -> (Session, u64) {
    let session = keys(session, &[Key::Enter, Key::Down, Key::Down]);
    let (session, command) = press(session, Key::Enter);
    let Some(Command::StartReport {
        ticket,
        profile,
        mode,
        credentials,
        format,
    }) = command
    else {
        panic!("expected report start, got {:?}", command);
    };
    assert_eq!(profile.name, "web");
    assert_eq!(mode, TimeMode::MonthToDate);
    assert_eq!(credentials.token, "tok");
    assert_eq!(format, OutputFormat::Markdown);
    (session, ticket)
}

#[test]
fn report_flow_generates_then_exports() {
    let session = Session::new(configured(), vec![default_profile("web")]);
    let (session, ticket) = start_report(session);
    assert!(session.is_generating());

    let (session, command) = dispatch(session, Event::Tick { ticket });
    assert_eq!(command, Some(Command::Tick { ticket }));
    assert_eq!(session.status_line(), "⬗ Profile: web");

    let (session, command) = dispatch(
        session,
        Event::ReportGenerated {
            ticket,
            result: Ok(GeneratedReport {
                report: sample_report(),
                content: "# Status Report\n".to_string(),
            }),
        },
    );
    let Some(Command::ExportReport {
        ticket: export_ticket,
        dir,
        profile_name,
        content,
        format,
    }) = command
    else {
        panic!("expected export, got {:?}", command);
    };
    assert_eq!(dir, PathBuf::from("reports"));
    assert_eq!(profile_name, "web");
    assert_eq!(content, "# Status Report\n");
    assert_eq!(format, OutputFormat::Markdown);
    assert_eq!(session.status_line(), "⬥ Profile: web");

    let (session, command) = dispatch(session, Event::Tick { ticket });
    assert_eq!(command, None);

    let saved = PathBuf::from("reports/web-2024-06-01.md");
    let (session, _) = dispatch(
        session,
        Event::ReportExported {
            ticket: export_ticket,
            result: Ok(saved.clone()),
        },
    );
    let Screen::ReportView(view) = &session.screen else {
        panic!("expected report view");
    };
    assert_eq!(view.export, Some(Ok(saved)));
    assert_eq!(view.exporting, None);

    let (_, command) = press(session, Key::Char('s'));
    assert!(matches!(command, Some(Command::ExportReport { .. })));
}

#[test]
fn report_failure_is_shown_in_view() {
    let session = Session::new(configured(), vec![default_profile("web")]);
    let (session, ticket) = start_report(session);

    let (session, command) = dispatch(
        session,
        Event::ReportGenerated {
            ticket,
            result: Err("Could not reach Figma: API error: Invalid token".to_string()),
        },
    );
    assert_eq!(command, None);
    let Screen::ReportView(view) = &session.screen else {
        panic!("expected report view");
    };
    assert_eq!(
        view.error.as_deref(),
        Some("Could not reach Figma: API error: Invalid token")
    );

    let (_, command) = press(session, Key::Char('s'));
    assert_eq!(command, None);
}

#[test]
fn escaping_generation_ignores_late_result() {
    let session = Session::new(configured(), vec![default_profile("web")]);
    let (session, ticket) = start_report(session);
    let session = keys(session, &[Key::Esc]);
    assert!(matches!(session.screen, Screen::MainMenu { cursor: 1 }));

    let (session, command) = dispatch(session, Event::Tick { ticket });
    assert_eq!(command, None);

    let (session, command) = dispatch(
        session,
        Event::ReportGenerated {
            ticket,
            result: Ok(GeneratedReport {
                report: sample_report(),
                content: String::new(),
            }),
        },
    );
    assert_eq!(command, None);
    assert!(matches!(session.screen, Screen::MainMenu { .. }));
}

#[test]
fn stale_result_from_earlier_run_is_ignored() {
    let session = Session::new(configured(), vec![default_profile("web")]);
    let (session, first) = start_report(session);
    let session = keys(session, &[Key::Esc]);
    let (session, second) = start_report(session);
    assert_ne!(first, second);

    let (session, command) = dispatch(
        session,
        Event::ReportGenerated {
            ticket: first,
            result: Err("late".to_string()),
        },
    );
    assert_eq!(command, None);
    assert!(session.is_generating());
}

#[test]
fn tick_from_abandoned_run_does_not_rearm() {
    let session = Session::new(configured(), vec![default_profile("web")]);
    let (session, first) = start_report(session);
    let session = keys(session, &[Key::Esc]);
    let (session, second) = start_report(session);
    let frame = session.spinner_frame;

    let (session, command) = dispatch(session, Event::Tick { ticket: first });
    assert_eq!(command, None);
    assert_eq!(session.spinner_frame, frame);

    let (session, command) = dispatch(session, Event::Tick { ticket: second });
    assert_eq!(command, Some(Command::Tick { ticket: second }));
    assert_eq!(session.spinner_frame, frame.wrapping_add(1));
}

#[test]
fn setup_token_edit_persists_config() {
    let session = Session::new(Config::default(), Vec::new());
    let mut steps = vec![Key::Down, Key::Down, Key::Enter, Key::Enter];
    steps.extend(typed("figd_123"));
    let session = keys(session, &steps);

    let (session, command) = press(session, Key::Enter);
    let Some(Command::SaveConfig(config)) = command else {
        panic!("expected config save, got {:?}", command);
    };
    assert_eq!(config.figma_token, "figd_123");
    assert_eq!(session.config.figma_token, "figd_123");

    let session = keys(session, &[Key::Esc]);
    let report = session.menu[1].item().unwrap();
    assert_eq!(report.warning, None);
}

#[test]
fn setup_escape_discards_edit() {
    let session = Session::new(configured(), Vec::new());
    let mut steps = vec![Key::Down, Key::Down, Key::Enter, Key::Enter];
    steps.extend(typed("changed"));
    steps.push(Key::Esc);
    let session = keys(session, &steps);

    assert_eq!(session.config.figma_token, "tok");
    assert!(matches!(session.screen, Screen::Setup(_)));
}

#[test]
fn gathering_user_fills_config() {
    let session = Session::new(configured(), Vec::new());
    let session = keys(session, &[Key::Down, Key::Down, Key::Enter, Key::Down]);
    let (session, command) = press(session, Key::Enter);
    let Some(Command::FetchUser { ticket, token }) = command else {
        panic!("expected user fetch, got {:?}", command);
    };
    assert_eq!(token, "tok");

    let (session, command) = press(session, Key::Enter);
    assert_eq!(command, None, "second fetch while one is pending");

    let (session, command) = dispatch(
        session,
        Event::UserFetched {
            ticket,
            result: Ok(CurrentUser {
                id: "1001".to_string(),
                handle: "ada".to_string(),
                email: "ada@example.com".to_string(),
            }),
        },
    );
    let Some(Command::SaveConfig(config)) = command else {
        panic!("expected config save");
    };
    assert_eq!(config.user_id, "1001");
    assert_eq!(config.user_handle, "ada");
    assert_eq!(session.fetching_user, None);
}

#[test]
fn user_fetch_error_is_kept_for_display() {
    let session = Session::new(Config::default(), Vec::new());
    let session = keys(session, &[Key::Down, Key::Down, Key::Enter, Key::Down]);
    let (session, command) = press(session, Key::Enter);
    let Some(Command::FetchUser { ticket, .. }) = command else {
        panic!("expected user fetch");
    };

    let (session, command) = dispatch(
        session,
        Event::UserFetched {
            ticket,
            result: Err("No Figma token set".to_string()),
        },
    );
    assert_eq!(command, None);
    assert_eq!(session.user_error.as_deref(), Some("No Figma token set"));
    assert_eq!(session.config.user_id, "");
}

#[test]
fn choosing_output_format() {
    let session = Session::new(configured(), Vec::new());
    let session = keys(
        session,
        &[Key::Down, Key::Down, Key::Enter, Key::Down, Key::Down, Key::Down, Key::Enter],
    );
    assert_eq!(session.screen, Screen::FormatSelection { cursor: 0 });

    let session = keys(session, &[Key::Down]);
    let (session, command) = press(session, Key::Enter);
    let Some(Command::SaveConfig(config)) = command else {
        panic!("expected config save");
    };
    assert_eq!(config.output_format, OutputFormat::Text);
    assert!(matches!(&session.screen, Screen::Setup(state) if state.cursor == 3));
}

#[test]
fn activating_profile_from_menu() {
    let mut web = default_profile("web");
    web.created_at = utc("2024-05-02T00:00:00Z");
    let app = profile("app", "team", &[]);
    let session = Session::new(configured(), vec![app.clone(), web.clone()]);

    // Menu: spacer, report, manage, web (newest), app
    let session = keys(session, &[Key::Down, Key::Down, Key::Down]);
    let (session, command) = press(session, Key::Enter);
    assert_eq!(
        command,
        Some(Command::SetDefault {
            name: "app".to_string()
        })
    );

    let mut app_default = app;
    app_default.is_default = true;
    web.is_default = false;
    let (session, _) = dispatch(
        session,
        Event::DefaultChanged {
            name: "app".to_string(),
            result: Ok(vec![app_default, web]),
        },
    );
    assert_eq!(session.status_line(), "⬥ Profile: app");
    assert!(matches!(session.screen, Screen::MainMenu { cursor: 4 }));
}

#[test]
fn menu_navigation_skips_spacers() {
    let session = Session::new(configured(), Vec::new());
    let session = keys(session, &[Key::Down, Key::Down]);
    assert_eq!(session.screen, Screen::MainMenu { cursor: 4 });

    let session = keys(session, &[Key::Down, Key::Down]);
    assert_eq!(session.screen, Screen::MainMenu { cursor: 5 });

    let session = keys(session, &[Key::Up, Key::Up, Key::Up, Key::Up]);
    assert_eq!(session.screen, Screen::MainMenu { cursor: 1 });
}

#[test]
fn profile_list_scrolls_by_page() {
    let profiles: Vec<Profile> = (0..15)
        .map(|i| profile(&format!("p{:02}", i), "team", &[]))
        .collect();
    let session = Session::new(configured(), profiles);
    let mut steps = vec![Key::Down, Key::Enter];
    steps.extend([Key::Down; 12]);
    let session = keys(session, &steps);

    let Screen::ManageProfiles(state) = &session.screen else {
        panic!("expected manage screen");
    };
    assert_eq!(state.list.cursor, 12);
    assert_eq!(state.list.offset, 3);
}

#[test]
fn quitting() {
    let session = Session::new(configured(), Vec::new());
    let (session, command) = press(session, Key::Char('q'));
    assert!(session.should_quit);
    assert_eq!(command, None);

    let session = Session::new(configured(), vec![default_profile("web")]);
    let session = keys(session, &[Key::Down, Key::Enter, Key::Enter]);
    let (session, _) = press(session, Key::CtrlC);
    assert!(session.should_quit);
}

#[test]
fn persistence_failure_becomes_notice() {
    let session = Session::new(configured(), Vec::new());
    let (session, _) = dispatch(session, Event::ConfigSaved(Err("disk full".to_string())));
    assert_eq!(
        session.notice.as_deref(),
        Some("Failed to save config: disk full")
    );

    let session = keys(session, &[Key::Down]);
    assert_eq!(session.notice, None);
}
