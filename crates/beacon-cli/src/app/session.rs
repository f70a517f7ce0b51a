use std::path::PathBuf;

use beacon_types::{ActivityReport, Config, OutputFormat, Profile, TimeMode};

use super::event::Ticket;
use super::list::ListCursor;
use super::menu::{MenuEntry, derive_menu, first_selectable, settle};
use super::text_input::TextInput;
use super::wizard::Wizard;

pub const SPINNER: [&str; 4] = ["⬖", "⬗", "⬘", "⬙"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupRow {
    Token,
    UserId,
    TeamId,
    Format,
    Back,
}

impl SetupRow {
    pub const ALL: [SetupRow; 5] = [
        SetupRow::Token,
        SetupRow::UserId,
        SetupRow::TeamId,
        SetupRow::Format,
        SetupRow::Back,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SetupRow::Token => "Set Figma Token",
            SetupRow::UserId => "Set User ID",
            SetupRow::TeamId => "Set Team ID",
            SetupRow::Format => "Output Format",
            SetupRow::Back => "← Back",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetupState {
    pub cursor: usize,
    /// The row being edited and its buffer; only text rows are editable.
    pub editing: Option<(SetupRow, TextInput)>,
}

impl SetupState {
    pub fn row(&self) -> SetupRow {
        SetupRow::ALL[self.cursor.min(SetupRow::ALL.len() - 1)]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManageState {
    /// Rows: create, one per profile, back.
    pub list: ListCursor,
    pub confirm_delete: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfigState {
    pub profile_index: usize,
    pub mode_index: usize,
    pub error: Option<String>,
}

impl ReportConfigState {
    pub fn mode(&self) -> TimeMode {
        TimeMode::ALL[self.mode_index.min(TimeMode::ALL.len() - 1)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportViewState {
    pub profile_name: String,
    pub format: OutputFormat,
    pub report: Option<ActivityReport>,
    pub content: String,
    pub error: Option<String>,
    pub scroll: u16,
    pub exporting: Option<Ticket>,
    pub export: Option<Result<PathBuf, String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    MainMenu { cursor: usize },
    Setup(SetupState),
    FormatSelection { cursor: usize },
    ManageProfiles(ManageState),
    ProfileWizard(Box<Wizard>),
    ProfilePreview { profile: Profile },
    ReportConfig(ReportConfigState),
    ReportGenerating {
        ticket: Ticket,
        profile: Profile,
        mode: TimeMode,
    },
    ReportView(Box<ReportViewState>),
}

impl Default for Screen {
    fn default() -> Self {
        Screen::MainMenu { cursor: 0 }
    }
}

/// Everything the interactive session knows. Only [`dispatch`](super::dispatch) mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub config: Config,
    /// Working copy of the stored profiles, sorted by name.
    pub profiles: Vec<Profile>,
    pub active_profile: Option<Profile>,
    pub menu: Vec<MenuEntry>,
    pub screen: Screen,
    pub fetching_user: Option<Ticket>,
    pub user_error: Option<String>,
    /// Persistence failures that are not tied to the current screen.
    pub notice: Option<String>,
    pub spinner_frame: usize,
    pub should_quit: bool,
    next_ticket: Ticket,
}

impl Session {
    /// Start on the main menu with the default profile active.
    pub fn new(config: Config, profiles: Vec<Profile>) -> Self {
        let menu = derive_menu(&config, &profiles);
        let cursor = first_selectable(&menu);
        let active_profile = profiles.iter().find(|p| p.is_default).cloned();
        Self {
            config,
            profiles,
            active_profile,
            menu,
            screen: Screen::MainMenu { cursor },
            fetching_user: None,
            user_error: None,
            notice: None,
            spinner_frame: 0,
            should_quit: false,
            next_ticket: 1,
        }
    }

    pub fn status_line(&self) -> String {
        if let Screen::ReportGenerating { profile, .. } = &self.screen {
            let frame = SPINNER[self.spinner_frame % SPINNER.len()];
            return format!("{} Profile: {}", frame, profile.name);
        }
        match &self.active_profile {
            Some(profile) => format!("⬥ Profile: {}", profile.name),
            None => "⬥ No profile selected".to_string(),
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.screen, Screen::ReportGenerating { .. })
    }

    pub(crate) fn issue_ticket(&mut self) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    pub(crate) fn main_menu(&self) -> Screen {
        Screen::MainMenu {
            cursor: first_selectable(&self.menu),
        }
    }

    /// Replace the profile listing and re-derive everything that depends on it.
    pub(crate) fn set_profiles(&mut self, profiles: Vec<Profile>) {
        self.profiles = profiles;
        self.refresh_menu();
    }

    pub(crate) fn refresh_menu(&mut self) {
        self.menu = derive_menu(&self.config, &self.profiles);
        if let Screen::MainMenu { cursor } = &mut self.screen {
            *cursor = settle(&self.menu, *cursor);
        }
    }

    pub(crate) fn default_profile(&self) -> Option<Profile> {
        self.profiles.iter().find(|p| p.is_default).cloned()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default(), Vec::new())
    }
}
