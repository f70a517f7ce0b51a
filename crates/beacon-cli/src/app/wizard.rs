use std::collections::BTreeSet;

use beacon_core::validate_profile_name;
use beacon_types::{Profile, ProfileProject, RemoteProject};
use chrono::Utc;

use super::event::{Key, Ticket};
use super::list::ListCursor;
use super::text_input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Team,
    Projects,
    Name,
}

impl WizardStep {
    pub fn number(self) -> usize {
        match self {
            WizardStep::Team => 1,
            WizardStep::Projects => 2,
            WizardStep::Name => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Team => "Team",
            WizardStep::Projects => "Projects",
            WizardStep::Name => "Name",
        }
    }
}

/// What the session controller has to do after a wizard keystroke.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutcome {
    Stay,
    Cancel,
    FetchProjects { team_id: String },
    Commit {
        profile: Profile,
        replaces: Option<String>,
    },
}

/// Team -> Projects -> Name. Cancel from any step leaves nothing behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    pub step: WizardStep,
    pub team_id: String,
    pub projects: Vec<RemoteProject>,
    pub selected: BTreeSet<String>,
    pub list: ListCursor,
    pub name: String,
    pub editing: Option<TextInput>,
    pub loading: Option<Ticket>,
    pub saving: bool,
    pub progress: Option<String>,
    pub error: Option<String>,
    /// The stored profile being edited, if any.
    pub original: Option<Profile>,
}

impl Wizard {
    pub fn create(team_id: &str) -> Self {
        Self {
            step: WizardStep::Team,
            team_id: team_id.to_string(),
            projects: Vec::new(),
            selected: BTreeSet::new(),
            list: ListCursor::default(),
            name: String::new(),
            editing: None,
            loading: None,
            saving: false,
            progress: None,
            error: None,
            original: None,
        }
    }

    pub fn edit(profile: &Profile) -> Self {
        Self {
            team_id: profile.team_id.clone(),
            selected: profile
                .selected_projects
                .iter()
                .map(|p| p.id.clone())
                .collect(),
            name: profile.name.clone(),
            original: Some(profile.clone()),
            ..Self::create("")
        }
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.loading.is_some() || self.saving
    }

    pub fn is_selected(&self, project: &RemoteProject) -> bool {
        self.selected.contains(&project.id)
    }

    /// Fetched projects that are currently selected, in listing order.
    pub fn selected_projects(&self) -> Vec<ProfileProject> {
        self.projects
            .iter()
            .filter(|p| self.selected.contains(&p.id))
            .map(|p| ProfileProject {
                id: p.id.clone(),
                name: p.name.clone(),
            })
            .collect()
    }

    pub fn begin_loading(&mut self, ticket: Ticket) {
        self.loading = Some(ticket);
        self.progress = Some("Loading projects...".to_string());
        self.error = None;
    }

    /// Apply a project discovery result. Results for other tickets are ignored.
    pub fn projects_loaded(&mut self, ticket: Ticket, result: Result<Vec<RemoteProject>, String>) {
        if self.loading != Some(ticket) {
            return;
        }
        self.loading = None;
        match result {
            Ok(projects) => {
                self.progress = Some(format!("Found {} projects", projects.len()));
                self.projects = projects;
                self.list.reset();
                self.error = None;
            }
            Err(err) => {
                self.progress = None;
                self.error = Some(err);
            }
        }
    }

    pub fn save_failed(&mut self, err: String) {
        self.saving = false;
        self.error = Some(format!("Failed to save profile: {}", err));
    }

    pub fn on_key(&mut self, key: Key, existing: &[Profile]) -> WizardOutcome {
        if self.saving {
            return WizardOutcome::Stay;
        }
        if self.editing.is_some() {
            return self.on_edit_key(key, existing);
        }

        match key {
            Key::Esc => WizardOutcome::Cancel,
            Key::Up | Key::Char('k') if self.step == WizardStep::Projects => {
                self.list.up();
                WizardOutcome::Stay
            }
            Key::Down | Key::Char('j') if self.step == WizardStep::Projects => {
                self.list.down(self.projects.len());
                WizardOutcome::Stay
            }
            Key::Char(' ') if self.step == WizardStep::Projects => {
                if let Some(project) = self.projects.get(self.list.cursor)
                    && !self.selected.remove(&project.id)
                {
                    self.selected.insert(project.id.clone());
                }
                WizardOutcome::Stay
            }
            Key::Char('r') if self.step == WizardStep::Projects && self.loading.is_none() => {
                self.refetch()
            }
            Key::Enter => self.on_enter(),
            _ => WizardOutcome::Stay,
        }
    }

    fn on_enter(&mut self) -> WizardOutcome {
        match self.step {
            WizardStep::Team => {
                self.editing = Some(TextInput::with_value(&self.team_id));
            }
            WizardStep::Projects => {
                if self.loading.is_some() {
                    return WizardOutcome::Stay;
                }
                if self.projects.is_empty() && self.error.is_some() {
                    return self.refetch();
                }
                if self.selected_projects().is_empty() {
                    self.error = Some("Please select at least one project".to_string());
                    return WizardOutcome::Stay;
                }
                self.step = WizardStep::Name;
                self.error = None;
            }
            WizardStep::Name => {
                self.editing = Some(TextInput::with_value(&self.name));
            }
        }
        WizardOutcome::Stay
    }

    fn on_edit_key(&mut self, key: Key, existing: &[Profile]) -> WizardOutcome {
        let Some(input) = self.editing.as_mut() else {
            return WizardOutcome::Stay;
        };
        match key {
            Key::Esc => {
                self.editing = None;
                WizardOutcome::Stay
            }
            Key::Enter => {
                let value = input.value().trim().to_string();
                self.editing = None;
                match self.step {
                    WizardStep::Team => self.commit_team(value),
                    WizardStep::Name => self.commit_name(value, existing),
                    WizardStep::Projects => WizardOutcome::Stay,
                }
            }
            other => {
                input.handle(other);
                WizardOutcome::Stay
            }
        }
    }

    fn commit_team(&mut self, team_id: String) -> WizardOutcome {
        self.team_id = team_id;
        if self.team_id.is_empty() {
            self.error = Some("Team ID is required".to_string());
            return WizardOutcome::Stay;
        }
        self.step = WizardStep::Projects;
        self.projects.clear();
        self.list.reset();
        self.error = None;
        WizardOutcome::FetchProjects {
            team_id: self.team_id.clone(),
        }
    }

    /// Ask for the team's projects again, keeping the current selection.
    fn refetch(&mut self) -> WizardOutcome {
        self.error = None;
        WizardOutcome::FetchProjects {
            team_id: self.team_id.clone(),
        }
    }

    fn commit_name(&mut self, name: String, existing: &[Profile]) -> WizardOutcome {
        self.name = name;
        if self.name.is_empty() {
            self.error = Some("Profile name is required".to_string());
            return WizardOutcome::Stay;
        }
        if let Err(err) = validate_profile_name(&self.name) {
            self.error = Some(err.to_string());
            return WizardOutcome::Stay;
        }

        let original_name = self.original.as_ref().map(|p| p.name.as_str());
        let keeps_own_name = original_name == Some(self.name.as_str());
        if !keeps_own_name && existing.iter().any(|p| p.name == self.name) {
            self.error = Some("Profile name already exists".to_string());
            return WizardOutcome::Stay;
        }

        let projects = self.selected_projects();
        let profile = match &self.original {
            Some(original) => Profile {
                name: self.name.clone(),
                team_id: self.team_id.clone(),
                selected_projects: projects,
                created_at: original.created_at,
                is_default: original.is_default,
            },
            None => {
                let mut profile =
                    Profile::new(self.name.clone(), self.team_id.clone(), projects, Utc::now());
                profile.is_default = existing.is_empty();
                profile
            }
        };

        self.saving = true;
        self.error = None;
        WizardOutcome::Commit {
            profile,
            replaces: original_name.map(str::to_string),
        }
    }
}
