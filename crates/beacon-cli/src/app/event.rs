use std::path::PathBuf;

use beacon_types::{ActivityReport, CurrentUser, Profile, RemoteProject};

/// Identifies one dispatched request; results carrying an outdated ticket are dropped.
pub type Ticket = u64;

/// Input tokens, already decoupled from the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    Delete,
    Char(char),
    CtrlC,
}

/// A finished report run: the aggregate plus its rendered body.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReport {
    pub report: ActivityReport,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Input(Key),
    UserFetched {
        ticket: Ticket,
        result: Result<CurrentUser, String>,
    },
    ProjectsFetched {
        ticket: Ticket,
        result: Result<Vec<RemoteProject>, String>,
    },
    ReportGenerated {
        ticket: Ticket,
        result: Result<GeneratedReport, String>,
    },
    ReportExported {
        ticket: Ticket,
        result: Result<PathBuf, String>,
    },
    ConfigSaved(Result<(), String>),
    /// Carries the refreshed profile listing on success.
    ProfileSaved {
        profile: Profile,
        replaces: Option<String>,
        result: Result<Vec<Profile>, String>,
    },
    ProfileDeleted {
        name: String,
        result: Result<Vec<Profile>, String>,
    },
    DefaultChanged {
        name: String,
        result: Result<Vec<Profile>, String>,
    },
    /// Spinner tick for the report run identified by `ticket`.
    Tick { ticket: Ticket },
}
