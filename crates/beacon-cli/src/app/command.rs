use std::path::PathBuf;

use beacon_engine::Credentials;
use beacon_types::{Config, OutputFormat, Profile, TimeMode};

use super::event::Ticket;

/// Side effects requested by the controller. Each one completes with exactly one [`Event`](super::Event).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchUser {
        ticket: Ticket,
        token: String,
    },
    FetchProjects {
        ticket: Ticket,
        token: String,
        team_id: String,
    },
    /// Runs the report and schedules the first spinner tick.
    StartReport {
        ticket: Ticket,
        profile: Profile,
        mode: TimeMode,
        credentials: Credentials,
        format: OutputFormat,
    },
    Tick {
        ticket: Ticket,
    },
    ExportReport {
        ticket: Ticket,
        dir: PathBuf,
        profile_name: String,
        content: String,
        format: OutputFormat,
    },
    SaveConfig(Config),
    SaveProfile {
        profile: Profile,
        replaces: Option<String>,
    },
    DeleteProfile {
        name: String,
    },
    SetDefault {
        name: String,
    },
}

impl Command {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::FetchUser { .. } => "fetch_user",
            Command::FetchProjects { .. } => "fetch_projects",
            Command::StartReport { .. } => "start_report",
            Command::Tick { .. } => "tick",
            Command::ExportReport { .. } => "export_report",
            Command::SaveConfig(_) => "save_config",
            Command::SaveProfile { .. } => "save_profile",
            Command::DeleteProfile { .. } => "delete_profile",
            Command::SetDefault { .. } => "set_default",
        }
    }
}
