use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use beacon_core::{Store, delete_and_promote, save_replacing};
use beacon_engine::{export_report, format_report, generate, resolve_window_now};
use beacon_figma::Gateway;
use chrono::{Local, Utc};
use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::command::Command;
use super::event::{Event, GeneratedReport, Ticket};

pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Runs controller commands on a tokio runtime and posts one [`Event`] per command.
///
/// Store access happens on blocking threads; network and report work on async tasks.
#[derive(Clone)]
pub struct Executor {
    runtime: Handle,
    gateway: Arc<dyn Gateway>,
    store: Arc<dyn Store>,
    events: Sender<Event>,
}

impl Executor {
    pub fn new(
        runtime: Handle,
        gateway: Arc<dyn Gateway>,
        store: Arc<dyn Store>,
        events: Sender<Event>,
    ) -> Self {
        Self {
            runtime,
            gateway,
            store,
            events,
        }
    }

    pub fn execute(&self, command: Command) {
        debug!(command = command.name(), "executing command");
        match command {
            Command::FetchUser { ticket, token } => {
                let gateway = Arc::clone(&self.gateway);
                self.spawn(async move {
                    let result = gateway
                        .current_user(&token)
                        .await
                        .map_err(|e| e.to_string());
                    Event::UserFetched { ticket, result }
                });
            }
            Command::FetchProjects {
                ticket,
                token,
                team_id,
            } => {
                let gateway = Arc::clone(&self.gateway);
                self.spawn(async move {
                    let result = gateway
                        .team_projects(&token, &team_id)
                        .await
                        .map_err(|e| e.to_string());
                    Event::ProjectsFetched { ticket, result }
                });
            }
            Command::StartReport {
                ticket,
                profile,
                mode,
                credentials,
                format,
            } => {
                let gateway = Arc::clone(&self.gateway);
                self.spawn(async move {
                    let window = resolve_window_now(mode);
                    let result = generate(gateway.as_ref(), &profile, window, &credentials, Utc::now())
                        .await
                        .map(|report| GeneratedReport {
                            content: format_report(&report, format),
                            report,
                        })
                        .map_err(|e| e.to_string());
                    Event::ReportGenerated { ticket, result }
                });
                self.schedule_tick(ticket);
            }
            Command::Tick { ticket } => self.schedule_tick(ticket),
            Command::ExportReport {
                ticket,
                dir,
                profile_name,
                content,
                format,
            } => {
                self.spawn_blocking(move || {
                    let today = Local::now().date_naive();
                    let result = export_report(&dir, &profile_name, &content, format, today)
                        .map_err(|e| e.to_string());
                    Event::ReportExported { ticket, result }
                });
            }
            Command::SaveConfig(config) => {
                let store = Arc::clone(&self.store);
                self.spawn_blocking(move || {
                    Event::ConfigSaved(store.save_config(&config).map_err(|e| e.to_string()))
                });
            }
            Command::SaveProfile { profile, replaces } => {
                let store = Arc::clone(&self.store);
                self.spawn_blocking(move || {
                    let result = save_replacing(store.as_ref(), &profile, replaces.as_deref())
                        .and_then(|()| store.list_profiles())
                        .map_err(|e| e.to_string());
                    Event::ProfileSaved {
                        profile,
                        replaces,
                        result,
                    }
                });
            }
            Command::DeleteProfile { name } => {
                let store = Arc::clone(&self.store);
                self.spawn_blocking(move || {
                    let result = delete_and_promote(store.as_ref(), &name)
                        .and_then(|_| store.list_profiles())
                        .map_err(|e| e.to_string());
                    Event::ProfileDeleted { name, result }
                });
            }
            Command::SetDefault { name } => {
                let store = Arc::clone(&self.store);
                self.spawn_blocking(move || {
                    let result = store
                        .set_default(&name)
                        .and_then(|()| store.list_profiles())
                        .map_err(|e| e.to_string());
                    Event::DefaultChanged { name, result }
                });
            }
        }
    }

    fn schedule_tick(&self, ticket: Ticket) {
        self.spawn(async move {
            tokio::time::sleep(TICK_INTERVAL).await;
            Event::Tick { ticket }
        });
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = Event> + Send + 'static,
    {
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let event = task.await;
            if events.send(event).is_err() {
                warn!("event loop gone, dropping command result");
            }
        });
    }

    fn spawn_blocking<F>(&self, task: F)
    where
        F: FnOnce() -> Event + Send + 'static,
    {
        let events = self.events.clone();
        self.runtime.spawn_blocking(move || {
            if events.send(task()).is_err() {
                warn!("event loop gone, dropping command result");
            }
        });
    }
}
