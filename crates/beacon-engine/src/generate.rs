use beacon_figma::{Gateway, GatewayError};
use beacon_types::{ActivityReport, FileActivity, Profile, RemoteFile, TimeWindow};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::{Error, Result};

/// Maximum number of files inspected concurrently.
pub const FETCH_CONCURRENCY: usize = 4;

/// Caller-supplied identity for one generation run.
///
/// `user_id` and `user_handle` may be empty; the current-user lookup fills them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user_id: String,
    pub user_handle: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn with_user(mut self, id: impl Into<String>, handle: impl Into<String>) -> Self {
        self.user_id = id.into();
        self.user_handle = handle.into();
        self
    }
}

struct PendingFile {
    project_name: String,
    remote: RemoteFile,
}

/// Collect file activity for every project in `profile` within `window`.
///
/// The credential check runs before any listing, so a bad token or unreachable
/// API fails the whole run. After that, a project whose listing fails or a file
/// whose metadata or history cannot be read is skipped and counted in
/// [`ActivityReport::skipped_files`].
pub async fn generate<G: Gateway + ?Sized>(
    gateway: &G,
    profile: &Profile,
    window: TimeWindow,
    credentials: &Credentials,
    generated_at: DateTime<Utc>,
) -> Result<ActivityReport> {
    let token = credentials.token.trim();
    if token.is_empty() {
        return Err(Error::MissingToken);
    }
    if profile.selected_projects.is_empty() {
        return Err(Error::NoProjects(profile.name.clone()));
    }

    let user = gateway.current_user(token).await?;
    let user_id = non_empty_or(&credentials.user_id, user.id);
    let user_handle = non_empty_or(&credentials.user_handle, user.handle);

    info!(
        profile = %profile.name,
        projects = profile.project_count(),
        start = %window.start,
        end = %window.end,
        "generating activity report"
    );

    let mut skipped = 0;
    let mut pending = Vec::new();
    for project in &profile.selected_projects {
        match gateway.project_files(token, &project.id).await {
            Ok(files) => {
                debug!(project_id = %project.id, files = files.len(), "listed project files");
                pending.extend(files.into_iter().map(|remote| PendingFile {
                    project_name: project.name.clone(),
                    remote,
                }));
            }
            Err(err) => {
                warn!(project_id = %project.id, error = %err, "skipping project");
                skipped += 1;
            }
        }
    }

    let results: Vec<_> = stream::iter(pending)
        .map(|file| inspect_file(gateway, token, &window, file))
        .buffered(FETCH_CONCURRENCY)
        .collect()
        .await;

    let mut files = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(activity) => files.push(activity),
            Err((file_key, err)) => {
                warn!(%file_key, error = %err, "skipping file");
                skipped += 1;
            }
        }
    }

    let report = ActivityReport::new(window, user_id, user_handle, files, skipped, generated_at);
    info!(
        total_files = report.total_files,
        total_changes = report.total_changes,
        skipped = report.skipped_files,
        "activity report ready"
    );
    Ok(report)
}

async fn inspect_file<G: Gateway + ?Sized>(
    gateway: &G,
    token: &str,
    window: &TimeWindow,
    file: PendingFile,
) -> std::result::Result<FileActivity, (String, GatewayError)> {
    let key = file.remote.key;
    let (metadata, versions) = futures::try_join!(
        gateway.file_metadata(token, &key),
        gateway.file_versions(token, &key)
    )
    .map_err(|err| (key.clone(), err))?;

    let created_at = versions.iter().map(|v| v.created_at).min();
    let file_name = if metadata.name.is_empty() {
        file.remote.name
    } else {
        metadata.name
    };

    Ok(FileActivity {
        modified_in_window: window.contains(&metadata.last_modified),
        created_in_window: created_at.is_some_and(|created| window.contains(&created)),
        file_key: key,
        file_name,
        project_name: file.project_name,
        last_modified: metadata.last_modified,
        created_at,
    })
}

fn non_empty_or(configured: &str, fetched: String) -> String {
    if configured.is_empty() {
        fetched
    } else {
        configured.to_string()
    }
}
