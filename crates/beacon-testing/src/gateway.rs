//! Scripted gateway for engine and controller tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use beacon_figma::{Gateway, GatewayError, Result};
use beacon_types::{CurrentUser, FileMetadata, FileVersion, RemoteFile, RemoteProject};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
struct FakeFile {
    remote: RemoteFile,
    metadata: FileMetadata,
    versions: Vec<FileVersion>,
}

/// In-memory [`Gateway`] with per-entity failure injection.
///
/// Every call is recorded so tests can assert which endpoints were hit.
#[derive(Debug, Default)]
pub struct FakeGateway {
    user: Option<CurrentUser>,
    unreachable: bool,
    team_projects: HashMap<String, Vec<RemoteProject>>,
    files: Vec<FakeFile>,
    failing_projects: HashSet<String>,
    failing_metadata: HashSet<String>,
    failing_versions: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default().with_user("1001", "ada", "ada@example.com")
    }

    pub fn with_user(mut self, id: &str, handle: &str, email: &str) -> Self {
        self.user = Some(CurrentUser {
            id: id.to_string(),
            handle: handle.to_string(),
            email: email.to_string(),
        });
        self
    }

    /// Every call fails with a transport error.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn with_project(mut self, team_id: &str, id: &str, name: &str) -> Self {
        self.team_projects
            .entry(team_id.to_string())
            .or_default()
            .push(RemoteProject {
                id: id.to_string(),
                name: name.to_string(),
            });
        self
    }

    /// Add a file; `versions` are given newest first, like the API returns them.
    pub fn with_file(
        mut self,
        project_id: &str,
        key: &str,
        name: &str,
        last_modified: DateTime<Utc>,
        versions: &[DateTime<Utc>],
    ) -> Self {
        self.files.push(FakeFile {
            remote: RemoteFile {
                key: key.to_string(),
                name: name.to_string(),
                project_id: project_id.to_string(),
            },
            metadata: FileMetadata {
                name: name.to_string(),
                last_modified,
            },
            versions: versions
                .iter()
                .map(|created_at| FileVersion {
                    created_at: *created_at,
                })
                .collect(),
        });
        self
    }

    pub fn failing_project(mut self, project_id: &str) -> Self {
        self.failing_projects.insert(project_id.to_string());
        self
    }

    pub fn failing_metadata(mut self, key: &str) -> Self {
        self.failing_metadata.insert(key.to_string());
        self
    }

    pub fn failing_versions(mut self, key: &str) -> Self {
        self.failing_versions.insert(key.to_string());
        self
    }

    /// Recorded calls as `endpoint:argument` strings, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        let prefix = format!("{}:", endpoint);
        self.calls()
            .iter()
            .filter(|c| c.starts_with(&prefix))
            .count()
    }

    fn record(&self, endpoint: &str, arg: &str) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("{}:{}", endpoint, arg));
        }
        if self.unreachable {
            return Err(GatewayError::Transport("connection refused".to_string()));
        }
        Ok(())
    }

    fn file(&self, key: &str) -> Result<&FakeFile> {
        self.files
            .iter()
            .find(|f| f.remote.key == key)
            .ok_or_else(|| GatewayError::Status {
                status: 404,
                body: format!("file {} not found", key),
            })
    }
}

fn check_token(token: &str) -> Result<()> {
    if token.trim().is_empty() {
        return Err(GatewayError::MissingToken);
    }
    if token == "bad-token" {
        return Err(GatewayError::Status {
            status: 403,
            body: "Invalid token".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn current_user(&self, token: &str) -> Result<CurrentUser> {
        check_token(token)?;
        self.record("me", "")?;
        self.user.clone().ok_or_else(|| GatewayError::Status {
            status: 404,
            body: "no user".to_string(),
        })
    }

    async fn team_projects(&self, token: &str, team_id: &str) -> Result<Vec<RemoteProject>> {
        check_token(token)?;
        if team_id.is_empty() {
            return Err(GatewayError::MissingTeam);
        }
        self.record("team_projects", team_id)?;
        self.team_projects
            .get(team_id)
            .cloned()
            .ok_or_else(|| GatewayError::Status {
                status: 404,
                body: format!("team {} not found", team_id),
            })
    }

    async fn project_files(&self, token: &str, project_id: &str) -> Result<Vec<RemoteFile>> {
        check_token(token)?;
        self.record("project_files", project_id)?;
        if self.failing_projects.contains(project_id) {
            return Err(GatewayError::Status {
                status: 500,
                body: "project listing failed".to_string(),
            });
        }
        Ok(self
            .files
            .iter()
            .filter(|f| f.remote.project_id == project_id)
            .map(|f| f.remote.clone())
            .collect())
    }

    async fn file_metadata(&self, token: &str, file_key: &str) -> Result<FileMetadata> {
        check_token(token)?;
        self.record("file_metadata", file_key)?;
        if self.failing_metadata.contains(file_key) {
            return Err(GatewayError::Transport("timed out".to_string()));
        }
        Ok(self.file(file_key)?.metadata.clone())
    }

    async fn file_versions(&self, token: &str, file_key: &str) -> Result<Vec<FileVersion>> {
        check_token(token)?;
        self.record("file_versions", file_key)?;
        if self.failing_versions.contains(file_key) {
            return Err(GatewayError::Status {
                status: 500,
                body: "versions unavailable".to_string(),
            });
        }
        Ok(self.file(file_key)?.versions.clone())
    }
}
