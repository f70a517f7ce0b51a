use async_trait::async_trait;
use beacon_types::{CurrentUser, FileMetadata, FileVersion, RemoteFile, RemoteProject};

use crate::Result;

/// Authenticated read access to the remote design-file API.
///
/// Every call takes the caller's token; implementations keep no credentials.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn current_user(&self, token: &str) -> Result<CurrentUser>;

    async fn team_projects(&self, token: &str, team_id: &str) -> Result<Vec<RemoteProject>>;

    async fn project_files(&self, token: &str, project_id: &str) -> Result<Vec<RemoteFile>>;

    async fn file_metadata(&self, token: &str, file_key: &str) -> Result<FileMetadata>;

    /// Version history, newest first.
    async fn file_versions(&self, token: &str, file_key: &str) -> Result<Vec<FileVersion>>;
}
