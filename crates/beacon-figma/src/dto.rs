//! Wire shapes of the Figma REST responses we read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use beacon_types::{CurrentUser, FileMetadata, FileVersion, RemoteFile, RemoteProject};

/// Ids arrive as strings on some endpoints and as numbers on others.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct MeResponse {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    #[serde(default)]
    handle: String,
    #[serde(default)]
    email: String,
}

impl From<MeResponse> for CurrentUser {
    fn from(me: MeResponse) -> Self {
        CurrentUser {
            id: me.id,
            handle: me.handle,
            email: me.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectsResponse {
    #[serde(default)]
    pub projects: Vec<ProjectDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectDto {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    name: String,
}

impl From<ProjectDto> for RemoteProject {
    fn from(dto: ProjectDto) -> Self {
        RemoteProject {
            id: dto.id,
            name: dto.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectFilesResponse {
    #[serde(default)]
    pub files: Vec<FileDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileDto {
    pub key: String,
    pub name: String,
}

impl FileDto {
    pub fn into_remote(self, project_id: &str) -> RemoteFile {
        RemoteFile {
            key: self.key,
            name: self.name,
            project_id: project_id.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileResponse {
    name: String,
    #[serde(rename = "lastModified")]
    last_modified: DateTime<Utc>,
}

impl From<FileResponse> for FileMetadata {
    fn from(file: FileResponse) -> Self {
        FileMetadata {
            name: file.name,
            last_modified: file.last_modified,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VersionsResponse {
    #[serde(default)]
    pub versions: Vec<VersionDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VersionDto {
    created_at: DateTime<Utc>,
}

impl From<VersionDto> for FileVersion {
    fn from(dto: VersionDto) -> Self {
        FileVersion {
            created_at: dto.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_accepts_number() {
        let parsed: ProjectsResponse =
            serde_json::from_str(r#"{"projects":[{"id":12345,"name":"Web"},{"id":"77","name":"iOS"}]}"#)
                .unwrap();
        let projects: Vec<RemoteProject> = parsed.projects.into_iter().map(Into::into).collect();
        assert_eq!(projects[0].id, "12345");
        assert_eq!(projects[1].id, "77");
    }

    #[test]
    fn test_file_response_reads_last_modified() {
        let parsed: FileResponse = serde_json::from_str(
            r#"{"name":"Tokens","lastModified":"2024-06-01T12:30:00Z","version":"1"}"#,
        )
        .unwrap();
        let meta = FileMetadata::from(parsed);
        assert_eq!(meta.name, "Tokens");
        assert_eq!(meta.last_modified.to_rfc3339(), "2024-06-01T12:30:00+00:00");
    }
}
