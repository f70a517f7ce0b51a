use std::time::Duration;

use async_trait::async_trait;
use beacon_types::{CurrentUser, FileMetadata, FileVersion, RemoteFile, RemoteProject};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::dto::{FileResponse, MeResponse, ProjectFilesResponse, ProjectsResponse, VersionsResponse};
use crate::{Gateway, GatewayError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.figma.com";
/// Environment override for the API base URL.
pub const API_URL_ENV: &str = "FIGMA_BEACON_API_URL";
const TOKEN_HEADER: &str = "X-Figma-Token";

/// HTTP gateway backed by reqwest.
#[derive(Debug, Clone)]
pub struct FigmaClient {
    client: ReqwestClient,
    base_url: String,
}

impl FigmaClient {
    /// Start building a new client.
    pub fn builder() -> FigmaClientBuilder {
        FigmaClientBuilder::default()
    }

    /// Client with default timeout, honouring `FIGMA_BEACON_API_URL`.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.is_empty()
        {
            builder = builder.base_url(url);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        if token.trim().is_empty() {
            return Err(GatewayError::MissingToken);
        }

        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending API request");

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        debug!(%url, %status, "received API response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

#[async_trait]
impl Gateway for FigmaClient {
    async fn current_user(&self, token: &str) -> Result<CurrentUser> {
        let me: MeResponse = self.get_json(token, "/v1/me", &[]).await?;
        Ok(me.into())
    }

    async fn team_projects(&self, token: &str, team_id: &str) -> Result<Vec<RemoteProject>> {
        if team_id.trim().is_empty() {
            return Err(GatewayError::MissingTeam);
        }
        let path = format!("/v1/teams/{}/projects", team_id.trim());
        let response: ProjectsResponse = self.get_json(token, &path, &[]).await?;
        Ok(response.projects.into_iter().map(Into::into).collect())
    }

    async fn project_files(&self, token: &str, project_id: &str) -> Result<Vec<RemoteFile>> {
        let path = format!("/v1/projects/{}/files", project_id);
        let response: ProjectFilesResponse = self.get_json(token, &path, &[]).await?;
        Ok(response
            .files
            .into_iter()
            .map(|file| file.into_remote(project_id))
            .collect())
    }

    async fn file_metadata(&self, token: &str, file_key: &str) -> Result<FileMetadata> {
        let path = format!("/v1/files/{}", file_key);
        let response: FileResponse = self.get_json(token, &path, &[("depth", "1")]).await?;
        Ok(response.into())
    }

    async fn file_versions(&self, token: &str, file_key: &str) -> Result<Vec<FileVersion>> {
        let path = format!("/v1/files/{}/versions", file_key);
        let response: VersionsResponse = self.get_json(token, &path, &[]).await?;
        Ok(response.versions.into_iter().map(Into::into).collect())
    }
}

/// Builder for [`FigmaClient`].
#[derive(Debug)]
pub struct FigmaClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for FigmaClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("figma-beacon/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FigmaClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn build(self) -> Result<FigmaClient> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        Ok(FigmaClient {
            client,
            base_url: self.base_url,
        })
    }
}
