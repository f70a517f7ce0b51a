use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failure of a single gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("No Figma token set")]
    MissingToken,

    #[error("No team ID set")]
    MissingTeam,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("API error: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Authentication failures are reported as 401/403 by the API.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            GatewayError::MissingToken | GatewayError::Status { status: 401 | 403, .. }
        )
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}
