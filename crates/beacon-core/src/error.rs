use thiserror::Error;

/// Result type for beacon-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the config/profile store
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Could not serialize config: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Invalid profile file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Invalid profile name: '{0}'")]
    InvalidProfileName(String),

    #[error("Could not determine config directory: no HOME directory or system config directory found")]
    NoConfigDir,
}
