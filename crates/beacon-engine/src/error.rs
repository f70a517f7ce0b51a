use beacon_figma::GatewayError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No Figma token set. Add one in Setup.")]
    MissingToken,

    #[error("Profile '{0}' has no projects selected")]
    NoProjects(String),

    #[error("Could not reach Figma: {0}")]
    Unreachable(#[from] GatewayError),

    #[error("Failed to write report: {0}")]
    Export(#[from] std::io::Error),
}
