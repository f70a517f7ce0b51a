//! Remote API gateway for the Figma REST API.
//!
//! [`Gateway`] is the seam the report engine and the session executor depend on;
//! [`FigmaClient`] is the HTTP implementation.

mod client;
mod dto;
pub mod error;
mod gateway;

pub use client::{DEFAULT_BASE_URL, FigmaClient, FigmaClientBuilder, API_URL_ENV};
pub use error::{GatewayError, Result};
pub use gateway::Gateway;
