//! Testing infrastructure for figma-beacon.
//!
//! - `FakeGateway`: scripted in-memory [`beacon_figma::Gateway`]
//! - `TestWorld`: isolated config directory + CLI runner
//! - `fixtures`: sample profiles and timestamps

pub mod fixtures;
pub mod gateway;
pub mod world;

pub use gateway::FakeGateway;
pub use world::TestWorld;
