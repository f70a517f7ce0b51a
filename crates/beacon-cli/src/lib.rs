//! figma-beacon: profiles of Figma projects and activity reports over them.
//!
//! The interactive session is a pure state machine ([`app::dispatch`]) fed by
//! terminal input and by results of commands that [`app::Executor`] runs on a
//! tokio runtime. The `report` subcommand drives the same engine headlessly.

mod args;
mod commands;
mod handlers;
mod logging;
pub mod app;
pub mod types;
pub mod ui;

pub use args::{Cli, Commands};
pub use commands::run;
