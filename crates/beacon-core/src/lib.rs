//! Local persistence for figma-beacon.
//!
//! Configuration lives in `config.toml` and every profile in its own
//! `profiles/<name>.beacon` JSON file under the resolved config directory.

pub mod error;
pub mod paths;
pub mod profiles;
pub mod store;

pub use error::{Error, Result};
pub use paths::{expand_tilde, resolve_config_dir};
pub use profiles::{delete_and_promote, save_replacing};
pub use store::{FsStore, Store, validate_profile_name};
