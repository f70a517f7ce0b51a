//! Activity report engine.
//!
//! Pipeline: [`resolve_window`] turns a [`TimeMode`](beacon_types::TimeMode) into a
//! concrete window, [`generate`] walks the profile's projects through a
//! [`Gateway`](beacon_figma::Gateway), [`format_report`] renders the result and
//! [`export_report`] writes it to the reports directory.

pub mod error;
pub mod export;
pub mod format;
pub mod generate;
pub mod window;

pub use error::{Error, Result};
pub use export::{export_report, report_file_name};
pub use format::{file_url, format_report, group_by_project};
pub use generate::{Credentials, FETCH_CONCURRENCY, generate};
pub use window::{resolve_window, resolve_window_now};
