pub mod config;
pub mod profile;
pub mod remote;
pub mod report;

pub use config::{Config, OutputFormat};
pub use profile::{Profile, ProfileProject};
pub use remote::{CurrentUser, FileMetadata, FileVersion, RemoteFile, RemoteProject};
pub use report::{ActivityReport, FileActivity, ParseTimeModeError, TimeMode, TimeWindow};
