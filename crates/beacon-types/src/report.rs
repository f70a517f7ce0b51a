use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbolic reporting period, resolved to a [`TimeWindow`] at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeMode {
    #[default]
    LastWeek,
    LastMonth,
    MonthToDate,
    Last4Weeks,
    Last30Days,
}

impl TimeMode {
    pub const ALL: [TimeMode; 5] = [
        TimeMode::LastWeek,
        TimeMode::LastMonth,
        TimeMode::MonthToDate,
        TimeMode::Last4Weeks,
        TimeMode::Last30Days,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeMode::LastWeek => "Last Week",
            TimeMode::LastMonth => "Last Month",
            TimeMode::MonthToDate => "This Month to Date",
            TimeMode::Last4Weeks => "Last 4 Weeks",
            TimeMode::Last30Days => "Last 30 Days",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeMode::LastWeek => "last-week",
            TimeMode::LastMonth => "last-month",
            TimeMode::MonthToDate => "month-to-date",
            TimeMode::Last4Weeks => "last-4-weeks",
            TimeMode::Last30Days => "last-30-days",
        }
    }
}

impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTimeModeError(String);

impl fmt::Display for ParseTimeModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown time mode '{}' (expected one of: last-week, last-month, month-to-date, last-4-weeks, last-30-days)",
            self.0
        )
    }
}

impl std::error::Error for ParseTimeModeError {}

impl FromStr for TimeMode {
    type Err = ParseTimeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        TimeMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| ParseTimeModeError(s.to_string()))
    }
}

/// Concrete reporting window.
///
/// The start bound is always exclusive for membership tests. The end bound is
/// inclusive for the "until now" modes and exclusive for closed calendar periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub end_inclusive: bool,
}

impl TimeWindow {
    pub fn contains<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        if *instant <= self.start {
            return false;
        }
        if self.end_inclusive {
            *instant <= self.end
        } else {
            *instant < self.end
        }
    }
}

/// Per-file activity inside one report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileActivity {
    pub file_key: String,
    pub file_name: String,
    pub project_name: String,
    pub last_modified: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_in_window: bool,
    pub created_in_window: bool,
}

impl FileActivity {
    pub fn has_activity(&self) -> bool {
        self.modified_in_window || self.created_in_window
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub window: TimeWindow,
    pub user_id: String,
    pub user_handle: String,
    pub files: Vec<FileActivity>,
    pub total_files: usize,
    pub total_changes: usize,
    /// Files or projects that could not be read and were left out.
    pub skipped_files: usize,
    pub generated_at: DateTime<Utc>,
}

impl ActivityReport {
    /// Build a report, keeping only files with activity and computing totals.
    pub fn new(
        window: TimeWindow,
        user_id: impl Into<String>,
        user_handle: impl Into<String>,
        files: Vec<FileActivity>,
        skipped_files: usize,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let files: Vec<FileActivity> = files.into_iter().filter(|f| f.has_activity()).collect();
        let total_changes = files.iter().filter(|f| f.modified_in_window).count();
        Self {
            window,
            user_id: user_id.into(),
            user_handle: user_handle.into(),
            total_files: files.len(),
            total_changes,
            files,
            skipped_files,
            generated_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
