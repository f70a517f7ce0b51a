use std::path::{Path, PathBuf};

use beacon_types::OutputFormat;
use chrono::NaiveDate;
use tracing::info;

use crate::Result;

const FALLBACK_PROFILE: &str = "default";

/// `<profile>-<YYYY-MM-DD>.<ext>`, with `default` standing in for an empty profile name.
pub fn report_file_name(profile_name: &str, format: OutputFormat, date: NaiveDate) -> String {
    let profile = profile_name.trim();
    let profile = if profile.is_empty() {
        FALLBACK_PROFILE
    } else {
        profile
    };
    format!("{}-{}.{}", profile, date.format("%Y-%m-%d"), format.extension())
}

/// Write a rendered report under `dir`, creating it if needed. Overwrites same-day exports.
pub fn export_report(
    dir: &Path,
    profile_name: &str,
    content: &str,
    format: OutputFormat,
    date: NaiveDate,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(profile_name, format, date));
    std::fs::write(&path, content)?;
    info!(path = %path.display(), "report exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            report_file_name("design-system", OutputFormat::Markdown, june_first()),
            "design-system-2024-06-01.md"
        );
        assert_eq!(
            report_file_name("  ", OutputFormat::Text, june_first()),
            "default-2024-06-01.txt"
        );
    }

    #[test]
    fn test_export_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("reports").join("nested");

        let path = export_report(&dir, "web", "# Status Report\n", OutputFormat::Markdown, june_first())
            .unwrap();

        assert_eq!(path, dir.join("web-2024-06-01.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Status Report\n");
    }

    #[test]
    fn test_export_overwrites_same_day() {
        let temp = TempDir::new().unwrap();
        export_report(temp.path(), "web", "first", OutputFormat::Text, june_first()).unwrap();
        let path = export_report(temp.path(), "web", "second", OutputFormat::Text, june_first()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    }
}
