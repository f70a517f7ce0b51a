use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Rendering format for reports, also used as the export extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Text,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Markdown, OutputFormat::Text];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "Markdown (.md)",
            OutputFormat::Text => "Plain text (.txt)",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Process-wide settings edited from the Setup screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub figma_token: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_handle: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Directory for exported reports; relative paths resolve against the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_dir: Option<PathBuf>,
}

impl Config {
    pub fn has_token(&self) -> bool {
        !self.figma_token.trim().is_empty()
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.reports_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("reports"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reports_dir() {
        let config = Config::default();
        assert_eq!(config.reports_dir(), PathBuf::from("reports"));
        assert!(!config.has_token());
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Markdown.extension(), "md");
        assert_eq!(OutputFormat::Text.extension(), "txt");
    }

    #[test]
    fn test_missing_fields_default() {
        let config: Config = serde_json::from_str(r#"{"figma_token":"abc"}"#).unwrap();
        assert_eq!(config.figma_token, "abc");
        assert_eq!(config.output_format, OutputFormat::Markdown);
        assert!(config.reports_dir.is_none());
    }
}
