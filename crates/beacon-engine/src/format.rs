use std::fmt::Write as _;

use beacon_types::{ActivityReport, FileActivity, OutputFormat};

const FILE_URL_BASE: &str = "https://www.figma.com/file/";
const UNKNOWN_PROJECT: &str = "Unknown Project";
const NO_ACTIVITY: &str = "No file activity found in the selected time period.";

pub fn file_url(file_key: &str) -> String {
    format!("{}{}", FILE_URL_BASE, file_key)
}

/// Group files by project name, in order of first occurrence.
pub fn group_by_project(files: &[FileActivity]) -> Vec<(&str, Vec<&FileActivity>)> {
    let mut groups: Vec<(&str, Vec<&FileActivity>)> = Vec::new();
    for file in files {
        let project = if file.project_name.is_empty() {
            UNKNOWN_PROJECT
        } else {
            file.project_name.as_str()
        };
        match groups.iter_mut().find(|(name, _)| *name == project) {
            Some((_, members)) => members.push(file),
            None => groups.push((project, vec![file])),
        }
    }
    groups
}

fn annotation(file: &FileActivity) -> &'static str {
    if file.created_in_window {
        "Created"
    } else {
        "Modified"
    }
}

pub fn format_report(report: &ActivityReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Markdown => format_markdown(report),
        OutputFormat::Text => format_text(report),
    }
}

fn format_markdown(report: &ActivityReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Status Report");
    let _ = writeln!(
        out,
        "## From {} to {}",
        report.window.start.format("%Y-%m-%d"),
        report.window.end.format("%Y-%m-%d")
    );
    if !report.user_handle.is_empty() {
        let _ = writeln!(out, "User: {}", report.user_handle);
    }
    out.push('\n');

    if report.is_empty() {
        let _ = writeln!(out, "{}", NO_ACTIVITY);
        return out;
    }

    for (project, files) in group_by_project(&report.files) {
        let _ = writeln!(out, "\n### {}\n", project);
        for file in files {
            let _ = writeln!(
                out,
                "- [{}]({}) ({})",
                file.file_name,
                file_url(&file.file_key),
                annotation(file)
            );
        }
    }
    out
}

fn format_text(report: &ActivityReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Status Report");
    let _ = writeln!(
        out,
        "From {} to {}",
        report.window.start.format("%Y-%m-%d"),
        report.window.end.format("%Y-%m-%d")
    );
    if !report.user_handle.is_empty() {
        let _ = writeln!(out, "User: {}", report.user_handle);
    }
    out.push('\n');

    if report.is_empty() {
        let _ = writeln!(out, "{}", NO_ACTIVITY);
        return out;
    }

    for (project, files) in group_by_project(&report.files) {
        let _ = writeln!(out, "\n{}\n", project);
        for file in files {
            let _ = writeln!(
                out,
                "  - {} ({}) {}",
                file.file_name,
                annotation(file),
                file_url(&file.file_key)
            );
        }
    }
    out
}
