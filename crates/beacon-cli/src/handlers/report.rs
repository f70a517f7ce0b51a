use std::io::Write;

use anyhow::{Result, anyhow};
use beacon_core::Store;
use beacon_engine::{Credentials, export_report, format_report, generate, resolve_window_now};
use beacon_figma::FigmaClient;
use beacon_types::{OutputFormat, Profile, TimeMode};
use chrono::{Local, Utc};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use tracing::info;

pub struct ReportArgs {
    pub profile: Option<String>,
    pub period: TimeMode,
    pub format: Option<OutputFormat>,
    pub save: bool,
}

/// Generate a report without the UI. Nothing reaches stdout unless the whole run succeeds.
pub fn handle(store: &dyn Store, args: ReportArgs) -> Result<()> {
    let config = store.load_config()?;
    let profile = select_profile(store, args.profile.as_deref())?;
    let format = args.format.unwrap_or(config.output_format);
    let gateway = FigmaClient::from_env()?;

    let window = resolve_window_now(args.period);
    let credentials = Credentials::new(config.figma_token.clone())
        .with_user(config.user_id.clone(), config.user_handle.clone());
    info!(profile = %profile.name, period = %args.period, %format, "headless report");

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(generate(&gateway, &profile, window, &credentials, Utc::now()))?;
    let content = format_report(&report, format);

    let color = std::io::stderr().is_terminal();
    if report.skipped_files > 0 {
        let message = format!(
            "{} files or projects could not be read and were left out",
            report.skipped_files
        );
        if color {
            eprintln!("{}", message.yellow());
        } else {
            eprintln!("{}", message);
        }
    }

    if args.save {
        let today = Local::now().date_naive();
        let path = export_report(&config.reports_dir(), &profile.name, &content, format, today)?;
        if color {
            eprintln!("{} {}", "Report saved to:".green(), path.display());
        } else {
            eprintln!("Report saved to: {}", path.display());
        }
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn select_profile(store: &dyn Store, name: Option<&str>) -> Result<Profile> {
    if let Some(name) = name {
        return Ok(store.load_profile(name)?);
    }
    store
        .list_profiles()?
        .into_iter()
        .find(|p| p.is_default)
        .ok_or_else(|| anyhow!("no profile selected; pass --profile <name> or set a default profile"))
}
