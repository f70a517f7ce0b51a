use beacon_types::TimeMode;
use clap::{Parser, Subcommand};

use crate::types::{LogLevel, ReportFormat};

#[derive(Parser)]
#[command(name = "figma-beacon")]
#[command(about = "Activity reports for Figma teams", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config directory (defaults to $FIGMA_BEACON_HOME, then the system config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Without a subcommand the interactive terminal UI starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a report without the interactive UI and print it to stdout
    Report {
        /// Profile name (defaults to the default profile)
        #[arg(long)]
        profile: Option<String>,

        /// last-week, last-month, month-to-date, last-4-weeks or last-30-days
        #[arg(long, default_value = "last-week")]
        period: TimeMode,

        /// Output format (defaults to the configured format)
        #[arg(long)]
        format: Option<ReportFormat>,

        /// Also write the report into the reports directory
        #[arg(long)]
        save: bool,
    },
}
