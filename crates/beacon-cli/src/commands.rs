use std::sync::Arc;

use anyhow::Result;
use beacon_core::{FsStore, resolve_config_dir};
use tracing::debug;

use crate::args::{Cli, Commands};
use crate::handlers;
use crate::handlers::report::ReportArgs;
use crate::logging::{self, LOG_FILE, LogTarget};

pub fn run(cli: Cli) -> Result<()> {
    let config_dir = resolve_config_dir(cli.config_dir.as_deref())?;
    let store = Arc::new(FsStore::new(&config_dir));

    match cli.command {
        None => {
            logging::init(cli.log_level, LogTarget::File(config_dir.join(LOG_FILE)))?;
            debug!(config_dir = %config_dir.display(), "resolved config directory");
            handlers::interactive::handle(store)
        }
        Some(Commands::Report {
            profile,
            period,
            format,
            save,
        }) => {
            logging::init(cli.log_level, LogTarget::Stderr)?;
            debug!(config_dir = %config_dir.display(), "resolved config directory");
            handlers::report::handle(
                store.as_ref(),
                ReportArgs {
                    profile,
                    period,
                    format: format.map(Into::into),
                    save,
                },
            )
        }
    }
}
