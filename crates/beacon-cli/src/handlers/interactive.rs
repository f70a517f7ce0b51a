use std::sync::Arc;
use std::sync::mpsc;

use anyhow::{Result, bail};
use beacon_core::{FsStore, Store};
use beacon_figma::FigmaClient;
use is_terminal::IsTerminal;
use tracing::info;

use crate::app::{Executor, Session};
use crate::ui::TuiRenderer;

pub fn handle(store: Arc<FsStore>) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        bail!("the interactive UI needs a terminal; use `figma-beacon report` for non-interactive output");
    }

    let config = store.load_config()?;
    let profiles = store.list_profiles()?;
    let gateway = Arc::new(FigmaClient::from_env()?);
    info!(
        config_dir = %store.root().display(),
        api = gateway.base_url(),
        profiles = profiles.len(),
        "starting interactive session"
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let (tx, rx) = mpsc::channel();
    let executor = Executor::new(runtime.handle().clone(), gateway, store, tx);

    TuiRenderer::new(Session::new(config, profiles), executor).run(rx)
}
