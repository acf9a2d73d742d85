use crate::{
    common::SERVER,
    config::{self, EnvName, ProcessVars},
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Compose the development configuration and report the dev-server parameters.
#[derive(Clone, Debug, Args)]
#[command(name = "serve")]
#[command(next_help_heading = "Serve")]
pub struct Serve {
    /// Request hot-reload of changed modules
    #[arg(long)]
    pub hot: bool,
}

impl Serve {
    #[tracing::instrument(level = "trace", skip(self, root))]
    pub fn run(self, root: Option<PathBuf>) -> Result<()> {
        let root = super::resolve_root(root)?;
        let cfg = config::compose(EnvName::Development, &root, ProcessVars::capture(), self.hot)?;

        // The server itself runs externally; these are its marching orders.
        if let Some(server) = &cfg.dev_server {
            tracing::info!(
                "{} dev server: http://{}:{} (history fallback: {}, watching all but {:?})",
                SERVER,
                server.host,
                server.port,
                server.history_fallback,
                server.watch_ignore
            );
        }
        Ok(())
    }
}
