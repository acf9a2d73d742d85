use crate::{
    common::SUCCESS,
    config::{self, EnvName, ProcessVars},
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Compose the build configuration for a target environment.
#[derive(Clone, Debug, Args)]
#[command(name = "build")]
#[command(next_help_heading = "Build")]
pub struct Build {
    /// The environment to compose for
    #[arg(long, value_enum, default_value_t = EnvName::Production)]
    pub env: EnvName,

    /// Request hot-reload of changed modules
    #[arg(long)]
    pub hot: bool,
}

impl Build {
    #[tracing::instrument(level = "trace", skip(self, root))]
    pub fn run(self, root: Option<PathBuf>) -> Result<()> {
        let root = super::resolve_root(root)?;
        let cfg = config::compose(self.env, &root, ProcessVars::capture(), self.hot)?;

        // The resolved configuration is handed to the bundling engine whole;
        // composing it is this command's entire job.
        tracing::info!(
            "{} composed {} configuration: {} rules, {} plugins, output {}",
            SUCCESS,
            self.env,
            cfg.rules.len(),
            cfg.plugins.len(),
            cfg.output.base_path.display()
        );
        Ok(())
    }
}
