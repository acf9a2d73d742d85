use crate::config::{self, EnvName, ProcessVars};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Print the composed configuration as JSON.
#[derive(Clone, Debug, Args)]
#[command(name = "show")]
pub struct Show {
    /// The environment to compose for
    #[arg(long, value_enum, default_value_t = EnvName::Development)]
    pub env: EnvName,

    /// Request hot-reload of changed modules
    #[arg(long)]
    pub hot: bool,
}

impl Show {
    #[tracing::instrument(level = "trace", skip(self, root))]
    pub fn run(self, root: Option<PathBuf>) -> Result<()> {
        let root = super::resolve_root(root)?;
        let cfg = config::compose(self.env, &root, ProcessVars::capture(), self.hot)?;

        let json =
            serde_json::to_string_pretty(&cfg).context("error serializing configuration")?;
        println!("{json}");
        Ok(())
    }
}
