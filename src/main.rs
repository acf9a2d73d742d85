#![deny(clippy::unwrap_used)]

mod cmd;
mod common;
mod config;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use common::STARTING;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

fn main() -> Result<()> {
    let cli = Baler::parse();

    tracing_subscriber::registry()
        // Filter spans based on the verbosity flags.
        .with(eval_logging(&cli))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        // Install this registry as the global tracing registry.
        .try_init()
        .context("error initializing logging")?;

    tracing::info!(
        "{} Starting {} {}",
        STARTING,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    cli.run()
}

fn eval_logging(cli: &Baler) -> tracing_subscriber::EnvFilter {
    let directives = match (cli.verbose, cli.quiet) {
        // quiet overrides verbose
        (_, true) => "error,baler=warn",
        // increase verbosity
        (0, false) => "error,baler=info",
        (1, false) => "error,baler=debug",
        (_, false) => "error,baler=trace",
    };
    tracing_subscriber::EnvFilter::new(directives)
}

/// Compose environment-aware build & dev-server configuration for your front-end bundle.
#[derive(Parser)]
#[command(about, author, version)]
struct Baler {
    #[command(subcommand)]
    action: BalerSubcommands,
    /// Project root directory [default: current directory]
    #[arg(long, env = "BALER_ROOT", global(true))]
    pub root: Option<PathBuf>,
    /// Enable verbose logging.
    #[arg(short, long, global(true), action=ArgAction::Count)]
    pub verbose: u8,
    /// Be more quiet, conflicts with --verbose
    #[arg(short, long, global(true), conflicts_with("verbose"))]
    pub quiet: bool,
}

impl Baler {
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn run(self) -> Result<()> {
        match self.action {
            BalerSubcommands::Build(inner) => inner.run(self.root),
            BalerSubcommands::Serve(inner) => inner.run(self.root),
            BalerSubcommands::Show(inner) => inner.run(self.root),
        }
    }
}

#[derive(Subcommand)]
enum BalerSubcommands {
    /// Compose the build configuration for a target environment.
    Build(cmd::build::Build),
    /// Compose the development configuration and report the dev-server parameters.
    Serve(cmd::serve::Serve),
    /// Print the composed configuration as JSON.
    Show(cmd::show::Show),
}
