//! Environment metadata.
//!
//! Process variables are read exactly once, at the edge, into a [`ProcessVars`]
//! value. Everything downstream receives the immutable [`Environment`] by
//! parameter; nothing deeper in the composition reads global state.

use crate::config::ConfigError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default host when `HOST` is not set.
pub const DEFAULT_HOST: &str = "localhost";
/// Default dev-server port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;
/// Default application title when `TITLE` is not set.
pub const DEFAULT_TITLE: &str = "BlockchainStore";

/// Flag name under which hot-reload is recorded in [`Environment::flags`].
pub const HMR_FLAG: &str = "hmr";

/// The target environment to compose a configuration for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum::Display, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EnvName {
    Development,
    Production,
}

/// The raw process-level inputs, captured once per invocation.
///
/// Tests construct this directly instead of mutating the process environment.
#[derive(Clone, Debug, Default)]
pub struct ProcessVars {
    pub host: Option<String>,
    pub port: Option<String>,
    pub title: Option<String>,
}

impl ProcessVars {
    /// Capture `HOST`, `PORT` and `TITLE` from the process environment. This
    /// is the only place the process environment is read.
    pub fn capture() -> Self {
        let var = |name| std::env::var(name).ok();
        Self {
            host: var("HOST"),
            port: var("PORT"),
            title: var("TITLE"),
        }
    }
}

/// Immutable environment metadata, built once per invocation and consumed by
/// every downstream component.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Environment {
    pub name: EnvName,
    pub host: String,
    pub port: u16,
    pub title: String,
    /// Feature flags, keyed by name. Ordered so downstream serialization is
    /// deterministic.
    pub flags: BTreeMap<String, bool>,
}

impl Environment {
    /// Apply defaults for absent variables and build the metadata value.
    ///
    /// A present but non-numeric `PORT` is rejected here, at the boundary; it
    /// must never propagate into a server spec.
    pub fn new(name: EnvName, vars: ProcessVars, hot_reload: bool) -> Result<Self, ConfigError> {
        let port = match vars.port {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let mut flags = BTreeMap::new();
        flags.insert(HMR_FLAG.to_string(), hot_reload);

        Ok(Self {
            name,
            host: vars.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            title: vars.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            flags,
        })
    }

    /// Whether changed modules should be swapped into a running session.
    pub fn hot_reload(&self) -> bool {
        self.flags.get(HMR_FLAG).copied().unwrap_or(false)
    }
}
