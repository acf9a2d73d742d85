pub mod build;
pub mod serve;
pub mod show;

use crate::config::ProjectRoot;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Resolve the project root from the CLI override, falling back to the
/// current directory.
pub fn resolve_root(root: Option<PathBuf>) -> Result<ProjectRoot> {
    let cwd = std::env::current_dir().context("error getting current directory")?;
    let path = match root {
        Some(path) if path.is_absolute() => path,
        Some(path) => cwd.join(path),
        None => cwd,
    };
    Ok(ProjectRoot::new(path)?)
}
