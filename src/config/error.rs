use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while composing a configuration.
///
/// All of these are fatal: they are surfaced to the invoking process before
/// any compilation starts, and carry enough context (key path, variable value,
/// file path) to fix the offending input.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The project root must be a non-empty absolute path.
    #[error("project root must be a non-empty absolute path, got {0:?}")]
    InvalidRoot(PathBuf),

    /// Two layers disagree on the shape of a value at the same key.
    #[error("cannot merge {overlay} over {base} at '{path}'")]
    ShapeMismatch {
        /// Dot-separated key path from the merge root.
        path: String,
        base: &'static str,
        overlay: &'static str,
    },

    /// The `PORT` process variable was present but not a valid port number.
    #[error("invalid PORT value {0:?}: expected an integer port number")]
    InvalidPort(String),

    /// More than one asset rule applies to the same file.
    #[error("ambiguous asset rules: multiple transform chains match {0:?}")]
    AmbiguousRule(PathBuf),

    /// The merged layers produced no output section.
    #[error("composed configuration has no output section")]
    MissingOutput,
}
