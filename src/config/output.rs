use crate::config::ProjectRoot;
use serde::Serialize;
use std::path::PathBuf;

/// How the bundled library is exposed to the host page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LibraryExposure {
    Var,
    Window,
    Umd,
}

/// Output naming for the compilation. The templates are fixed conventions;
/// only the base path varies, and only with the project root.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutputSpec {
    /// Absolute output directory.
    pub base_path: PathBuf,
    /// File name of each entry bundle.
    pub entry_template: String,
    /// File name of the source maps, inside the output directory.
    pub source_map_template: String,
    /// File name of non-entry chunks.
    pub chunk_template: String,
    /// Name under which the bundle is exposed.
    pub library: String,
    pub exposure: LibraryExposure,
}

impl OutputSpec {
    /// Development naming: stable file names, no content hashes.
    pub fn dev(root: &ProjectRoot) -> Self {
        Self {
            base_path: root.join(["dist"]),
            entry_template: "[name].bundle.js".to_string(),
            source_map_template: "[file].map".to_string(),
            chunk_template: "[id].chunk.js".to_string(),
            library: "ac_[name]".to_string(),
            exposure: LibraryExposure::Var,
        }
    }

    /// Release naming: content-hashed file names for long-term caching.
    pub fn release(root: &ProjectRoot) -> Self {
        Self {
            entry_template: "[name].[chunkhash].bundle.js".to_string(),
            source_map_template: "[name].[chunkhash].bundle.map".to_string(),
            chunk_template: "[name].[chunkhash].chunk.js".to_string(),
            ..Self::dev(root)
        }
    }
}
