use crate::config::ConfigError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The validated root of the project being bundled.
///
/// All project-relative locations (source tree, styles directory, output dir)
/// are resolved through this type, never against the process working directory
/// directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    /// Validate the root once, at startup. An empty or relative path is a
    /// configuration error.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if path.as_os_str().is_empty() || !path.is_absolute() {
            return Err(ConfigError::InvalidRoot(path));
        }
        Ok(Self(path))
    }

    /// Resolve a sequence of project-relative segments to an absolute path.
    pub fn join<I, S>(&self, segments: I) -> PathBuf
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        segments
            .into_iter()
            .fold(self.0.clone(), |path, segment| path.join(segment))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_resolves_segments_under_root() {
        let root = ProjectRoot::new("/work/app").expect("absolute root");
        assert_eq!(
            root.join(["src", "assets/styles"]),
            PathBuf::from("/work/app/src/assets/styles")
        );
        assert_eq!(root.join(["dist"]), PathBuf::from("/work/app/dist"));
    }

    #[test]
    fn join_with_no_segments_is_the_root() {
        let root = ProjectRoot::new("/work/app").expect("absolute root");
        assert_eq!(root.join(Vec::<&str>::new()), root.as_path());
    }

    #[test]
    fn relative_root_is_rejected() {
        let err = ProjectRoot::new("app").expect_err("relative root must fail");
        assert_eq!(
            err.to_string(),
            r#"project root must be a non-empty absolute path, got "app""#
        );
    }

    #[test]
    fn empty_root_is_rejected() {
        assert!(ProjectRoot::new("").is_err());
    }
}
