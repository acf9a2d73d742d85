use crate::config::Environment;
use serde::Serialize;

/// Pattern for the dependency cache directory, always excluded from watching.
pub const DEPENDENCY_CACHE_PATTERN: &str = "node_modules";

/// Parameters for the externally run development server. Computed fresh on
/// every invocation, never persisted; no network I/O happens here.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DevServerSpec {
    pub host: String,
    pub port: u16,
    /// Route all unmatched paths to the entry document. Always on for
    /// single-page, client-routed applications.
    pub history_fallback: bool,
    /// Patterns excluded from file watching.
    pub watch_ignore: Vec<String>,
}

impl DevServerSpec {
    pub fn new(env: &Environment) -> Self {
        Self {
            host: env.host.clone(),
            port: env.port,
            history_fallback: true,
            watch_ignore: vec![DEPENDENCY_CACHE_PATTERN.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnvName, ProcessVars};

    #[test]
    fn spec_reflects_the_environment_and_fixed_policy() {
        let vars = ProcessVars {
            host: Some("0.0.0.0".to_string()),
            port: Some("4200".to_string()),
            ..Default::default()
        };
        let env = Environment::new(EnvName::Development, vars, true).expect("valid vars");

        let spec = DevServerSpec::new(&env);

        assert_eq!(spec.host, "0.0.0.0");
        assert_eq!(spec.port, 4200);
        assert!(spec.history_fallback);
        assert_eq!(spec.watch_ignore, vec!["node_modules".to_string()]);
    }
}
