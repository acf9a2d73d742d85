//! Plugin instructions.
//!
//! The assembler turns the environment metadata into the ordered directives
//! the external bundling engine executes at build time. Order is part of the
//! contract: global definitions come first so every subsequently compiled
//! module sees them, and parameter maps are `BTreeMap`s so nothing depends on
//! hash order.

use crate::config::{ConfigValue, EnvName, Environment, ProjectRoot, Scalar};
use serde::Serialize;
use std::collections::BTreeMap;

/// The kinds of build-time directives the engine understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum PluginKind {
    /// Define named constants visible to all compiled modules.
    DefineGlobals,
    /// Exclude paths from file watching.
    IgnoreWatchPaths,
    /// Inject a prebuilt asset into the output page.
    InjectAsset,
    /// Propagate options to nested transform plugins.
    SetLoaderOptions,
}

/// A parameterized directive for the external bundling engine.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PluginInstruction {
    pub kind: PluginKind,
    pub parameters: BTreeMap<String, ConfigValue>,
}

impl PluginInstruction {
    fn new(kind: PluginKind, parameters: BTreeMap<String, ConfigValue>) -> Self {
        Self { kind, parameters }
    }
}

/// Build the instruction sequence for an environment. Stable and
/// deterministic: the same environment always yields the same instructions in
/// the same order.
pub fn assemble(env: &Environment, root: &ProjectRoot) -> Vec<PluginInstruction> {
    vec![
        define_globals(env),
        ignore_watch_paths(root),
        loader_options(env, root),
    ]
}

/// Constants injected into every compiled module. Rendered through
/// [`Scalar::emit`] at handoff, so the environment name arrives double-quoted
/// and the hot-reload flag arrives as a bare boolean.
fn define_globals(env: &Environment) -> PluginInstruction {
    let name = Scalar::Str(env.name.to_string());
    let hmr = Scalar::Bool(env.hot_reload());

    let mut process_env = BTreeMap::new();
    process_env.insert("ENV".to_string(), ConfigValue::Scalar(name.clone()));
    process_env.insert("NODE_ENV".to_string(), ConfigValue::Scalar(name.clone()));
    process_env.insert("HMR".to_string(), ConfigValue::Scalar(hmr.clone()));

    let mut parameters = BTreeMap::new();
    parameters.insert("ENV".to_string(), ConfigValue::Scalar(name));
    parameters.insert("HMR".to_string(), ConfigValue::Scalar(hmr));
    parameters.insert("process.env".to_string(), ConfigValue::Mapping(process_env));

    PluginInstruction::new(PluginKind::DefineGlobals, parameters)
}

/// Generated, runtime-managed output directories. Watching them would let
/// build output retrigger a rebuild.
fn ignore_watch_paths(root: &ProjectRoot) -> PluginInstruction {
    let paths = [["src", "app", "sw"], ["src", "app", "workers"]]
        .into_iter()
        .map(|segments| ConfigValue::from(root.join(segments).to_string_lossy().into_owned()))
        .collect();

    let mut parameters = BTreeMap::new();
    parameters.insert("paths".to_string(), ConfigValue::Sequence(paths));

    PluginInstruction::new(PluginKind::IgnoreWatchPaths, parameters)
}

/// Options that must be visible to nested transform plugins.
fn loader_options(env: &Environment, root: &ProjectRoot) -> PluginInstruction {
    let mut output = BTreeMap::new();
    output.insert(
        "path".to_string(),
        ConfigValue::from(root.join(["dist"]).to_string_lossy().into_owned()),
    );

    let mut parameters = BTreeMap::new();
    parameters.insert(
        "debug".to_string(),
        ConfigValue::from(env.name == EnvName::Development),
    );
    parameters.insert(
        "context".to_string(),
        ConfigValue::from(root.join(["src"]).to_string_lossy().into_owned()),
    );
    parameters.insert("output".to_string(), ConfigValue::Mapping(output));

    PluginInstruction::new(PluginKind::SetLoaderOptions, parameters)
}
