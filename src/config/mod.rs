//! Configuration composition.
//!
//! A build invocation composes its configuration in one synchronous pass: the
//! environment metadata is built from captured process variables, a common
//! base layer is merged with the selected environment's overlay, and the
//! result is finalized into the [`ResolvedConfig`] handed to the external
//! bundling engine. Nothing here is cached or shared across invocations.

mod environment;
mod error;
mod merge;
mod output;
mod paths;
mod plugins;
mod rules;
mod serve;

pub use environment::*;
pub use error::*;
pub use merge::*;
pub use output::*;
pub use paths::*;
pub use plugins::*;
pub use rules::*;
pub use serve::*;


use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Source-map emission mode passed through to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SourceMapMode {
    SourceMap,
    EvalSourceMap,
}

/// One layer of configuration: either the common base or an environment
/// overlay. All fields are optional or additive so layers stack.
#[derive(Clone, Debug, Default)]
pub struct ConfigLayer {
    /// Free-form named values merged recursively across layers.
    pub metadata: BTreeMap<String, ConfigValue>,
    pub source_maps: Option<SourceMapMode>,
    pub output: Option<OutputSpec>,
    pub rules: Vec<AssetRule>,
    pub plugins: Vec<PluginInstruction>,
    pub dev_server: Option<DevServerSpec>,
}

impl ConfigLayer {
    /// Merge an overlay onto this layer, producing a new layer. Scalar fields
    /// from the overlay replace the base, the metadata mapping merges
    /// recursively, and rule/plugin sequences concatenate with the base
    /// entries first. Overlays refine lists, they never silently replace them.
    pub fn merge(&self, overlay: &Self) -> Result<Self, ConfigError> {
        Ok(Self {
            metadata: merge_mappings(&self.metadata, &overlay.metadata, "metadata")?,
            source_maps: overlay.source_maps.or(self.source_maps),
            output: overlay.output.clone().or_else(|| self.output.clone()),
            rules: [self.rules.clone(), overlay.rules.clone()].concat(),
            plugins: [self.plugins.clone(), overlay.plugins.clone()].concat(),
            dev_server: overlay
                .dev_server
                .clone()
                .or_else(|| self.dev_server.clone()),
        })
    }

    /// Finalize the stacked layers into the value handed to the engine.
    pub fn finalize(self) -> Result<ResolvedConfig, ConfigError> {
        Ok(ResolvedConfig {
            metadata: self.metadata,
            source_maps: self.source_maps.unwrap_or(SourceMapMode::SourceMap),
            output: self.output.ok_or(ConfigError::MissingOutput)?,
            rules: self.rules,
            plugins: self.plugins,
            dev_server: self.dev_server,
        })
    }
}

/// The fully composed configuration for one build invocation. Owned by the
/// invocation, handed off whole to the external bundling engine, then
/// discarded.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedConfig {
    pub metadata: BTreeMap<String, ConfigValue>,
    pub source_maps: SourceMapMode,
    pub output: OutputSpec,
    pub rules: Vec<AssetRule>,
    pub plugins: Vec<PluginInstruction>,
    pub dev_server: Option<DevServerSpec>,
}

/// Compose the configuration for the named environment.
pub fn compose(
    name: EnvName,
    root: &ProjectRoot,
    vars: ProcessVars,
    hot_reload: bool,
) -> Result<ResolvedConfig> {
    let env = Environment::new(name, vars, hot_reload)?;
    tracing::debug!("environment metadata: {env:?}");

    let overlay = match env.name {
        EnvName::Development => development_overlay(&env, root),
        EnvName::Production => production_overlay(&env, root),
    };

    let resolved = base_layer(&env)
        .merge(&overlay)
        .with_context(|| format!("merging the {name} overlay onto the base configuration"))?
        .finalize()?;
    tracing::debug!(
        "composed {name} configuration: {} rules, {} plugins",
        resolved.rules.len(),
        resolved.plugins.len()
    );
    Ok(resolved)
}

/// Settings common to every environment.
fn base_layer(env: &Environment) -> ConfigLayer {
    let mut metadata = BTreeMap::new();
    metadata.insert("title".to_string(), ConfigValue::from(env.title.clone()));
    ConfigLayer {
        metadata,
        ..Default::default()
    }
}

/// Named values every overlay contributes on top of the base metadata.
fn environment_metadata(env: &Environment) -> BTreeMap<String, ConfigValue> {
    let mut metadata = BTreeMap::new();
    metadata.insert("ENV".to_string(), ConfigValue::from(env.name.to_string()));
    metadata.insert("HMR".to_string(), ConfigValue::from(env.hot_reload()));
    metadata.insert("host".to_string(), ConfigValue::from(env.host.clone()));
    metadata.insert("port".to_string(), ConfigValue::from(i64::from(env.port)));
    metadata
}

fn development_overlay(env: &Environment, root: &ProjectRoot) -> ConfigLayer {
    ConfigLayer {
        metadata: environment_metadata(env),
        source_maps: Some(SourceMapMode::SourceMap),
        output: Some(OutputSpec::dev(root)),
        rules: style_rules(root),
        plugins: assemble(env, root),
        dev_server: Some(DevServerSpec::new(env)),
    }
}

fn production_overlay(env: &Environment, root: &ProjectRoot) -> ConfigLayer {
    ConfigLayer {
        metadata: environment_metadata(env),
        source_maps: Some(SourceMapMode::SourceMap),
        output: Some(OutputSpec::release(root)),
        rules: style_rules(root),
        plugins: assemble(env, root),
        dev_server: None,
    }
}
