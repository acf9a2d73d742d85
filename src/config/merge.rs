//! The configuration merge model.
//!
//! Layers are merged through a tagged value model rather than duck-typed
//! objects: every value is a scalar, a mapping, or a sequence, and each shape
//! pairing has one explicit rule. Scalars from the overlay replace the base,
//! mappings merge key-by-key with the overlay winning conflicts, and sequences
//! concatenate with the base entries first. Anything else is a configuration
//! error carrying the offending key path.

use crate::config::ConfigError;
use serde::Serialize;
use std::collections::BTreeMap;

/// A single configuration scalar.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Scalar {
    /// Render the scalar as a compile-time literal for injection into built
    /// modules: strings are double-quoted and escaped, booleans and integers
    /// are bare. Later stages can rely on these being constants, not runtime
    /// lookups.
    pub fn emit(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Str(value) => format!("{value:?}"),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// A configuration value: one of the three shapes the merger understands.
///
/// Mappings are `BTreeMap`s so iteration order is deterministic; ordering is
/// semantically load-bearing wherever these values reach the bundling engine.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Scalar(Scalar),
    Sequence(Vec<ConfigValue>),
    Mapping(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Merge an overlay onto a base value, producing a new value. Neither
    /// input is mutated.
    pub fn merge(base: &Self, overlay: &Self) -> Result<Self, ConfigError> {
        merge_values(base, overlay, "")
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }
}

impl<T: Into<Scalar>> From<T> for ConfigValue {
    fn from(value: T) -> Self {
        Self::Scalar(value.into())
    }
}

fn merge_values(
    base: &ConfigValue,
    overlay: &ConfigValue,
    path: &str,
) -> Result<ConfigValue, ConfigError> {
    match (base, overlay) {
        (ConfigValue::Scalar(_), ConfigValue::Scalar(value)) => {
            Ok(ConfigValue::Scalar(value.clone()))
        }
        (ConfigValue::Mapping(base), ConfigValue::Mapping(overlay)) => {
            Ok(ConfigValue::Mapping(merge_mappings(base, overlay, path)?))
        }
        (ConfigValue::Sequence(base), ConfigValue::Sequence(overlay)) => Ok(ConfigValue::Sequence(
            base.iter().chain(overlay).cloned().collect(),
        )),
        (base, overlay) => Err(ConfigError::ShapeMismatch {
            path: if path.is_empty() {
                "<root>".to_string()
            } else {
                path.to_string()
            },
            base: base.kind(),
            overlay: overlay.kind(),
        }),
    }
}

/// Merge two mappings key-by-key. Keys present only in the base are retained,
/// overlay keys win conflicts, and values under shared keys are merged
/// recursively.
pub(crate) fn merge_mappings(
    base: &BTreeMap<String, ConfigValue>,
    overlay: &BTreeMap<String, ConfigValue>,
    path: &str,
) -> Result<BTreeMap<String, ConfigValue>, ConfigError> {
    let mut merged = base.clone();
    for (key, value) in overlay {
        let value = match base.get(key) {
            Some(existing) => merge_values(existing, value, &child_path(path, key))?,
            None => value.clone(),
        };
        merged.insert(key.clone(), value);
    }
    Ok(merged)
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn mapping(entries: &[(&str, ConfigValue)]) -> ConfigValue {
        ConfigValue::Mapping(
            entries
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        )
    }

    #[test]
    fn overlay_scalar_replaces_base() {
        let base = ConfigValue::from(3000i64);
        let overlay = ConfigValue::from(8080i64);
        let merged = ConfigValue::merge(&base, &overlay).expect("scalars merge");
        assert_eq!(merged, overlay);
    }

    #[test]
    fn mapping_merge_keeps_base_only_keys_and_overlay_wins_conflicts() {
        let base = mapping(&[("host", "localhost".into()), ("port", 3000i64.into())]);
        let overlay = mapping(&[("port", 8080i64.into()), ("hmr", true.into())]);

        let merged = ConfigValue::merge(&base, &overlay).expect("mappings merge");

        assert_eq!(
            merged,
            mapping(&[
                ("host", "localhost".into()),
                ("port", 8080i64.into()),
                ("hmr", true.into()),
            ])
        );
    }

    #[test]
    fn mapping_merge_recurses_into_shared_keys() {
        let base = mapping(&[("output", mapping(&[("path", "/work/dist".into())]))]);
        let overlay = mapping(&[("output", mapping(&[("public", "/".into())]))]);

        let merged = ConfigValue::merge(&base, &overlay).expect("nested mappings merge");

        assert_eq!(
            merged,
            mapping(&[(
                "output",
                mapping(&[("path", "/work/dist".into()), ("public", "/".into())]),
            )])
        );
    }

    #[test]
    fn sequences_concatenate_base_first() {
        let base = ConfigValue::Sequence(vec!["a".into(), "b".into()]);
        let overlay = ConfigValue::Sequence(vec!["c".into()]);

        let merged = ConfigValue::merge(&base, &overlay).expect("sequences merge");

        assert_eq!(
            merged,
            ConfigValue::Sequence(vec!["a".into(), "b".into(), "c".into()])
        );
    }

    #[test]
    fn merge_does_not_mutate_its_inputs() {
        let base = mapping(&[("rules", ConfigValue::Sequence(vec!["css".into()]))]);
        let overlay = mapping(&[("rules", ConfigValue::Sequence(vec!["scss".into()]))]);
        let base_before = base.clone();
        let overlay_before = overlay.clone();

        ConfigValue::merge(&base, &overlay).expect("mappings merge");

        assert_eq!(base, base_before);
        assert_eq!(overlay, overlay_before);
    }

    #[rstest]
    #[case::scalar_vs_mapping(
        ConfigValue::from(true),
        mapping(&[]),
        "cannot merge mapping over scalar at '<root>'"
    )]
    #[case::sequence_vs_scalar(
        ConfigValue::Sequence(vec![]),
        ConfigValue::from(1i64),
        "cannot merge scalar over sequence at '<root>'"
    )]
    #[case::mapping_vs_sequence(
        mapping(&[]),
        ConfigValue::Sequence(vec![]),
        "cannot merge sequence over mapping at '<root>'"
    )]
    fn incompatible_shapes_are_rejected(
        #[case] base: ConfigValue,
        #[case] overlay: ConfigValue,
        #[case] expected: &str,
    ) {
        let err = ConfigValue::merge(&base, &overlay).expect_err("shapes must not merge");
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn shape_mismatch_reports_the_offending_key_path() {
        let base = mapping(&[("server", mapping(&[("port", 3000i64.into())]))]);
        let overlay = mapping(&[("server", mapping(&[("port", mapping(&[]))]))]);

        let err = ConfigValue::merge(&base, &overlay).expect_err("shapes must not merge");

        assert_eq!(
            err.to_string(),
            "cannot merge mapping over scalar at 'server.port'"
        );
    }

    #[rstest]
    #[case::string_is_quoted(Scalar::from("development"), r#""development""#)]
    #[case::string_is_escaped(Scalar::from(r#"say "hi""#), r#""say \"hi\"""#)]
    #[case::bool_is_bare(Scalar::from(true), "true")]
    #[case::int_is_bare(Scalar::from(3000i64), "3000")]
    fn scalars_emit_as_literals(#[case] scalar: Scalar, #[case] expected: &str) {
        assert_eq!(scalar.emit(), expected);
    }
}
