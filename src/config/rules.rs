//! Asset rules.
//!
//! Each rule binds a file-extension pattern to an ordered transform chain and
//! restricts it to specific directory roots. The style rules only apply under
//! `src/assets/styles`: global side-effecting style imports live there and
//! nowhere else, so the same extension elsewhere in the tree is left alone.

use crate::config::{ConfigError, ProjectRoot, Scalar};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Subdirectory holding globally imported styles, relative to the root.
const STYLES_SUBDIR: [&str; 3] = ["src", "assets", "styles"];

/// A transform applied to a matched asset, identified for the external engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Transform {
    RawExtraction,
    CssTransform,
    SassTransform,
}

/// One step of a transform chain: a transform plus its options, if any.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransformStep {
    pub transform: Transform,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, Scalar>,
}

impl From<Transform> for TransformStep {
    fn from(transform: Transform) -> Self {
        Self {
            transform,
            options: BTreeMap::new(),
        }
    }
}

/// A binding from a file pattern and directory scope to a transform chain.
#[derive(Clone, Debug, Serialize)]
pub struct AssetRule {
    /// Pattern over the full file path.
    #[serde(serialize_with = "pattern_source")]
    pub pattern: Regex,
    /// Transforms to apply, in order.
    pub chain: Vec<TransformStep>,
    /// Directory roots the rule applies to. An empty set means unscoped.
    pub scopes: Vec<PathBuf>,
}

impl AssetRule {
    pub fn applies_to(&self, path: &Path) -> bool {
        let in_scope =
            self.scopes.is_empty() || self.scopes.iter().any(|scope| path.starts_with(scope));
        in_scope && self.pattern.is_match(&path.to_string_lossy())
    }
}

fn pattern_source<S: Serializer>(pattern: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(pattern.as_str())
}

/// The ordered style rules: css and sass sources under the styles directory,
/// each extracted as raw text and then run through the stylesheet transform.
pub fn style_rules(root: &ProjectRoot) -> Vec<AssetRule> {
    let styles = root.join(STYLES_SUBDIR);
    vec![
        AssetRule {
            pattern: compile(r"\.css$"),
            chain: vec![
                Transform::RawExtraction.into(),
                Transform::CssTransform.into(),
            ],
            scopes: vec![styles.clone()],
        },
        AssetRule {
            pattern: compile(r"\.scss$"),
            chain: vec![
                Transform::RawExtraction.into(),
                Transform::SassTransform.into(),
            ],
            scopes: vec![styles],
        },
    ]
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("asset rule patterns are fixed and must compile")
}

/// Find the rule applicable to `path`, in definition order.
///
/// At most one rule may apply to a given file; a second applicable rule means
/// one chain would silently shadow another, which is a configuration error
/// rather than a tie to break.
pub fn matching_rule<'r>(
    rules: &'r [AssetRule],
    path: &Path,
) -> Result<Option<&'r AssetRule>, ConfigError> {
    let mut applicable = rules.iter().filter(|rule| rule.applies_to(path));
    let first = applicable.next();
    if first.is_some() && applicable.next().is_some() {
        return Err(ConfigError::AmbiguousRule(path.to_path_buf()));
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> ProjectRoot {
        ProjectRoot::new("/work/app").expect("absolute root")
    }

    fn chain_of(rule: &AssetRule) -> Vec<Transform> {
        rule.chain.iter().map(|step| step.transform).collect()
    }

    #[test]
    fn scss_under_styles_matches_exactly_one_rule() {
        let rules = style_rules(&root());
        let path = Path::new("/work/app/src/assets/styles/theme.scss");

        let rule = matching_rule(&rules, path)
            .expect("no ambiguity")
            .expect("scss under styles must match");

        assert_eq!(
            chain_of(rule),
            vec![Transform::RawExtraction, Transform::SassTransform]
        );
    }

    #[test]
    fn css_under_styles_gets_the_css_chain() {
        let rules = style_rules(&root());
        let path = Path::new("/work/app/src/assets/styles/base.css");

        let rule = matching_rule(&rules, path)
            .expect("no ambiguity")
            .expect("css under styles must match");

        assert_eq!(
            chain_of(rule),
            vec![Transform::RawExtraction, Transform::CssTransform]
        );
    }

    #[test]
    fn scss_outside_styles_matches_nothing() {
        let rules = style_rules(&root());
        let path = Path::new("/work/app/src/app/widget/widget.scss");

        assert!(
            matching_rule(&rules, path)
                .expect("no ambiguity")
                .is_none()
        );
    }

    #[test]
    fn duplicate_applicable_rules_are_a_configuration_error() {
        let mut rules = style_rules(&root());
        // A second, broader scss rule overlapping the first.
        rules.push(AssetRule {
            pattern: compile(r"\.scss$"),
            chain: vec![Transform::SassTransform.into()],
            scopes: vec![],
        });
        let path = Path::new("/work/app/src/assets/styles/theme.scss");

        let err = matching_rule(&rules, path).expect_err("overlap must be rejected");
        assert_eq!(
            err.to_string(),
            r#"ambiguous asset rules: multiple transform chains match "/work/app/src/assets/styles/theme.scss""#
        );
    }

    #[test]
    fn transform_identifiers_render_kebab_case() {
        assert_eq!(Transform::RawExtraction.to_string(), "raw-extraction");
        assert_eq!(Transform::SassTransform.to_string(), "sass-transform");
        assert_eq!(Transform::CssTransform.to_string(), "css-transform");
    }
}
