//! Normalized style tree
//!
//! A [`StyleMap`] is lowered once into [`Node`]s so the serializer dispatches
//! on [`SelectorKind`] instead of re-inspecting key prefixes.

use crate::registry::KeyAliases;
use crate::types::{Scalar, StyleMap, StyleValue, AMPERSAND_PREFIX, AT_RULE_PREFIX};

/// How a nested scope's key composes with the enclosing selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// Descendant selector, joined to the current selector with a space
    Plain,
    /// `&`-relative selector, appended directly to the base selector
    Ampersand,
    /// At-rule block wrapping the enclosing selector's rule
    AtRule,
}

impl SelectorKind {
    pub fn classify(key: &str) -> Self {
        if key.starts_with(AMPERSAND_PREFIX) {
            Self::Ampersand
        } else if key.starts_with(AT_RULE_PREFIX) {
            Self::AtRule
        } else {
            Self::Plain
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A `property: value` pair, property still in source casing
    Declaration { property: String, value: Scalar },

    /// A nested scope.
    ///
    /// `selector` holds the descendant selector for `Plain`, the text after
    /// the `&` for `Ampersand`, and the resolved header for `AtRule`.
    Scope {
        kind: SelectorKind,
        selector: String,
        children: Vec<Node>,
    },
}

/// Lower a style mapping into nodes, resolving at-rule headers through `keys`
pub fn lower(styles: &StyleMap, keys: &KeyAliases) -> Vec<Node> {
    styles
        .iter()
        .map(|(key, value)| match value {
            StyleValue::Scalar(scalar) => Node::Declaration {
                property: key.clone(),
                value: scalar.clone(),
            },
            StyleValue::Map(nested) => {
                let kind = SelectorKind::classify(key);
                let selector = match kind {
                    SelectorKind::Plain => key.clone(),
                    SelectorKind::Ampersand => key.replacen(AMPERSAND_PREFIX, "", 1),
                    SelectorKind::AtRule => keys.resolve(key).to_string(),
                };
                Node::Scope {
                    kind,
                    selector,
                    children: lower(nested, keys),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_map;

    #[test]
    fn test_classify() {
        assert_eq!(SelectorKind::classify("&:hover"), SelectorKind::Ampersand);
        assert_eq!(SelectorKind::classify("& span"), SelectorKind::Ampersand);
        assert_eq!(SelectorKind::classify("@media print"), SelectorKind::AtRule);
        assert_eq!(SelectorKind::classify("span"), SelectorKind::Plain);
        assert_eq!(SelectorKind::classify("a&b"), SelectorKind::Plain);
    }

    #[test]
    fn test_lower_nested_scopes() {
        let mut keys = KeyAliases::new();
        keys.insert("@tablet", "@media (min-width: 768px)");

        let styles = style_map! {
            "color" => "red",
            "&:hover" => { "color" => "blue" },
            "@tablet" => { "fontSize" => 18 },
            "span" => {},
        };
        let nodes = lower(&styles, &keys);

        assert_eq!(nodes.len(), 4);
        assert_eq!(
            nodes[0],
            Node::Declaration {
                property: "color".into(),
                value: Scalar::Text("red".into()),
            }
        );
        match &nodes[1] {
            Node::Scope { kind, selector, children } => {
                assert_eq!(*kind, SelectorKind::Ampersand);
                assert_eq!(selector, ":hover");
                assert_eq!(children.len(), 1);
            }
            other => panic!("expected scope, got {:?}", other),
        }
        match &nodes[2] {
            Node::Scope { kind, selector, .. } => {
                assert_eq!(*kind, SelectorKind::AtRule);
                assert_eq!(selector, "@media (min-width: 768px)");
            }
            other => panic!("expected scope, got {:?}", other),
        }
        match &nodes[3] {
            Node::Scope { kind, selector, children } => {
                assert_eq!(*kind, SelectorKind::Plain);
                assert_eq!(selector, "span");
                assert!(children.is_empty());
            }
            other => panic!("expected scope, got {:?}", other),
        }
    }
}
