//! CSS text generation from style mappings

use crate::ast::{lower, Node, SelectorKind};
use crate::error::{Result, StyleError};
use crate::registry::StyleContext;
use crate::types::{Scalar, StyleMap, UNRESOLVED_VALUE};
use crate::utils::hyphenate;

/// The selectors in effect while serializing one scope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorContext {
    pub current: String,
    pub top_level: String,
}

impl SelectorContext {
    pub fn new(current: impl Into<String>, top_level: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            top_level: top_level.into(),
        }
    }

    /// Context for styles compiled under a single top-level selector
    pub fn top_level(selector: impl Into<String>) -> Self {
        Self::new(String::new(), selector)
    }

    /// `&` keys attach to this: the top-level selector when set
    pub fn base(&self) -> &str {
        if self.top_level.is_empty() {
            &self.current
        } else {
            &self.top_level
        }
    }

    /// Declarations of this scope are emitted under this: the current selector when set
    pub fn rule_selector(&self) -> &str {
        if self.current.is_empty() {
            &self.top_level
        } else {
            &self.current
        }
    }
}

/// A token reference that did not resolve during serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedToken {
    pub property: String,
    pub reference: String,
}

/// Walks normalized style nodes and writes CSS rule text
pub struct Serializer<'a> {
    context: &'a StyleContext,
    unresolved: Vec<UnresolvedToken>,
    rule_count: usize,
    declaration_count: usize,
}

impl<'a> Serializer<'a> {
    pub fn new(context: &'a StyleContext) -> Self {
        Self {
            context,
            unresolved: Vec::new(),
            rule_count: 0,
            declaration_count: 0,
        }
    }

    /// Serialize `styles` (already expanded) under `selectors`.
    ///
    /// Unresolved token references are written as `undefined` and recorded.
    pub fn serialize(&mut self, styles: &StyleMap, selectors: &SelectorContext) -> String {
        let nodes = lower(styles, &self.context.key_aliases);
        self.serialize_nodes(&nodes, selectors)
    }

    pub fn serialize_nodes(&mut self, nodes: &[Node], selectors: &SelectorContext) -> String {
        let mut declarations = String::new();
        let mut nested = String::new();

        for node in nodes {
            match node {
                Node::Declaration { property, value } => {
                    let css_key = hyphenate(property);
                    let css_value = self.declaration_value(&css_key, value);
                    declarations.push_str(&format!("{}: {}; ", css_key, css_value));
                    self.declaration_count += 1;
                }
                Node::Scope { kind, selector, children } => {
                    nested.push_str(&self.serialize_scope(*kind, selector, children, selectors));
                }
            }
        }

        if declarations.is_empty() {
            return nested;
        }

        self.rule_count += 1;
        format!(
            "{} {{ {} }}\n{}",
            selectors.rule_selector(),
            declarations.trim(),
            nested
        )
    }

    fn serialize_scope(
        &mut self,
        kind: SelectorKind,
        selector: &str,
        children: &[Node],
        selectors: &SelectorContext,
    ) -> String {
        let base = selectors.base();
        log::trace!("scope {:?} '{}' under '{}'", kind, selector, base);

        match kind {
            SelectorKind::Ampersand => {
                let inner = SelectorContext::new(format!("{}{}", base, selector), base);
                self.serialize_nodes(children, &inner)
            }
            SelectorKind::AtRule => {
                // The wrapped block re-establishes the enclosing rule's selector
                let outer = selectors.rule_selector();
                let inner = SelectorContext::new(outer, outer);
                format!("{} {{\n{}}}\n", selector, self.serialize_nodes(children, &inner))
            }
            SelectorKind::Plain => {
                let inner = SelectorContext::new(format!("{} {}", selectors.current, selector), base);
                self.serialize_nodes(children, &inner)
            }
        }
    }

    fn declaration_value(&mut self, css_key: &str, value: &Scalar) -> String {
        let reference = match value {
            Scalar::Text(text) if value.is_token_reference() => text,
            _ => return value.to_string(),
        };

        match self.context.resolve_token(css_key, reference) {
            Some(resolved) => resolved.to_string(),
            None => {
                log::warn!("Unresolved token '{}' for property '{}'", reference, css_key);
                self.unresolved.push(UnresolvedToken {
                    property: css_key.to_string(),
                    reference: reference.clone(),
                });
                UNRESOLVED_VALUE.to_string()
            }
        }
    }

    pub fn unresolved(&self) -> &[UnresolvedToken] {
        &self.unresolved
    }

    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    pub fn declaration_count(&self) -> usize {
        self.declaration_count
    }
}

/// Serialize `styles` to CSS text with the given selectors and registries
pub fn serialize(styles: &StyleMap, selectors: &SelectorContext, context: &StyleContext) -> String {
    Serializer::new(context).serialize(styles, selectors)
}

/// Like [`serialize`], but fails on the first unresolved token reference
pub fn serialize_strict(
    styles: &StyleMap,
    selectors: &SelectorContext,
    context: &StyleContext,
) -> Result<String> {
    let mut serializer = Serializer::new(context);
    let css = serializer.serialize(styles, selectors);
    match serializer.unresolved().first() {
        Some(token) => Err(StyleError::unresolved_token(&token.property, &token.reference)),
        None => Ok(css),
    }
}
