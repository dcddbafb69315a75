//! Alias tables and the compilation context that bundles every registry
//!
//! All tables are reset in place with `clear`, so anything holding the
//! context keeps observing the same (now empty) tables.

use crate::token::{resolve_token, TokenGroups, TokenTree};
use crate::types::StyleMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Shorthand property keys and the canonical properties they expand to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyAliases {
    aliases: HashMap<String, Vec<String>>,
}

impl PropertyAliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Margin and padding shorthands: `m`, `mx`, `py`, ...
    pub fn with_defaults() -> Self {
        let mut aliases = Self::new();
        aliases.insert("m", ["margin"]);
        aliases.insert("mb", ["marginBottom"]);
        aliases.insert("ml", ["marginLeft"]);
        aliases.insert("mr", ["marginRight"]);
        aliases.insert("mt", ["marginTop"]);
        aliases.insert("mx", ["marginLeft", "marginRight"]);
        aliases.insert("my", ["marginTop", "marginBottom"]);
        aliases.insert("p", ["padding"]);
        aliases.insert("pb", ["paddingBottom"]);
        aliases.insert("pl", ["paddingLeft"]);
        aliases.insert("pr", ["paddingRight"]);
        aliases.insert("pt", ["paddingTop"]);
        aliases.insert("px", ["paddingLeft", "paddingRight"]);
        aliases.insert("py", ["paddingTop", "paddingBottom"]);
        aliases
    }

    pub fn insert<I, S>(&mut self, shorthand: impl Into<String>, properties: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.insert(
            shorthand.into(),
            properties.into_iter().map(Into::into).collect(),
        );
    }

    pub fn extend(&mut self, aliases: &HashMap<String, Vec<String>>) {
        for (shorthand, properties) in aliases {
            self.aliases.insert(shorthand.clone(), properties.clone());
        }
    }

    pub fn get(&self, shorthand: &str) -> Option<&[String]> {
        self.aliases.get(shorthand).map(Vec::as_slice)
    }

    pub fn contains(&self, shorthand: &str) -> bool {
        self.aliases.contains_key(shorthand)
    }

    pub fn remove(&mut self, shorthand: &str) -> Option<Vec<String>> {
        self.aliases.remove(shorthand)
    }

    /// Empty the table in place
    pub fn clear(&mut self) {
        self.aliases.clear();
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Custom at-rule and pseudo keys mapped to their literal CSS text,
/// e.g. `@tablet` to `@media (min-width: 768px)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyAliases {
    aliases: HashMap<String, String>,
}

impl KeyAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, css: impl Into<String>) {
        self.aliases.insert(key.into(), css.into());
    }

    pub fn extend(&mut self, aliases: &HashMap<String, String>) {
        for (key, css) in aliases {
            self.aliases.insert(key.clone(), css.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.aliases.get(key).map(String::as_str)
    }

    /// The aliased text for `key`, or `key` itself
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.aliases.remove(key)
    }

    /// Empty the table in place
    pub fn clear(&mut self) {
        self.aliases.clear();
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Every registry a compilation reads from.
///
/// Passed explicitly to the expander and serializer; independent contexts
/// never observe each other's configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleContext {
    pub property_aliases: PropertyAliases,
    pub key_aliases: KeyAliases,
    pub tokens: TokenTree,
    pub token_groups: TokenGroups,
}

impl Default for StyleContext {
    fn default() -> Self {
        Self {
            property_aliases: PropertyAliases::with_defaults(),
            key_aliases: KeyAliases::new(),
            tokens: TokenTree::new(),
            token_groups: TokenGroups::with_defaults(),
        }
    }
}

impl StyleContext {
    /// Context with the built-in shorthands and token groups
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with every table empty
    pub fn empty() -> Self {
        Self {
            property_aliases: PropertyAliases::new(),
            key_aliases: KeyAliases::new(),
            tokens: TokenTree::new(),
            token_groups: TokenGroups::new(),
        }
    }

    /// Clear every table in place
    pub fn reset(&mut self) {
        self.property_aliases.clear();
        self.key_aliases.clear();
        self.tokens.clear();
        self.token_groups.clear();
    }

    pub fn resolve_token(&self, property: &str, reference: &str) -> Option<&str> {
        resolve_token(&self.tokens, &self.token_groups, property, reference)
    }

    pub fn expand(&self, styles: &StyleMap) -> StyleMap {
        crate::expander::expand(styles, &self.property_aliases, &self.key_aliases)
    }
}
